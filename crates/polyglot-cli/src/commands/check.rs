//! The `check` management command.
//!
//! Compares every loaded locale against a reference locale and reports the
//! scopes each one is missing. Extra scopes are reported for information.

use std::io::Write;

use polyglot_core::{I18n, I18nError, I18nResult};

use crate::command::ManagementCommand;

/// Checks loaded translations for missing scopes.
pub struct CheckCommand;

/// The result of a single translation check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// The severity level of this check result.
    pub level: CheckLevel,
    /// A human-readable description of the issue.
    pub msg: String,
    /// An optional hint for how to resolve the issue.
    pub hint: Option<String>,
    /// A unique identifier for this check (e.g. "translations.W001").
    pub id: String,
}

/// Severity levels for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    /// Informational message.
    Info,
    /// A warning that may indicate a problem.
    Warning,
    /// An error that must be resolved.
    Error,
    /// A critical error that prevents translations from being used.
    Critical,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl std::fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.level, self.id, self.msg)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n\tHINT: {hint}")?;
        }
        Ok(())
    }
}

/// Runs translation checks against the `reference` locale.
pub fn run_checks(i18n: &I18n, reference: &str) -> Vec<CheckMessage> {
    let mut messages = Vec::new();
    let store = i18n.store();
    let separator = i18n.separator();

    if store.is_empty() {
        messages.push(CheckMessage {
            level: CheckLevel::Critical,
            msg: "No translations are loaded".to_string(),
            hint: Some("Pass --translations or list translation_files in settings".to_string()),
            id: "translations.C001".to_string(),
        });
        return messages;
    }

    if !store.has_locale(reference) {
        messages.push(CheckMessage {
            level: CheckLevel::Error,
            msg: format!("Reference locale '{reference}' is not loaded"),
            hint: Some(format!("Loaded locales: {}", store.locales().join(", "))),
            id: "translations.E001".to_string(),
        });
        return messages;
    }

    for locale in store.locales() {
        if locale == reference {
            continue;
        }

        // Missing: present in the reference, absent here.
        for scope in store.missing_keys(reference, locale, separator) {
            messages.push(CheckMessage {
                level: CheckLevel::Warning,
                msg: format!("{locale}: missing \"{scope}\""),
                hint: None,
                id: "translations.W001".to_string(),
            });
        }

        // Extra: present here, absent in the reference.
        for scope in store.missing_keys(locale, reference, separator) {
            messages.push(CheckMessage {
                level: CheckLevel::Info,
                msg: format!("{locale}: \"{scope}\" is not in '{reference}'"),
                hint: None,
                id: "translations.I001".to_string(),
            });
        }
    }

    messages
}

impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "List scopes missing per locale"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("reference")
                .long("reference")
                .short('r')
                .help("Reference locale (defaults to the default locale)"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        i18n: &mut I18n,
        out: &mut dyn Write,
    ) -> I18nResult<()> {
        let reference = matches
            .get_one::<String>("reference")
            .map_or_else(|| i18n.default_locale().to_string(), Clone::clone);
        let messages = run_checks(i18n, &reference);

        if messages.is_empty() {
            writeln!(out, "Check identified no issues")?;
            return Ok(());
        }

        let errors = messages.iter().filter(|m| m.level >= CheckLevel::Error).count();
        let warnings = messages.iter().filter(|m| m.level == CheckLevel::Warning).count();

        for msg in &messages {
            writeln!(out, "{msg}")?;
        }

        writeln!(
            out,
            "Check identified {} issue(s) ({} error(s), {} warning(s))",
            messages.len(),
            errors,
            warnings
        )?;
        tracing::debug!(reference, errors, warnings, "translation check finished");

        if errors > 0 {
            return Err(I18nError::Configuration(format!(
                "Translation check found {errors} error(s)"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> I18n {
        let mut i18n = I18n::new();
        i18n.store_mut()
            .load_json(
                r#"{
                    "en": {"greetings": {"hello": "Hello", "bye": "Bye"}, "title": "Title"},
                    "pt-BR": {"greetings": {"hello": "Olá"}, "extra": "Extra"}
                }"#,
            )
            .unwrap();
        i18n
    }

    #[test]
    fn test_check_missing_scopes() {
        let messages = run_checks(&fixture(), "en");
        let warnings: Vec<_> = messages
            .iter()
            .filter(|m| m.level == CheckLevel::Warning)
            .map(|m| m.msg.as_str())
            .collect();
        assert_eq!(
            warnings,
            vec!["pt-BR: missing \"greetings.bye\"", "pt-BR: missing \"title\""]
        );
    }

    #[test]
    fn test_check_extra_scopes_are_info() {
        let messages = run_checks(&fixture(), "en");
        let info: Vec<_> = messages.iter().filter(|m| m.level == CheckLevel::Info).collect();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].id, "translations.I001");
        assert!(info[0].msg.contains("\"extra\""));
    }

    #[test]
    fn test_check_unknown_reference() {
        let messages = run_checks(&fixture(), "fr");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, CheckLevel::Error);
        assert_eq!(messages[0].id, "translations.E001");
    }

    #[test]
    fn test_check_nothing_loaded() {
        let messages = run_checks(&I18n::new(), "en");
        assert_eq!(messages[0].level, CheckLevel::Critical);
    }

    #[test]
    fn test_check_complete_locales() {
        let mut i18n = I18n::new();
        i18n.store_mut()
            .load_json(r#"{"en": {"a": "A"}, "de": {"a": "Ä"}}"#)
            .unwrap();
        assert!(run_checks(&i18n, "en").is_empty());
    }

    #[test]
    fn test_check_level_display() {
        assert_eq!(CheckLevel::Info.to_string(), "INFO");
        assert_eq!(CheckLevel::Warning.to_string(), "WARNING");
        assert_eq!(CheckLevel::Error.to_string(), "ERROR");
        assert_eq!(CheckLevel::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn test_check_level_ordering() {
        assert!(CheckLevel::Info < CheckLevel::Warning);
        assert!(CheckLevel::Warning < CheckLevel::Error);
        assert!(CheckLevel::Error < CheckLevel::Critical);
    }

    #[test]
    fn test_message_display_with_hint() {
        let msg = CheckMessage {
            level: CheckLevel::Error,
            msg: "broken".to_string(),
            hint: Some("fix it".to_string()),
            id: "translations.E001".to_string(),
        };
        assert_eq!(msg.to_string(), "ERROR (translations.E001): broken\n\tHINT: fix it");
    }

    #[test]
    fn test_handle_reports_and_fails_on_errors() {
        let cmd = CheckCommand.add_arguments(clap::Command::new("check"));
        let mut i18n = fixture();

        let mut out = Vec::new();
        let matches = cmd.clone().try_get_matches_from(["check"]).unwrap();
        CheckCommand.handle(&matches, &mut i18n, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("WARNING (translations.W001): pt-BR: missing \"title\""));
        assert!(text.ends_with("Check identified 3 issue(s) (0 error(s), 2 warning(s))\n"));

        let matches = cmd.try_get_matches_from(["check", "--reference", "fr"]).unwrap();
        let err = CheckCommand.handle(&matches, &mut i18n, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, I18nError::Configuration(_)));
    }
}
