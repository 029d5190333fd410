//! Placeholder interpolation.
//!
//! Placeholders are located by a regular expression whose first capture
//! group is the placeholder name. The default pattern accepts both
//! `{{name}}` and `%{name}`.
//!
//! Substitution is a single left-to-right pass over the matches found in
//! the original message; inserted values are never scanned again.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{I18nError, I18nResult};
use crate::options::Options;

/// The default placeholder pattern.
pub const DEFAULT_PLACEHOLDER: &str = r"(?:\{\{|%\{)(.*?)(?:\}\}?)";

/// Returns the compiled default placeholder pattern.
pub fn default_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(DEFAULT_PLACEHOLDER).expect("default placeholder pattern"))
}

/// Compiles a custom placeholder pattern.
///
/// # Errors
///
/// Returns [`I18nError::InvalidPattern`] if the pattern does not compile or
/// has no capture group for the placeholder name.
pub fn compile_placeholder(pattern: &str) -> I18nResult<Regex> {
    let regex = Regex::new(pattern)?;
    if regex.captures_len() < 2 {
        return Err(I18nError::InvalidPattern(format!(
            "pattern '{pattern}' must capture the placeholder name"
        )));
    }
    Ok(regex)
}

/// Substitutes every placeholder in `message` with its value from `options`.
///
/// Unset values produce `[missing <token> value]`, keeping the token exactly
/// as written.
///
/// # Examples
///
/// ```
/// use polyglot_core::i18n::interpolate::{default_placeholder, interpolate};
/// use polyglot_core::options::Options;
///
/// let pattern = default_placeholder();
/// let opts = Options::new().with("message", "X");
/// assert_eq!(interpolate(pattern, "Attention! {{message}}", &opts), "Attention! X");
/// assert_eq!(
///     interpolate(pattern, "Attention! %{message}", &Options::new()),
///     "Attention! [missing %{message} value]"
/// );
/// ```
pub fn interpolate(pattern: &Regex, message: &str, options: &Options) -> String {
    pattern
        .replace_all(message, |caps: &Captures<'_>| {
            let token = caps.get(0).map_or("", |m| m.as_str());
            let name = caps.get(1).map_or("", |m| m.as_str());
            options.get(name).map_or_else(
                || {
                    tracing::debug!(placeholder = name, "missing interpolation value");
                    format!("[missing {token} value]")
                },
                ToString::to_string,
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn run(message: &str, options: &Options) -> String {
        interpolate(default_placeholder(), message, options)
    }

    #[test]
    fn test_both_syntaxes() {
        let opts = Options::new().with("a", "1").with("b", "2");
        assert_eq!(run("{{a}} and %{b}", &opts), "1 and 2");
    }

    #[test]
    fn test_missing_keeps_token_style() {
        let opts = Options::new();
        assert_eq!(
            run("Attention! {{message}}", &opts),
            "Attention! [missing {{message}} value]"
        );
        assert_eq!(run("%{who} here", &opts), "[missing %{who} value] here");
    }

    #[test]
    fn test_null_value_is_missing() {
        let opts = Options::new().with("x", Value::Null);
        assert_eq!(run("{{x}}", &opts), "[missing {{x}} value]");
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let opts = Options::new().with("a", "{{b}}").with("b", "boom");
        assert_eq!(run("{{a}}", &opts), "{{b}}");
    }

    #[test]
    fn test_repeated_placeholder() {
        let opts = Options::new().with("n", 3);
        assert_eq!(run("{{n}} + {{n}}", &opts), "3 + 3");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(run("plain text", &Options::new()), "plain text");
    }

    #[test]
    fn test_non_string_values() {
        let opts = Options::new().with("flag", true).with("n", 2.5);
        assert_eq!(run("{{flag}} {{n}}", &opts), "true 2.5");
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = compile_placeholder(r"\$\{(\w+)\}").unwrap();
        let opts = Options::new().with("name", "Ana");
        assert_eq!(interpolate(&pattern, "Hi ${name} {{name}}", &opts), "Hi Ana {{name}}");
    }

    #[test]
    fn test_pattern_without_capture_group() {
        assert!(matches!(
            compile_placeholder(r"\{\{\w+\}\}"),
            Err(I18nError::InvalidPattern(_))
        ));
        assert!(matches!(compile_placeholder("("), Err(I18nError::InvalidPattern(_))));
    }
}
