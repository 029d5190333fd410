//! The `localize` command.

use std::io::Write;

use polyglot_core::{I18n, I18nError, I18nResult};
use polyglot_format::{localize, Localizable};

use crate::command::ManagementCommand;

/// Localizes a number or a date.
pub struct LocalizeCommand;

/// Interprets a command-line value. Numbers are passed as numbers so that
/// date scopes treat them as millisecond timestamps.
pub fn parse_value(raw: &str) -> Localizable {
    raw.trim()
        .parse::<f64>()
        .map_or_else(|_| Localizable::Text(raw.to_string()), Localizable::Number)
}

impl ManagementCommand for LocalizeCommand {
    fn name(&self) -> &'static str {
        "localize"
    }

    fn help(&self) -> &'static str {
        "Localize a number or date"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("scope")
                .required(true)
                .help("currency, number, percentage, or a date/time format scope"),
        )
        .arg(
            clap::Arg::new("value")
                .required(true)
                .allow_negative_numbers(true)
                .help("Value to localize"),
        )
        .arg(
            clap::Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Locale to format for"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        i18n: &mut I18n,
        out: &mut dyn Write,
    ) -> I18nResult<()> {
        let scope = matches
            .get_one::<String>("scope")
            .ok_or_else(|| I18nError::Configuration("Missing scope".to_string()))?;
        let raw = matches
            .get_one::<String>("value")
            .ok_or_else(|| I18nError::Configuration("Missing value".to_string()))?;

        if let Some(locale) = matches.get_one::<String>("locale") {
            i18n.set_locale(locale.as_str());
        }

        writeln!(out, "{}", localize(i18n, scope, parse_value(raw)))?;
        Ok(())
    }
}
