//! The `translate` command.
//!
//! Resolves one scope the way application code would and prints the result.
//! Mappings are printed as pretty JSON.

use std::io::Write;

use polyglot_core::options::keys;
use polyglot_core::{I18n, I18nError, I18nResult, Options, Value};

use crate::command::ManagementCommand;

/// Translates a scope.
pub struct TranslateCommand;

/// Builds the options bag from the command's arguments.
pub fn build_options(matches: &clap::ArgMatches) -> I18nResult<Options> {
    let mut options = Options::new();

    if let Some(locale) = matches.get_one::<String>("locale") {
        options.set(keys::LOCALE, locale.as_str());
    }
    if let Some(count) = matches.get_one::<f64>("count") {
        options.set(keys::COUNT, *count);
    }
    if let Some(default) = matches.get_one::<String>("default") {
        options.set(keys::DEFAULT_VALUE, default.as_str());
    }
    if let Some(vars) = matches.get_many::<String>("var") {
        for var in vars {
            let (name, value) = var.split_once('=').ok_or_else(|| {
                I18nError::Configuration(format!("Invalid --var '{var}': expected NAME=VALUE"))
            })?;
            options.set(name, value);
        }
    }
    Ok(options)
}

/// Renders a translation result for the terminal.
pub fn render(value: &Value) -> I18nResult<String> {
    match value {
        Value::Tree(_) | Value::Array(_) => Ok(serde_json::to_string_pretty(value)?),
        other => Ok(other.to_string()),
    }
}

impl ManagementCommand for TranslateCommand {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn help(&self) -> &'static str {
        "Translate a scope"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("scope")
                .required(true)
                .help("Scope to translate (e.g. greetings.hello)"),
        )
        .arg(
            clap::Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Locale to translate into"),
        )
        .arg(
            clap::Arg::new("count")
                .long("count")
                .short('c')
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64))
                .help("Count used for pluralization"),
        )
        .arg(
            clap::Arg::new("default")
                .long("default")
                .help("Text used when the scope is missing"),
        )
        .arg(
            clap::Arg::new("var")
                .long("var")
                .value_name("NAME=VALUE")
                .action(clap::ArgAction::Append)
                .help("Interpolation value (repeatable)"),
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
        let options = build_options(matches)?;

        let value = i18n.translate(scope, &options);
        writeln!(out, "{}", render(&value)?)?;
        Ok(())
    }
}
