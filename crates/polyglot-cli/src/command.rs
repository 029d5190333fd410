//! Management command framework.
//!
//! This module provides the [`ManagementCommand`] trait for defining CLI
//! commands and [`CommandRegistry`] for registering and dispatching them.
//!
//! ## Defining a Custom Command
//!
//! ```rust
//! use std::io::Write;
//!
//! use polyglot_cli::command::{CommandRegistry, ManagementCommand};
//! use polyglot_core::{I18n, I18nResult};
//!
//! struct LocalesCommand;
//!
//! impl ManagementCommand for LocalesCommand {
//!     fn name(&self) -> &str { "locales" }
//!     fn help(&self) -> &str { "List loaded locales" }
//!
//!     fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         i18n: &mut I18n,
//!         out: &mut dyn Write,
//!     ) -> I18nResult<()> {
//!         writeln!(out, "{}", i18n.store().locales().join(" "))?;
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(Box::new(LocalesCommand));
//! let mut out = Vec::new();
//! registry.run_from(["polyglot", "locales"], &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "\n");
//! ```

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use polyglot_core::{logging, settings_loader, I18n, I18nError, I18nResult, Settings};

/// A command that can be registered and invoked through the CLI.
///
/// Implementations define a name, help text, optional arguments, and a
/// handler that receives the translation context built from the global
/// `--settings` and `--translations` flags.
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &str;

    /// Returns a short help description for this command.
    fn help(&self) -> &str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command, writing its output to `out`.
    fn handle(
        &self,
        matches: &clap::ArgMatches,
        i18n: &mut I18n,
        out: &mut dyn Write,
    ) -> I18nResult<()>;
}

/// A registry of management commands.
///
/// Commands are registered by name and can be looked up, listed, or executed.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command. A command with the same name is replaced.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        let name = command.name().to_string();
        self.commands.insert(name, command);
    }

    /// Returns the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns a sorted list of all registered command names.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with the global flags and every
    /// registered subcommand.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("polyglot")
            .about("polyglot translation utility")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Settings file (.toml or .json)"),
            )
            .arg(
                clap::Arg::new("translations")
                    .long("translations")
                    .short('T')
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .action(clap::ArgAction::Append)
                    .help("Translation document to load (repeatable)"),
            );

        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by_key(|(name, _)| (*name).clone());

        for (name, cmd) in entries {
            // clap wants &'static names; commands are registered once per process.
            let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
            let subcmd = clap::Command::new(static_name).about(cmd.help().to_string());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Parses `args` and executes the selected command.
    ///
    /// Argument errors (including `--help`) are returned as configuration
    /// errors carrying clap's rendered message.
    pub fn run_from<I, T>(&self, args: I, out: &mut dyn Write) -> I18nResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .build_cli()
            .try_get_matches_from(args)
            .map_err(|e| I18nError::Configuration(e.render().to_string()))?;
        self.execute(&matches, out)
    }

    /// Executes the command identified by the given argument matches.
    ///
    /// `out` is flushed after the command succeeds; a failed flush (such as
    /// a closed pipe) is reported as an I/O error.
    pub fn execute(&self, matches: &clap::ArgMatches, out: &mut dyn Write) -> I18nResult<()> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| I18nError::Configuration("No subcommand specified".to_string()))?;

        let cmd = self
            .get(name)
            .ok_or_else(|| I18nError::Configuration(format!("Unknown command: {name}")))?;

        let settings = load_settings(matches)?;
        logging::setup_logging(&settings);
        let mut i18n = I18n::from_settings(&settings)?;
        tracing::debug!(command = name, locales = ?i18n.store().locales(), "executing command");

        cmd.handle(sub_matches, &mut i18n, out)?;
        out.flush()?;
        Ok(())
    }
}

/// Resolves settings from the global flags.
///
/// `--settings` names a file (with environment overrides applied); without
/// it settings come from the environment alone. `--translations` files are
/// loaded after any the settings list.
pub fn load_settings(matches: &clap::ArgMatches) -> I18nResult<Settings> {
    let mut settings = match matches.get_one::<PathBuf>("settings") {
        Some(path) => settings_loader::from_file_with_env(path)?,
        None => settings_loader::from_env(),
    };

    if let Some(paths) = matches.get_many::<PathBuf>("translations") {
        settings.translation_files.extend(paths.cloned());
    }
    Ok(settings)
}
