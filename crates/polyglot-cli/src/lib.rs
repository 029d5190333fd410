//! # polyglot-cli
//!
//! The `polyglot` management binary: translate scopes, localize values, and
//! check translation files for missing scopes from the command line.
//!
//! ## Quick Start
//!
//! ```rust
//! use polyglot_cli::command::CommandRegistry;
//! use polyglot_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert_eq!(names, vec!["check", "localize", "translate"]);
//! ```

// These clippy lints are intentionally allowed:
// - doc_markdown: backtick requirements for documentation items are too strict
// - module_name_repetitions: re-exports make module-prefixed names redundant
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod commands;

pub use command::{CommandRegistry, ManagementCommand};

/// Returns a registry holding every built-in command.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);
    registry
}
