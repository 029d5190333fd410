//! Built-in management commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait.

pub mod check;
pub mod localize;
pub mod translate;

pub use check::CheckCommand;
pub use localize::LocalizeCommand;
pub use translate::TranslateCommand;

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(TranslateCommand));
    registry.register(Box::new(LocalizeCommand));
    registry.register(Box::new(CheckCommand));
}
