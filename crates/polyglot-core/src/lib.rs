//! # polyglot-core
//!
//! The resolution pipeline of the polyglot localization engine: translation
//! trees, locale fallback chains, pluralization, and placeholder
//! interpolation, tied together by the [`I18n`] context.
//!
//! ## Modules
//!
//! - [`value`] - Translation tree values
//! - [`options`] - Per-call option bags
//! - [`i18n`] - The translation context and its building blocks
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Context configuration
//! - [`settings_loader`] - TOML/JSON/environment settings loading
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod i18n;
pub mod logging;
pub mod options;
pub mod settings;
pub mod settings_loader;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{I18nError, I18nResult};
pub use i18n::plural::{PluralCategory, PluralRule};
pub use i18n::{I18n, PluralSource};
pub use options::Options;
pub use settings::Settings;
pub use value::{Tree, Value};
