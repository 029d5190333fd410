//! # polyglot
//!
//! Rails-style I18n for Rust.
//!
//! This is the meta-crate that re-exports the member crates for convenient
//! access, plus a process-wide shared [`I18n`] instance in [`global`] for
//! code that wants `t("scope")` without threading a context around. Depend on
//! the member crates directly for finer-grained control.
//!
//! ## Quick Start
//!
//! ```
//! use polyglot::{I18n, Options, Value};
//!
//! let mut i18n = I18n::new();
//! i18n.store_mut()
//!     .load_json(r#"{"en": {"inbox": {"one": "1 message", "other": "{{count}} messages"}}}"#)
//!     .unwrap();
//!
//! assert_eq!(i18n.p(3.0, "inbox", &Options::new()), Value::from("3 messages"));
//! assert_eq!(
//!     i18n.t("inbox", &Options::new().with("count", 1)),
//!     Value::from("1 message")
//! );
//! ```

pub mod global;

/// The translation context, values, options, settings, and errors.
pub use polyglot_core as core;

/// Number, currency, percentage, file size, and date localization.
#[cfg(feature = "format")]
pub use polyglot_format as format;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use polyglot_cli as cli;

pub use polyglot_core::{
    I18n, I18nError, I18nResult, Options, PluralCategory, PluralRule, PluralSource, Settings,
    Tree, Value,
};

#[cfg(feature = "format")]
pub use polyglot_format::{localize, Localizable};

/// Re-exported for building translation trees with `json!`.
pub use serde_json;
