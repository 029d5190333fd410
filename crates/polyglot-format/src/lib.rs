//! # polyglot-format
//!
//! Locale-aware formatting on top of [`polyglot_core::I18n`]: numbers,
//! currency, percentages, file sizes, and dates. Formatting rules are read
//! from the translation tree (`number.format`, `number.currency.format`,
//! `date.month_names`, ...) and fall back to built-in English defaults.
//!
//! ## Modules
//!
//! - [`number`] - Number, currency, percentage, and human size formatting
//! - [`date`] - Date parsing
//! - [`strftime`] - Directive-based date formatting with translated names
//! - [`localize`] - Scope-driven dispatch (`l("currency", 12)`)
//! - [`template`] - The shared `%`-directive scanner
//!
//! ## Quick Start
//!
//! ```
//! use polyglot_core::{I18n, Options, Value};
//! use polyglot_format::{l, to_currency};
//!
//! let mut i18n = I18n::new();
//! i18n.merge_translations(
//!     Value::from(serde_json::json!({
//!         "de": {"number": {"currency": {"format": {
//!             "unit": "€", "format": "%n %u", "separator": ",", "delimiter": "."
//!         }}}}
//!     }))
//!     .into_tree()
//!     .unwrap(),
//! );
//!
//! assert_eq!(to_currency(&i18n, 1234.5, &Options::new()), "$1,234.50");
//! i18n.set_locale("de");
//! assert_eq!(l(&i18n, "currency", 1234.5), "1.234,50 €");
//! ```

pub mod date;
pub mod localize;
pub mod number;
pub mod strftime;
pub mod template;

pub use date::{parse_date, DateInput, ParsedDate};
pub use localize::{l, localize, to_time, Localizable};
pub use number::{to_currency, to_human_size, to_number, to_percentage};
pub use strftime::{strftime, DateNames};
