//! Settings for a translation context.
//!
//! [`Settings`] holds everything needed to build an [`I18n`](crate::i18n::I18n)
//! and to configure logging. Every field has a default, so configuration files
//! only need to name what they change (see [`settings_loader`](crate::settings_loader)).

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::i18n::fallback::FallbackTable;
use crate::i18n::interpolate::DEFAULT_PLACEHOLDER;
use crate::i18n::{DEFAULT_LOCALE, DEFAULT_SEPARATOR};

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use polyglot_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.debug);
/// assert_eq!(settings.locale, "en");
/// assert_eq!(settings.separator, ".");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Locales ──────────────────────────────────────────────────────

    /// The current locale.
    pub locale: String,
    /// The default locale, probed when a locale has no fallback entry.
    pub default_locale: String,
    /// Per-locale fallback lists.
    pub fallbacks: FallbackTable,

    // ── Resolution ───────────────────────────────────────────────────

    /// The scope separator.
    pub separator: String,
    /// The placeholder regex. Capture group 1 must be the placeholder name.
    pub placeholder: String,

    // ── Translations ─────────────────────────────────────────────────

    /// Translation documents (`.json` or `.toml`) loaded at startup, in order.
    pub translation_files: Vec<PathBuf>,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter (e.g. "info", "polyglot_core=debug").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,

            locale: DEFAULT_LOCALE.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            fallbacks: FallbackTable::new(),

            separator: DEFAULT_SEPARATOR.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),

            translation_files: Vec::new(),

            log_level: "info".to_string(),

            extra: HashMap::new(),
        }
    }
}
