//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `POLYGLOT_LOCALE` | `locale` |
//! | `POLYGLOT_DEFAULT_LOCALE` | `default_locale` |
//! | `POLYGLOT_SEPARATOR` | `separator` |
//! | `POLYGLOT_LOG_LEVEL` | `log_level` |
//! | `POLYGLOT_DEBUG` | `debug` |
//! | `POLYGLOT_TRANSLATIONS` | `translation_files` (comma-separated) |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use polyglot_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/i18n.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("config/i18n.json").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::{I18nError, I18nResult};
use crate::settings::Settings;

/// Loads settings from a TOML string. Missing fields keep their defaults.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> I18nResult<Settings> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| I18nError::Configuration(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> I18nResult<Settings> {
    from_toml_str(&read(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> I18nResult<Settings> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string. Missing fields keep their defaults.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> I18nResult<Settings> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| I18nError::Configuration(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> I18nResult<Settings> {
    from_json_str(&read(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> I18nResult<Settings> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a `.toml` or `.json` file, chosen by extension, with
/// environment overrides applied.
///
/// # Errors
///
/// Returns an error for unknown extensions, unreadable files, or malformed content.
pub fn from_file_with_env(path: impl AsRef<Path>) -> I18nResult<Settings> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => from_toml_file_with_env(path),
        Some("json") => from_json_file_with_env(path),
        _ => Err(I18nError::Configuration(format!(
            "Unsupported settings file '{}': expected .toml or .json",
            path.display()
        ))),
    }
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// - `POLYGLOT_LOCALE` -> `locale`
/// - `POLYGLOT_DEFAULT_LOCALE` -> `default_locale`
/// - `POLYGLOT_SEPARATOR` -> `separator`
/// - `POLYGLOT_LOG_LEVEL` -> `log_level`
/// - `POLYGLOT_DEBUG` -> `debug` (values: "true"/"1"/"yes" => true, anything else => false)
/// - `POLYGLOT_TRANSLATIONS` -> `translation_files` (comma-separated, replaces the list)
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("POLYGLOT_LOCALE") {
        settings.locale = val;
    }

    if let Ok(val) = std::env::var("POLYGLOT_DEFAULT_LOCALE") {
        settings.default_locale = val;
    }

    if let Ok(val) = std::env::var("POLYGLOT_SEPARATOR") {
        settings.separator = val;
    }

    if let Ok(val) = std::env::var("POLYGLOT_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("POLYGLOT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("POLYGLOT_TRANSLATIONS") {
        settings.translation_files = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
    }
}

// ============================================================
// Helpers
// ============================================================

fn read(path: &Path, kind: &str) -> I18nResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        I18nError::Configuration(format!(
            "Failed to read {kind} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(value: serde_json::Value, kind: &str) -> I18nResult<Settings> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        I18nError::Configuration(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        I18nError::Configuration(format!("Failed to deserialize settings from {kind}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges two JSON values. `override_val` takes precedence; arrays are replaced.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = match base_map.remove(&key) {
                    Some(base_v) => merge_json(base_v, override_v),
                    None => override_v,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
