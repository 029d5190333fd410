//! Error types for polyglot.
//!
//! Absence is never an error here: a missing scope, locale, or placeholder
//! produces a marker string instead. [`I18nError`] covers the setup paths
//! that can genuinely fail: loading settings or translation documents and
//! compiling a custom placeholder pattern.

use thiserror::Error;

/// The primary error type for polyglot.
#[derive(Error, Debug)]
pub enum I18nError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A custom placeholder pattern failed to compile or has no capture group.
    #[error("Invalid placeholder pattern: {0}")]
    InvalidPattern(String),

    // ── Serialization ────────────────────────────────────────────────

    /// A translation or settings document could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl I18nError {
    /// Returns the process exit code the CLI uses for this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) | Self::InvalidPattern(_) => 2,
            Self::Serialization(_) | Self::Io(_) => 1,
        }
    }
}

impl From<serde_json::Error> for I18nError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("Invalid JSON: {err}"))
    }
}

impl From<toml::de::Error> for I18nError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(format!("Invalid TOML: {err}"))
    }
}

impl From<regex::Error> for I18nError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}

/// A convenience type alias for `Result<T, I18nError>`.
pub type I18nResult<T> = Result<T, I18nError>;
