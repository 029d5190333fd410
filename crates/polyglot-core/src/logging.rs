//! Logging integration.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-lookup spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug",
/// "polyglot_core=trace"). In debug mode a pretty, human-readable format is
/// used; otherwise a structured JSON format. Installing twice is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for resolving one scope.
///
/// # Examples
///
/// ```
/// use polyglot_core::logging::lookup_span;
///
/// let span = lookup_span("greetings.hello", "pt-BR");
/// let _guard = span.enter();
/// tracing::debug!("resolving");
/// ```
pub fn lookup_span(scope: &str, locale: &str) -> tracing::Span {
    tracing::debug_span!("lookup", scope, locale)
}
