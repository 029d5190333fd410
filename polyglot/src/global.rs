//! A process-wide shared translation context.
//!
//! The free functions here operate on one lazily created [`I18n`] guarded by
//! a read-write lock. Translations are read under a shared lock; setters take
//! the write lock. A lock poisoned by a panicking writer is recovered, since
//! every mutation leaves the context in a usable state.
//!
//! ```
//! use polyglot::global;
//! use polyglot::{Options, Value};
//!
//! global::store_translations(
//!     Value::from(serde_json::json!({"doc-global": {"hello": "Hi {{name}}"}}))
//!         .into_tree()
//!         .unwrap(),
//! );
//! let options = Options::new().with("locale", "doc-global").with("name", "Ana");
//! assert_eq!(global::t("hello", &options), Value::from("Hi Ana"));
//! ```

use std::sync::{OnceLock, PoisonError, RwLock};

use polyglot_core::{I18n, Options, PluralSource, Tree, Value};

/// The global translation context.
fn global_context() -> &'static RwLock<I18n> {
    static CONTEXT: OnceLock<RwLock<I18n>> = OnceLock::new();
    CONTEXT.get_or_init(|| RwLock::new(I18n::new()))
}

// ── Access ───────────────────────────────────────────────────────────────

/// Runs `f` with shared access to the global context.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&I18n) -> R,
{
    let context = global_context()
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    f(&context)
}

/// Runs `f` with exclusive access to the global context.
#[allow(clippy::significant_drop_tightening)]
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut I18n) -> R,
{
    let mut context = global_context()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut context)
}

// ── Translation API ──────────────────────────────────────────────────────

/// Translates `scope` with the global context. See [`I18n::translate`].
pub fn t(scope: &str, options: &Options) -> Value {
    with(|i18n| i18n.translate(scope, options))
}

/// Pluralizes a scope or mapping with the global context. See
/// [`I18n::pluralize`].
pub fn p<'a>(count: f64, source: impl Into<PluralSource<'a>>, options: &Options) -> Value {
    let source = source.into();
    with(|i18n| i18n.pluralize(count, source, options))
}

/// Resolves `scope` without interpolation. See [`I18n::lookup`].
pub fn lookup(scope: &str, options: &Options) -> Option<Value> {
    with(|i18n| i18n.lookup(scope, options))
}

/// Localizes `value` according to `scope` with the global context.
#[cfg(feature = "format")]
pub fn l(scope: &str, value: impl Into<polyglot_format::Localizable>) -> String {
    let value = value.into();
    with(|i18n| polyglot_format::localize(i18n, scope, value))
}

// ── Configuration API ────────────────────────────────────────────────────

/// Deep-merges a `locale -> tree` mapping into the global store.
pub fn store_translations(partial: Tree) {
    with_mut(|i18n| i18n.merge_translations(partial));
}

/// Sets the global current locale.
pub fn set_locale(locale: impl Into<String>) {
    let locale = locale.into();
    tracing::debug!(locale = %locale, "setting global locale");
    with_mut(|i18n| i18n.set_locale(locale));
}

/// Returns the global current locale.
pub fn locale() -> String {
    with(|i18n| i18n.current_locale().to_string())
}

/// Restores the global context to its defaults. Registered plural rules
/// are kept.
pub fn reset() {
    tracing::debug!("resetting global context");
    with_mut(I18n::reset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    // Tests share the global context; serialize the ones that change it.
    static LOCK: Mutex<()> = Mutex::new(());

    fn serial() -> std::sync::MutexGuard<'static, ()> {
        LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tree(v: serde_json::Value) -> Tree {
        Value::from(v).into_tree().unwrap()
    }

    #[test]
    fn test_store_and_translate() {
        let _guard = serial();
        reset();
        store_translations(tree(json!({"en": {"hello": "Hello {{name}}"}})));
        assert_eq!(
            t("hello", &Options::new().with("name", "Bo")),
            Value::from("Hello Bo")
        );
        assert_eq!(lookup("hello", &Options::new()), Some(Value::from("Hello {{name}}")));
    }

    #[test]
    fn test_set_locale_and_reset() {
        let _guard = serial();
        reset();
        store_translations(tree(json!({"pt-BR": {"hello": "Olá"}})));
        set_locale("pt-BR");
        assert_eq!(locale(), "pt-BR");
        assert_eq!(t("hello", &Options::new()), Value::from("Olá"));

        reset();
        assert_eq!(locale(), "en");
        assert_eq!(lookup("hello", &Options::new().with("locale", "pt-BR")), None);
    }

    #[test]
    fn test_pluralize() {
        let _guard = serial();
        reset();
        store_translations(tree(json!({"en": {"inbox": {"one": "one", "other": "{{count}} items"}}})));
        assert_eq!(p(1.0, "inbox", &Options::new()), Value::from("one"));
        assert_eq!(p(4.0, "inbox", &Options::new()), Value::from("4 items"));
    }

    #[test]
    fn test_with_mut_configures_context() {
        let _guard = serial();
        reset();
        with_mut(|i18n| i18n.set_separator("•"));
        store_translations(tree(json!({"en": {"a": {"b": "deep"}}})));
        assert_eq!(t("a•b", &Options::new()), Value::from("deep"));
        reset();
        assert_eq!(with(|i18n| i18n.separator().to_string()), ".");
    }

    #[test]
    fn test_localize() {
        let _guard = serial();
        reset();
        assert_eq!(l("currency", 1234.5), "$1,234.50");
    }
}
