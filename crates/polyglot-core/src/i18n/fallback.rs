//! Locale fallback chains and cross-locale resolution.
//!
//! # Invariants
//!
//! 1. **Chain order**: the requested locale always comes first and no locale
//!    is probed twice.
//! 2. **Terminal values stop the walk**: the first non-tree value found is
//!    returned as-is, without consulting later locales.
//! 3. **Trees fill gaps**: tree results from later locales only contribute
//!    keys that no earlier locale provided.

use std::collections::BTreeMap;

use super::store::TranslationStore;
use crate::value::{Tree, Value};

/// Per-locale fallback lists, e.g. `{"pt-BR": ["pt", "en"]}`.
pub type FallbackTable = BTreeMap<String, Vec<String>>;

/// Builds the ordered list of locales to probe for `requested`.
///
/// Uses the table entry for `requested` if present, otherwise falls back to
/// the default locale alone.
///
/// # Examples
///
/// ```
/// use polyglot_core::i18n::fallback::{locale_chain, FallbackTable};
///
/// let mut table = FallbackTable::new();
/// table.insert("primary".into(), vec!["secondary".into(), "primary".into()]);
///
/// assert_eq!(locale_chain("primary", &table, "en"), vec!["primary", "secondary"]);
/// assert_eq!(locale_chain("fr", &table, "en"), vec!["fr", "en"]);
/// assert_eq!(locale_chain("en", &table, "en"), vec!["en"]);
/// ```
pub fn locale_chain(requested: &str, fallbacks: &FallbackTable, default_locale: &str) -> Vec<String> {
    let tail: Vec<&str> = fallbacks.get(requested).map_or_else(
        || vec![default_locale],
        |list| list.iter().map(String::as_str).collect(),
    );

    let mut chain: Vec<String> = Vec::with_capacity(tail.len() + 1);
    for locale in std::iter::once(requested).chain(tail) {
        if !chain.iter().any(|seen| seen == locale) {
            chain.push(locale.to_string());
        }
    }
    chain
}

/// Resolves `scope` across `chain`.
///
/// Returns `None` only if no locale in the chain has anything at `scope`.
pub fn resolve(
    store: &TranslationStore,
    chain: &[String],
    scope: &str,
    separator: &str,
) -> Option<Value> {
    let mut accumulated: Option<Tree> = None;

    for locale in chain {
        match store.lookup(locale, scope, separator) {
            Some(Value::Tree(found)) => {
                tracing::trace!(locale = %locale, scope, keys = found.len(), "partial tree");
                let mut merged = found.clone();
                if let Some(higher) = accumulated.take() {
                    merged.extend(higher);
                }
                accumulated = Some(merged);
            }
            Some(terminal) => {
                tracing::trace!(locale = %locale, scope, kind = terminal.kind(), "terminal value");
                return Some(terminal.clone());
            }
            None => {
                tracing::trace!(locale = %locale, scope, "absent");
            }
        }
    }

    accumulated.map(Value::Tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(v: serde_json::Value) -> TranslationStore {
        let mut store = TranslationStore::new();
        store.merge(Value::from(v).into_tree().unwrap());
        store
    }

    fn chain(locales: &[&str]) -> Vec<String> {
        locales.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_chain_uses_table_without_default() {
        let mut table = FallbackTable::new();
        table.insert("primary".into(), vec!["secondary".into(), "tertiary".into()]);
        assert_eq!(
            locale_chain("primary", &table, "en"),
            vec!["primary", "secondary", "tertiary"]
        );
    }

    #[test]
    fn test_chain_dedups_preserving_first_occurrence() {
        let mut table = FallbackTable::new();
        table.insert("a".into(), vec!["b".into(), "a".into(), "c".into(), "b".into()]);
        assert_eq!(locale_chain("a", &table, "en"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_first_fallback_wins_for_terminals() {
        let s = store(json!({
            "secondary": {"eggs": "are tasty"},
            "tertiary": {"eggs": "are repugnant"}
        }));
        let result = resolve(&s, &chain(&["primary", "secondary", "tertiary"]), "eggs", ".");
        assert_eq!(result, Some(Value::from("are tasty")));
    }

    #[test]
    fn test_trees_merge_primary_wins() {
        let s = store(json!({
            "secondary": {"eggs": {"colour": "white"}},
            "tertiary": {"eggs": {"coolness": 11, "colour": "blackness"}}
        }));
        let result = resolve(&s, &chain(&["primary", "secondary", "tertiary"]), "eggs", ".");
        assert_eq!(result, Some(Value::from(json!({"coolness": 11, "colour": "white"}))));
    }

    #[test]
    fn test_terminal_after_tree_discards_accumulator() {
        let s = store(json!({
            "a": {"eggs": {"colour": "white"}},
            "b": {"eggs": "scrambled"}
        }));
        let result = resolve(&s, &chain(&["a", "b"]), "eggs", ".");
        assert_eq!(result, Some(Value::from("scrambled")));
    }

    #[test]
    fn test_exhausted_chain_is_absent() {
        let s = store(json!({"en": {"hello": "Hello"}}));
        assert_eq!(resolve(&s, &chain(&["fr", "en"]), "missing", "."), None);
    }

    #[test]
    fn test_later_locales_not_consulted_after_terminal() {
        let s = store(json!({
            "a": {"flag": false},
            "b": {"flag": {"nested": true}}
        }));
        let result = resolve(&s, &chain(&["a", "b"]), "flag", ".");
        assert_eq!(result, Some(Value::Bool(false)));
    }
}
