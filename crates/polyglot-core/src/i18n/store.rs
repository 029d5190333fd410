//! Translation store: one nested tree per locale.
//!
//! Translations are inserted by deep merge. For every key, two trees merge
//! recursively; any other pairing (arrays, strings, a tree replacing a
//! string or the reverse) replaces the old value wholesale. Arrays are never
//! merged element-wise.
//!
//! ## Document format
//!
//! ```json
//! {
//!   "en": {
//!     "hello": "Hello World!",
//!     "greetings": { "stranger": "Hello stranger!" },
//!     "inbox": { "one": "1 message", "other": "{{count}} messages" }
//!   },
//!   "pt-BR": { "hello": "Olá Mundo!" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{I18nError, I18nResult};
use crate::value::{Tree, Value};

/// The translation trees for every loaded locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationStore {
    locales: BTreeMap<String, Tree>,
}

/// Deep-merges `source` into `target`. Values from `source` win on leaves.
pub fn deep_merge(target: &mut Tree, source: Tree) {
    for (key, incoming) in source {
        match incoming {
            Value::Tree(incoming) => {
                if let Some(Value::Tree(existing)) = target.get_mut(&key) {
                    deep_merge(existing, incoming);
                } else {
                    target.insert(key, Value::Tree(incoming));
                }
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}

impl TranslationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration API ─────────────────────────────────────────────

    /// Merges a `{locale: tree}` mapping into the store.
    ///
    /// Top-level entries that are not trees cannot be a locale's translations
    /// and are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyglot_core::i18n::store::TranslationStore;
    /// use polyglot_core::value::Value;
    ///
    /// let mut store = TranslationStore::new();
    /// store.merge(Value::from(serde_json::json!({"en": {"eggs": "beans"}})).into_tree().unwrap());
    /// store.merge(Value::from(serde_json::json!({"en": {"ham": "spam"}})).into_tree().unwrap());
    /// assert_eq!(store.lookup("en", "eggs", ".").and_then(Value::as_str), Some("beans"));
    /// assert_eq!(store.lookup("en", "ham", ".").and_then(Value::as_str), Some("spam"));
    /// ```
    pub fn merge(&mut self, partial: Tree) {
        for (locale, value) in partial {
            match value {
                Value::Tree(tree) => self.merge_locale(&locale, tree),
                other => {
                    tracing::warn!(
                        locale = %locale,
                        kind = other.kind(),
                        "skipping non-mapping translations for locale"
                    );
                }
            }
        }
    }

    /// Merges a single locale's tree into the store.
    pub fn merge_locale(&mut self, locale: &str, tree: Tree) {
        tracing::debug!(locale, keys = tree.len(), "merging translations");
        let target = self.locales.entry(locale.to_string()).or_default();
        deep_merge(target, tree);
    }

    /// Parses a JSON `{locale: tree}` document and merges it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the JSON is invalid or its root is not an object.
    pub fn load_json(&mut self, json_str: &str) -> I18nResult<()> {
        let value: serde_json::Value = serde_json::from_str(json_str)?;
        self.merge(root_tree(Value::from(value))?);
        Ok(())
    }

    /// Parses a TOML `{locale: tree}` document and merges it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the TOML is invalid.
    pub fn load_toml(&mut self, toml_str: &str) -> I18nResult<()> {
        let value: Value = toml::from_str(toml_str)?;
        self.merge(root_tree(value)?);
        Ok(())
    }

    /// Loads a `.json` or `.toml` translation file.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read, has an unsupported
    /// extension, or does not parse.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> I18nResult<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let content = std::fs::read_to_string(path)?;
        match extension.as_deref() {
            Some("json") => self.load_json(&content),
            Some("toml") => self.load_toml(&content),
            _ => Err(I18nError::Configuration(format!(
                "Unsupported translation file '{}': expected .json or .toml",
                path.display()
            ))),
        }
    }

    // ── Lookup API ───────────────────────────────────────────────────

    /// Walks `path` through one locale's tree.
    ///
    /// Returns `None` when the locale is unknown, any segment is missing, a
    /// segment lands on a non-tree, or the final node is `Null`.
    pub fn lookup(&self, locale: &str, path: &str, separator: &str) -> Option<&Value> {
        let tree = self.locales.get(locale)?;
        let mut segments = split_scope(path, separator);
        let first = segments.next()?;
        let mut current = tree.get(first)?;
        for segment in segments {
            current = current.as_tree()?.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Returns the whole tree of a locale.
    pub fn locale_tree(&self, locale: &str) -> Option<&Tree> {
        self.locales.get(locale)
    }

    /// Returns `true` if translations are registered for the locale.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Returns all loaded locales in sorted order.
    pub fn locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }

    /// Returns every leaf scope of a locale, joined with `separator`.
    pub fn keys(&self, locale: &str, separator: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(tree) = self.locales.get(locale) {
            collect_leaves(tree, "", separator, &mut out);
        }
        out
    }

    /// Returns the leaf scopes present in `reference` but absent in `locale`.
    pub fn missing_keys(&self, reference: &str, locale: &str, separator: &str) -> Vec<String> {
        self.keys(reference, separator)
            .into_iter()
            .filter(|scope| self.lookup(locale, scope, separator).is_none())
            .collect()
    }

    /// Removes all translations for a locale.
    pub fn clear_locale(&mut self, locale: &str) {
        self.locales.remove(locale);
    }

    /// Removes every locale.
    pub fn clear(&mut self) {
        self.locales.clear();
    }

    /// Returns `true` if no locale has been loaded.
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

fn root_tree(value: Value) -> I18nResult<Tree> {
    value.into_tree().ok_or_else(|| {
        I18nError::Serialization("Translation document root must be a mapping".to_string())
    })
}

/// Splits a scope on a separator. An empty separator keeps the scope whole.
pub(crate) fn split_scope<'a>(
    scope: &'a str,
    separator: &'a str,
) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    if separator.is_empty() {
        Box::new(std::iter::once(scope))
    } else {
        Box::new(scope.split(separator))
    }
}

fn collect_leaves(tree: &Tree, prefix: &str, separator: &str, out: &mut Vec<String>) {
    for (key, value) in tree {
        let scope = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{separator}{key}")
        };
        match value {
            Value::Tree(child) => collect_leaves(child, &scope, separator, out),
            Value::Null => {}
            _ => out.push(scope),
        }
    }
}
