//! The per-call options bag.
//!
//! Every public operation takes an [`Options`] value. Layers are combined
//! left-to-right with first-set-wins semantics: a key that already holds a
//! non-null value is never overwritten by a later layer. This is how
//! explicit call options take priority over locale configuration, which in
//! turn takes priority over hardcoded defaults.

use std::collections::BTreeMap;

use crate::value::{Tree, Value};

/// Option keys with a meaning to the resolution pipeline.
pub mod keys {
    /// Locale override for a single call.
    pub const LOCALE: &str = "locale";
    /// Prefix scope prepended to the looked-up key.
    pub const SCOPE: &str = "scope";
    /// Separator override for a single call.
    pub const SCOPE_SEPARATOR: &str = "scope_separator";
    /// Count used for pluralization and exposed as `{{count}}`.
    pub const COUNT: &str = "count";
    /// Value returned when a scope resolves to nothing.
    pub const DEFAULT_VALUE: &str = "defaultValue";
}

/// A string-keyed bag of option values.
///
/// # Examples
///
/// ```
/// use polyglot_core::options::Options;
///
/// let explicit = Options::new().with("name", "John Doe");
/// let defaults = Options::new().with("name", "Mary Doe").with("role", "user");
/// let merged = Options::prepare(&[&explicit, &defaults]);
/// assert_eq!(merged.get_str("name"), Some("John Doe"));
/// assert_eq!(merged.get_str("role"), Some("user"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: BTreeMap<String, Value>,
}

impl Options {
    /// Creates an empty options bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges several bags left-to-right, first-set-wins per key.
    pub fn prepare(layers: &[&Self]) -> Self {
        layers
            .iter()
            .fold(Self::new(), |acc, layer| acc.or_options(layer))
    }

    /// Builder-style insert that overwrites any existing value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Inserts or overwrites a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes a key and returns its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Fills unset keys from another bag.
    #[must_use]
    pub fn or_options(mut self, other: &Self) -> Self {
        for (key, value) in &other.values {
            self.fill(key, value);
        }
        self
    }

    /// Fills unset keys from a resolved translation value.
    ///
    /// Only tree values contribute; anything else (a string, an array,
    /// nothing at all) is a no-op layer.
    #[must_use]
    pub fn or_value(mut self, source: Option<&Value>) -> Self {
        if let Some(Value::Tree(tree)) = source {
            for (key, value) in tree {
                self.fill(key, value);
            }
        }
        self
    }

    fn fill(&mut self, key: &str, value: &Value) {
        if !self.is_set(key) {
            self.values.insert(key.to_string(), value.clone());
        }
    }

    /// Returns a value if it is present and not null.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    /// Returns `true` if the key holds a non-null value.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns a string option.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns a numeric option, parsing numeric strings.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::to_f64)
    }

    /// Returns a flag option; unset keys read as `false`.
    pub fn get_flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(Value::is_truthy)
    }

    /// The per-call locale override, if any.
    pub fn locale(&self) -> Option<&str> {
        self.get_str(keys::LOCALE)
    }

    /// The pluralization count, if any and numeric.
    pub fn count(&self) -> Option<f64> {
        self.get_f64(keys::COUNT)
    }

    /// The value to use when a scope is absent.
    pub fn default_value(&self) -> Option<&Value> {
        self.get(keys::DEFAULT_VALUE)
    }

    /// Iterates over all entries, including nulls.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Tree> for Options {
    fn from(values: Tree) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_set_wins() {
        let a = Options::new().with("x", 1);
        let b = Options::new().with("x", 2).with("y", 3);
        let merged = Options::prepare(&[&a, &b]);
        assert_eq!(merged.get_f64("x"), Some(1.0));
        assert_eq!(merged.get_f64("y"), Some(3.0));
    }

    #[test]
    fn test_null_counts_as_unset() {
        let a = Options::new().with("x", Value::Null);
        let b = Options::new().with("x", "filled");
        let merged = Options::prepare(&[&a, &b]);
        assert_eq!(merged.get_str("x"), Some("filled"));
        assert!(!a.is_set("x"));
        assert!(a.get("x").is_none());
    }

    #[test]
    fn test_or_value_ignores_non_trees() {
        let opts = Options::new()
            .or_value(Some(&Value::from("not a mapping")))
            .or_value(None)
            .or_value(Some(&Value::Array(vec![Value::from(1)])));
        assert!(opts.is_empty());
    }

    #[test]
    fn test_or_value_from_tree() {
        let cfg = Value::from(json!({"unit": "USD", "precision": 2}));
        let opts = Options::new().with("unit", "EUR").or_value(Some(&cfg));
        assert_eq!(opts.get_str("unit"), Some("EUR"));
        assert_eq!(opts.get_f64("precision"), Some(2.0));
    }

    #[test]
    fn test_typed_accessors() {
        let opts = Options::new()
            .with(keys::LOCALE, "pt-BR")
            .with(keys::COUNT, "3")
            .with("strip", true)
            .with(keys::DEFAULT_VALUE, "fallback");
        assert_eq!(opts.locale(), Some("pt-BR"));
        assert_eq!(opts.count(), Some(3.0));
        assert!(opts.get_flag("strip"));
        assert!(!opts.get_flag("missing"));
        assert_eq!(opts.default_value(), Some(&Value::from("fallback")));
    }

    #[test]
    fn test_non_numeric_count_is_ignored() {
        let opts = Options::new().with(keys::COUNT, "many");
        assert_eq!(opts.count(), None);
    }

    #[test]
    fn test_from_iterator() {
        let opts: Options = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(opts.len(), 2);
        assert_eq!(opts.iter().next().map(|(k, _)| k), Some("a"));
    }
}
