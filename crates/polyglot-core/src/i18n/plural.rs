//! Pluralization rules.
//!
//! A rule maps an absolute count to an ordered list of candidate
//! [`PluralCategory`] keys. The first candidate present in a translation
//! mapping wins. The built-in default detects `zero`, `one`, and `other`:
//!
//! | Count | Candidates |
//! |-------|------------|
//! | 0     | `zero`, `other` |
//! | 1     | `one` |
//! | other | `other` |

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{Tree, Value};

/// CLDR plural category names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// The translation key for this category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pluralization rule. Receives `abs(count)`.
pub type PluralRule = Arc<dyn Fn(f64) -> Vec<PluralCategory> + Send + Sync>;

/// The built-in rule.
pub fn default_rule(count: f64) -> Vec<PluralCategory> {
    if count == 0.0 {
        vec![PluralCategory::Zero, PluralCategory::Other]
    } else if (count - 1.0).abs() < f64::EPSILON {
        vec![PluralCategory::One]
    } else {
        vec![PluralCategory::Other]
    }
}

/// Locale-specific pluralization rules with a default.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use polyglot_core::i18n::plural::{PluralCategory, PluralRules};
///
/// let mut rules = PluralRules::new();
/// rules.register("fr", Arc::new(|n: f64| {
///     if n < 2.0 { vec![PluralCategory::One] } else { vec![PluralCategory::Other] }
/// }));
///
/// assert_eq!(rules.categories("fr", "en", 0.0), vec![PluralCategory::One]);
/// assert_eq!(
///     rules.categories("de", "en", 0.0),
///     vec![PluralCategory::Zero, PluralCategory::Other]
/// );
/// ```
#[derive(Clone)]
pub struct PluralRules {
    rules: HashMap<String, PluralRule>,
    default: PluralRule,
}

impl Default for PluralRules {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PluralRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locales: Vec<&String> = self.rules.keys().collect();
        locales.sort_unstable();
        f.debug_struct("PluralRules")
            .field("locales", &locales)
            .finish_non_exhaustive()
    }
}

impl PluralRules {
    /// Creates a registry holding only the default rule.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            default: Arc::new(default_rule),
        }
    }

    /// Registers or replaces the rule for a locale.
    pub fn register(&mut self, locale: impl Into<String>, rule: PluralRule) {
        self.rules.insert(locale.into(), rule);
    }

    /// Replaces the rule used when no locale-specific rule matches.
    pub fn set_default(&mut self, rule: PluralRule) {
        self.default = rule;
    }

    /// Removes a locale's rule.
    pub fn unregister(&mut self, locale: &str) {
        self.rules.remove(locale);
    }

    /// Returns the rule for `locale`, else for `current`, else the default.
    pub fn get(&self, locale: &str, current: &str) -> &PluralRule {
        self.rules
            .get(locale)
            .or_else(|| self.rules.get(current))
            .unwrap_or(&self.default)
    }

    /// Candidate categories for `count`, most specific first.
    pub fn categories(&self, locale: &str, current: &str, count: f64) -> Vec<PluralCategory> {
        (self.get(locale, current))(count.abs())
    }

    /// Picks the first candidate category present in `translations`.
    pub fn select<'a>(
        &self,
        locale: &str,
        current: &str,
        count: f64,
        translations: &'a Tree,
    ) -> Option<&'a Value> {
        select_from(&self.categories(locale, current, count), translations)
    }
}

/// Returns the first category in `candidates` with a non-null entry.
pub fn select_from<'a>(candidates: &[PluralCategory], translations: &'a Tree) -> Option<&'a Value> {
    candidates
        .iter()
        .find_map(|category| translations.get(category.as_str()).filter(|v| !v.is_null()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(v: serde_json::Value) -> Tree {
        Value::from(v).into_tree().unwrap()
    }

    #[test]
    fn test_default_rule() {
        assert_eq!(default_rule(0.0), vec![PluralCategory::Zero, PluralCategory::Other]);
        assert_eq!(default_rule(1.0), vec![PluralCategory::One]);
        assert_eq!(default_rule(2.0), vec![PluralCategory::Other]);
        assert_eq!(default_rule(1.5), vec![PluralCategory::Other]);
    }

    #[test]
    fn test_negative_counts_use_abs() {
        let rules = PluralRules::new();
        assert_eq!(rules.categories("en", "en", -1.0), vec![PluralCategory::One]);
        assert_eq!(rules.categories("en", "en", -5.0), vec![PluralCategory::Other]);
    }

    #[test]
    fn test_rule_lookup_order() {
        let mut rules = PluralRules::new();
        rules.register("ru", Arc::new(|_| vec![PluralCategory::Few]));
        rules.register("en", Arc::new(|_| vec![PluralCategory::Many]));

        assert_eq!(rules.categories("ru", "en", 3.0), vec![PluralCategory::Few]);
        assert_eq!(rules.categories("de", "en", 3.0), vec![PluralCategory::Many]);
        assert_eq!(rules.categories("de", "fr", 3.0), vec![PluralCategory::Other]);

        rules.unregister("ru");
        assert_eq!(rules.categories("ru", "en", 3.0), vec![PluralCategory::Many]);
    }

    #[test]
    fn test_select_zero_falls_back_to_other() {
        let rules = PluralRules::new();
        let inbox = tree(json!({"one": "1 message", "other": "{{count}} messages"}));
        assert_eq!(
            rules.select("en", "en", 0.0, &inbox),
            Some(&Value::from("{{count}} messages"))
        );
        let with_zero = tree(json!({"zero": "none", "one": "one", "other": "many"}));
        assert_eq!(rules.select("en", "en", 0.0, &with_zero), Some(&Value::from("none")));
    }

    #[test]
    fn test_select_absent_category() {
        let rules = PluralRules::new();
        let only_other = tree(json!({"other": "many"}));
        assert_eq!(rules.select("en", "en", 1.0, &only_other), None);
        let null_one = tree(json!({"one": null}));
        assert_eq!(rules.select("en", "en", 1.0, &null_one), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(PluralCategory::Few.to_string(), "few");
        assert_eq!(PluralCategory::Other.as_str(), "other");
    }
}
