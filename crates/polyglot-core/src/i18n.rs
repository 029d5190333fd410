//! The translation context.
//!
//! [`I18n`] owns the translation store together with the configuration that
//! drives resolution: current and default locale, fallback table, scope
//! separator, placeholder pattern, and pluralization rules. Every operation
//! reads from an explicit `&I18n`, so independent instances never interfere.
//!
//! ## Quick Start
//!
//! ```
//! use polyglot_core::i18n::I18n;
//! use polyglot_core::options::Options;
//! use polyglot_core::value::Value;
//!
//! let mut i18n = I18n::new();
//! i18n.merge_translations(
//!     Value::from(serde_json::json!({
//!         "en": {
//!             "hello": "Hello {{name}}!",
//!             "inbox": {"one": "1 message", "other": "{{count}} messages"}
//!         },
//!         "pt-BR": {"hello": "Olá {{name}}!"}
//!     }))
//!     .into_tree()
//!     .unwrap(),
//! );
//!
//! let opts = Options::new().with("name", "Ana");
//! assert_eq!(i18n.t("hello", &opts).to_string(), "Hello Ana!");
//!
//! i18n.set_locale("pt-BR");
//! assert_eq!(i18n.t("hello", &opts).to_string(), "Olá Ana!");
//! assert_eq!(i18n.p(3.0, "inbox", &Options::new()).to_string(), "3 messages");
//! assert_eq!(
//!     i18n.t("missing", &Options::new()).to_string(),
//!     r#"[missing "pt-BR.missing" translation]"#
//! );
//! ```

pub mod fallback;
pub mod interpolate;
pub mod plural;
pub mod store;

use std::borrow::Cow;

use regex::Regex;

use crate::error::I18nResult;
use crate::logging;
use crate::options::{keys, Options};
use crate::settings::Settings;
use crate::value::{Tree, Value};

use self::fallback::FallbackTable;
use self::plural::{PluralCategory, PluralRules};
use self::store::TranslationStore;

/// The default locale and initial current locale.
pub const DEFAULT_LOCALE: &str = "en";

/// The default scope separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// What [`I18n::pluralize`] should pluralize.
#[derive(Debug, Clone, Copy)]
pub enum PluralSource<'a> {
    /// A scope to resolve first.
    Scope(&'a str),
    /// An already-resolved mapping of categories to messages.
    Tree(&'a Tree),
}

impl<'a> From<&'a str> for PluralSource<'a> {
    fn from(scope: &'a str) -> Self {
        Self::Scope(scope)
    }
}

impl<'a> From<&'a Tree> for PluralSource<'a> {
    fn from(tree: &'a Tree) -> Self {
        Self::Tree(tree)
    }
}

/// A self-contained translation context.
#[derive(Debug, Clone)]
pub struct I18n {
    store: TranslationStore,
    locale: String,
    default_locale: String,
    separator: String,
    placeholder: Regex,
    fallbacks: FallbackTable,
    pluralization: PluralRules,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl I18n {
    /// Creates an empty context with `en` as current and default locale.
    pub fn new() -> Self {
        Self {
            store: TranslationStore::new(),
            locale: DEFAULT_LOCALE.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            placeholder: interpolate::default_placeholder().clone(),
            fallbacks: FallbackTable::new(),
            pluralization: PluralRules::new(),
        }
    }

    /// Builds a context from settings, loading every configured translation file.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the placeholder pattern is invalid or a translation
    /// file cannot be loaded.
    pub fn from_settings(settings: &Settings) -> I18nResult<Self> {
        let mut i18n = Self::new();
        i18n.set_locale(&settings.locale);
        i18n.set_default_locale(&settings.default_locale);
        i18n.set_separator(&settings.separator);
        i18n.set_placeholder(&settings.placeholder)?;
        i18n.set_fallbacks(settings.fallbacks.clone());
        for path in &settings.translation_files {
            tracing::debug!(path = %path.display(), "loading translation file");
            i18n.store.load_file(path)?;
        }
        Ok(i18n)
    }

    /// Restores default configuration and drops all translations.
    ///
    /// Registered pluralization rules are kept.
    pub fn reset(&mut self) {
        self.store.clear();
        self.locale = DEFAULT_LOCALE.to_string();
        self.default_locale = DEFAULT_LOCALE.to_string();
        self.separator = DEFAULT_SEPARATOR.to_string();
        self.placeholder = interpolate::default_placeholder().clone();
        self.fallbacks.clear();
    }

    // ── Configuration ────────────────────────────────────────────────

    /// The configured current locale (may be empty).
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Sets the current locale.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The default locale, used as the fallback for locales with no table entry.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Sets the default locale.
    pub fn set_default_locale(&mut self, locale: impl Into<String>) {
        self.default_locale = locale.into();
    }

    /// The current locale, or the default locale if none is set.
    pub fn current_locale(&self) -> &str {
        if self.locale.is_empty() {
            &self.default_locale
        } else {
            &self.locale
        }
    }

    /// The scope separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Sets the scope separator.
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
    }

    /// The compiled placeholder pattern.
    pub const fn placeholder(&self) -> &Regex {
        &self.placeholder
    }

    /// Replaces the placeholder pattern. Capture group 1 must be the name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the pattern is invalid; the current pattern is kept.
    pub fn set_placeholder(&mut self, pattern: &str) -> I18nResult<()> {
        self.placeholder = interpolate::compile_placeholder(pattern)?;
        Ok(())
    }

    /// The fallback table.
    pub const fn fallbacks(&self) -> &FallbackTable {
        &self.fallbacks
    }

    /// Mutable access to the fallback table.
    pub fn fallbacks_mut(&mut self) -> &mut FallbackTable {
        &mut self.fallbacks
    }

    /// Replaces the fallback table.
    pub fn set_fallbacks(&mut self, fallbacks: FallbackTable) {
        self.fallbacks = fallbacks;
    }

    /// The pluralization rules.
    pub const fn pluralization(&self) -> &PluralRules {
        &self.pluralization
    }

    /// Mutable access to the pluralization rules.
    pub fn pluralization_mut(&mut self) -> &mut PluralRules {
        &mut self.pluralization
    }

    /// The translation store.
    pub const fn store(&self) -> &TranslationStore {
        &self.store
    }

    /// Mutable access to the translation store.
    pub fn store_mut(&mut self) -> &mut TranslationStore {
        &mut self.store
    }

    /// Deep-merges a `{locale: tree}` mapping into the store.
    pub fn merge_translations(&mut self, partial: Tree) {
        self.store.merge(partial);
    }

    // ── Resolution ───────────────────────────────────────────────────

    /// The locale a call resolves against: the `locale` option, else the
    /// current locale. An empty `locale` option counts as unset.
    pub fn effective_locale<'a>(&'a self, options: &'a Options) -> &'a str {
        options
            .locale()
            .filter(|locale| !locale.is_empty())
            .unwrap_or_else(|| self.current_locale())
    }

    fn effective_separator<'a>(&'a self, options: &'a Options) -> &'a str {
        options
            .get_str(keys::SCOPE_SEPARATOR)
            .unwrap_or(&self.separator)
    }

    /// Applies the `scope` option prefix to `key`.
    fn effective_scope<'a>(&self, key: &'a str, options: &Options) -> Cow<'a, str> {
        let separator = self.effective_separator(options);
        let prefix = match options.get(keys::SCOPE) {
            Some(Value::String(prefix)) if !prefix.is_empty() => prefix.clone(),
            Some(Value::Array(parts)) => parts
                .iter()
                .filter(|p| !p.is_null())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(separator),
            _ => return Cow::Borrowed(key),
        };
        if prefix.is_empty() {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(format!("{prefix}{separator}{key}"))
        }
    }

    /// The ordered locales probed for `requested`.
    pub fn locale_chain(&self, requested: &str) -> Vec<String> {
        fallback::locale_chain(requested, &self.fallbacks, &self.default_locale)
    }

    /// Resolves `scope` across the fallback chain without interpolation.
    ///
    /// Falls back to the `defaultValue` option, returned unchanged, when
    /// nothing is found. `None` means absent.
    pub fn lookup(&self, scope: &str, options: &Options) -> Option<Value> {
        let locale = self.effective_locale(options);
        let separator = self.effective_separator(options);
        let scope = self.effective_scope(scope, options);
        let chain = self.locale_chain(locale);
        tracing::debug!(scope = %scope, chain = ?chain, "resolving scope");

        fallback::resolve(&self.store, &chain, &scope, separator)
            .or_else(|| options.default_value().cloned())
    }

    /// Translates `scope`.
    ///
    /// Strings are interpolated; mappings are pluralized when a numeric
    /// `count` option is given; other values are returned as found. A scope
    /// that resolves to nothing yields the missing-translation marker.
    pub fn translate(&self, scope: &str, options: &Options) -> Value {
        let span = logging::lookup_span(scope, self.effective_locale(options));
        let _guard = span.enter();

        match self.lookup(scope, options) {
            None => Value::String(self.missing_translation(scope, options)),
            Some(Value::String(message)) => Value::String(self.interpolate(&message, options)),
            Some(Value::Tree(tree)) => match options.count() {
                Some(count) => self.pluralize_tree(count, &tree, Some(scope), options),
                None => Value::Tree(tree),
            },
            Some(other) => other,
        }
    }

    /// Alias for [`translate`](Self::translate).
    pub fn t(&self, scope: &str, options: &Options) -> Value {
        self.translate(scope, options)
    }

    /// Pluralizes a scope or mapping by `count`, then interpolates.
    ///
    /// `count` is exposed to the message as the `count` placeholder.
    pub fn pluralize<'a>(
        &self,
        count: f64,
        source: impl Into<PluralSource<'a>>,
        options: &Options,
    ) -> Value {
        match source.into() {
            PluralSource::Tree(tree) => self.pluralize_tree(count, tree, None, options),
            PluralSource::Scope(scope) => match self.lookup(scope, options) {
                None => Value::String(self.missing_translation(scope, options)),
                Some(Value::Tree(tree)) => self.pluralize_tree(count, &tree, Some(scope), options),
                Some(Value::String(message)) => {
                    Value::String(self.interpolate(&message, &with_count(options, count)))
                }
                Some(other) => other,
            },
        }
    }

    /// Alias for [`pluralize`](Self::pluralize).
    pub fn p<'a>(&self, count: f64, source: impl Into<PluralSource<'a>>, options: &Options) -> Value {
        self.pluralize(count, source, options)
    }

    fn pluralize_tree(
        &self,
        count: f64,
        tree: &Tree,
        scope: Option<&str>,
        options: &Options,
    ) -> Value {
        let locale = self.effective_locale(options);
        let candidates = self
            .pluralization
            .categories(locale, self.current_locale(), count);

        let Some(message) = plural::select_from(&candidates, tree) else {
            let category = candidates.first().map_or("other", |c| PluralCategory::as_str(*c));
            let missing = scope.map_or_else(
                || category.to_string(),
                |scope| format!("{scope}{}{category}", self.effective_separator(options)),
            );
            return Value::String(self.missing_translation(&missing, options));
        };

        match message {
            Value::String(message) => {
                Value::String(self.interpolate(message, &with_count(options, count)))
            }
            other => other.clone(),
        }
    }

    /// Interpolates placeholders in `message` from `options`.
    pub fn interpolate(&self, message: &str, options: &Options) -> String {
        interpolate::interpolate(&self.placeholder, message, options)
    }

    /// The marker returned for a scope that resolves to nothing.
    pub fn missing_translation(&self, scope: &str, options: &Options) -> String {
        let locale = self.effective_locale(options);
        let scope = self.effective_scope(scope, options);
        tracing::debug!(locale, scope = %scope, "missing translation");
        format!("[missing \"{locale}.{scope}\" translation]")
    }
}

fn with_count(options: &Options, count: f64) -> Options {
    options.clone().with(keys::COUNT, count)
}
