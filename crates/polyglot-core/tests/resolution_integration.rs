//! Integration tests for the resolution pipeline.
//!
//! Tests cover: single and nested scopes, locale options, default values,
//! custom separators, boolean leaves, fallback chains with tree merging,
//! translation storage semantics, and building a context from settings.

use polyglot_core::i18n::store::TranslationStore;
use polyglot_core::options::keys;
use polyglot_core::{settings_loader, I18n, Options, Tree, Value};
use serde_json::json;

fn tree(v: serde_json::Value) -> Tree {
    Value::from(v).into_tree().unwrap()
}

fn fixture() -> I18n {
    let mut i18n = I18n::new();
    i18n.merge_translations(tree(json!({
        "en": {
            "hello": "Hello World!",
            "greetings": {
                "stranger": "Hello stranger!",
                "name": "Hello {{name}}!"
            },
            "booleans": {"yes": true, "no": false},
            "inbox": {
                "one": "You have {{count}} message",
                "other": "You have {{count}} messages",
                "zero": "You have no messages"
            }
        },
        "pt-BR": {"hello": "Olá Mundo!"}
    })));
    i18n
}

// ═════════════════════════════════════════════════════════════════════
// 1. Translate
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_translation_for_single_scope() {
    assert_eq!(fixture().t("hello", &Options::new()), Value::from("Hello World!"));
}

#[test]
fn test_translation_as_tree() {
    let i18n = fixture();
    let expected = i18n.store().lookup("en", "greetings", ".").cloned();
    assert_eq!(Some(i18n.t("greetings", &Options::new())), expected);
}

#[test]
fn test_missing_message_for_invalid_scope() {
    assert_eq!(
        fixture().t("invalid.scope", &Options::new()),
        Value::from(r#"[missing "en.invalid.scope" translation]"#)
    );
}

#[test]
fn test_translation_on_custom_locale() {
    let mut i18n = fixture();
    i18n.set_locale("pt-BR");
    assert_eq!(i18n.t("hello", &Options::new()), Value::from("Olá Mundo!"));
}

#[test]
fn test_translation_for_multiple_scopes() {
    assert_eq!(
        fixture().t("greetings.stranger", &Options::new()),
        Value::from("Hello stranger!")
    );
}

#[test]
fn test_translation_with_locale_option() {
    let i18n = fixture();
    assert_eq!(
        i18n.t("hello", &Options::new().with(keys::LOCALE, "en")),
        Value::from("Hello World!")
    );
    assert_eq!(
        i18n.t("hello", &Options::new().with(keys::LOCALE, "pt-BR")),
        Value::from("Olá Mundo!")
    );
}

#[test]
fn test_default_value_for_simple_translation() {
    let opts = Options::new().with(keys::DEFAULT_VALUE, "Warning!");
    assert_eq!(fixture().t("warning", &opts), Value::from("Warning!"));
}

#[test]
fn test_default_value_for_unknown_locale() {
    let mut i18n = fixture();
    i18n.set_locale("fr");
    let opts = Options::new().with(keys::DEFAULT_VALUE, "Warning!");
    assert_eq!(i18n.t("warning", &opts), Value::from("Warning!"));
}

#[test]
fn test_default_value_with_interpolation() {
    let opts = Options::new()
        .with(keys::DEFAULT_VALUE, "Attention! {{message}}")
        .with("message", "You're out of quota!");
    assert_eq!(
        fixture().t("alert", &opts),
        Value::from("Attention! You're out of quota!")
    );
}

#[test]
fn test_default_value_ignored_when_scope_exists() {
    let opts = Options::new().with(keys::DEFAULT_VALUE, "What's up?");
    assert_eq!(fixture().t("hello", &opts), Value::from("Hello World!"));
}

#[test]
fn test_custom_scope_separator() {
    let mut i18n = fixture();
    i18n.set_separator("•");
    assert_eq!(
        i18n.t("greetings•stranger", &Options::new()),
        Value::from("Hello stranger!")
    );
}

#[test]
fn test_boolean_values() {
    let i18n = fixture();
    assert_eq!(i18n.t("booleans.yes", &Options::new()), Value::Bool(true));
    assert_eq!(i18n.t("booleans.no", &Options::new()), Value::Bool(false));
}

#[test]
fn test_missing_placeholder_marker() {
    assert_eq!(
        fixture().t("greetings.name", &Options::new()),
        Value::from("Hello [missing {{name}} value]!")
    );
}

#[test]
fn test_count_selects_plural_form() {
    let i18n = fixture();
    for (count, expected) in [
        (0, "You have no messages"),
        (1, "You have 1 message"),
        (2, "You have 2 messages"),
    ] {
        let opts = Options::new().with(keys::COUNT, count);
        assert_eq!(i18n.t("inbox", &opts), Value::from(expected));
    }
}

// ═════════════════════════════════════════════════════════════════════
// 2. Fallbacks
// ═════════════════════════════════════════════════════════════════════

fn with_fallbacks() -> I18n {
    let mut i18n = fixture();
    i18n.set_locale("primary");
    i18n.fallbacks_mut().insert(
        "primary".to_string(),
        vec!["secondary".to_string(), "tertiary".to_string()],
    );
    i18n
}

#[test]
fn test_locale_fallbacks() {
    let mut i18n = with_fallbacks();
    i18n.merge_translations(tree(json!({"secondary": {"eggs": "beans"}})));
    assert_eq!(i18n.t("eggs", &Options::new()), Value::from("beans"));
}

#[test]
fn test_first_fallback_is_used() {
    let mut i18n = with_fallbacks();
    i18n.merge_translations(tree(json!({
        "secondary": {"eggs": "are tasty"},
        "tertiary": {"eggs": "are repugnant"}
    })));
    assert_eq!(i18n.t("eggs", &Options::new()), Value::from("are tasty"));
}

#[test]
fn test_unfound_translations_merge_with_later_fallbacks() {
    let mut i18n = with_fallbacks();
    i18n.merge_translations(tree(json!({
        "secondary": {"eggs": {"colour": "white"}},
        "tertiary": {"eggs": {"coolness": 11, "colour": "blackness"}}
    })));
    assert_eq!(
        i18n.t("eggs", &Options::new()),
        Value::from(json!({"coolness": 11, "colour": "white"}))
    );
}

#[test]
fn test_table_entry_excludes_default_locale() {
    let i18n = with_fallbacks();
    assert_eq!(
        i18n.locale_chain("primary"),
        vec!["primary", "secondary", "tertiary"]
    );
    // "hello" only exists in the default locale, which is not in the chain.
    assert_eq!(
        i18n.t("hello", &Options::new()),
        Value::from(r#"[missing "primary.hello" translation]"#)
    );
}

#[test]
fn test_unlisted_locale_falls_back_to_default() {
    let mut i18n = fixture();
    i18n.set_locale("de");
    assert_eq!(i18n.locale_chain("de"), vec!["de", "en"]);
    assert_eq!(i18n.t("hello", &Options::new()), Value::from("Hello World!"));
}

// ═════════════════════════════════════════════════════════════════════
// 3. Storing translations
// ═════════════════════════════════════════════════════════════════════

fn stored() -> TranslationStore {
    let mut store = TranslationStore::new();
    store.merge(tree(json!({
        "en": {"eggs": "beans", "tea": {"country": "Japan", "colour": "green"}}
    })));
    store
}

#[test]
fn test_store_adds_translations() {
    let mut store = TranslationStore::new();
    store.merge(tree(json!({"en": {"eggs": "beans"}})));
    assert_eq!(store.locale_tree("en"), Some(&tree(json!({"eggs": "beans"}))));
}

#[test]
fn test_store_merges_additional_translations() {
    let mut store = stored();
    store.merge(tree(json!({
        "de": {"lemon": "cheese"},
        "en": {"eggs": "bacon", "tea": {"country": "India"}}
    })));

    assert_eq!(store.locale_tree("de"), Some(&tree(json!({"lemon": "cheese"}))));
    assert_eq!(
        store.locale_tree("en"),
        Some(&tree(json!({
            "eggs": "bacon",
            "tea": {"country": "India", "colour": "green"}
        })))
    );
}

#[test]
fn test_store_replaces_arrays() {
    let mut store = stored();
    store.merge(tree(json!({"de": {"bottles": ["99", "98", "97"]}})));
    store.merge(tree(json!({"de": {"bottles": ["0"]}})));
    assert_eq!(
        store.lookup("de", "bottles", "."),
        Some(&Value::from(json!(["0"])))
    );
}

#[test]
fn test_store_replaces_strings() {
    let mut store = stored();
    store.merge(tree(json!({"de": {"cake": "chocolate"}})));
    store.merge(tree(json!({"de": {"cake": "fairy"}})));
    assert_eq!(store.lookup("de", "cake", "."), Some(&Value::from("fairy")));
}

// ═════════════════════════════════════════════════════════════════════
// 4. Context from settings
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_context_from_toml_settings() {
    let dir = tempfile::tempdir().unwrap();
    let en = dir.path().join("en.toml");
    std::fs::write(
        &en,
        "[en.greetings]\nstranger = \"Hello stranger!\"\n[pt.greetings]\nstranger = \"Olá estranho!\"\n",
    )
    .unwrap();

    let config = format!(
        "locale = \"pt-BR\"\ntranslation_files = [{:?}]\n\n[fallbacks]\n\"pt-BR\" = [\"pt\", \"en\"]\n",
        en.display().to_string()
    );
    let settings = settings_loader::from_toml_str(&config).unwrap();
    let i18n = I18n::from_settings(&settings).unwrap();

    assert_eq!(i18n.locale_chain("pt-BR"), vec!["pt-BR", "pt", "en"]);
    assert_eq!(
        i18n.t("greetings.stranger", &Options::new()),
        Value::from("Olá estranho!")
    );
}

#[test]
fn test_context_from_settings_missing_file() {
    let settings = settings_loader::from_json_str(
        r#"{"translation_files": ["/nonexistent/locales/en.json"]}"#,
    )
    .unwrap();
    assert!(I18n::from_settings(&settings).is_err());
}
