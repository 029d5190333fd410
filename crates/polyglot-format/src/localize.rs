//! Scope-driven localization of numbers and dates.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use polyglot_core::value::format_number;
use polyglot_core::{I18n, Options, Value};

use crate::date::{parse_date, DateInput, ParsedDate};
use crate::number::{to_currency, to_number, to_percentage};
use crate::strftime::strftime;

/// A value handed to [`localize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Localizable {
    /// A number (a millisecond timestamp for date scopes).
    Number(f64),
    /// A date in any accepted form.
    Date(DateInput),
    /// Free text; parsed when the scope needs a number or a date.
    Text(String),
}

impl From<f64> for Localizable {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Localizable {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Localizable {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Localizable {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Localizable {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateInput> for Localizable {
    fn from(date: DateInput) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<FixedOffset>> for Localizable {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::Date(dt.into())
    }
}

impl From<DateTime<Utc>> for Localizable {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(dt.into())
    }
}

impl From<NaiveDateTime> for Localizable {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Date(dt.into())
    }
}

impl From<Value> for Localizable {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }
}

impl Localizable {
    fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Date(_) => None,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn date_input(&self) -> DateInput {
        match self {
            // NaN and infinities name no instant.
            Self::Number(ms) if !ms.is_finite() => DateInput::Text(String::new()),
            Self::Number(ms) => DateInput::Timestamp(*ms as i64),
            Self::Date(date) => date.clone(),
            Self::Text(s) => DateInput::Text(s.clone()),
        }
    }

    fn display(&self) -> String {
        match self {
            Self::Number(n) => format_number(*n),
            Self::Date(date) => parse_date(date.clone()).to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Parses `input` and formats it with the string translated at `scope`.
///
/// Invalid input renders `Invalid Date`. A scope with no string format
/// renders the date's default display.
///
/// # Examples
///
/// ```
/// use polyglot_core::{I18n, Value};
/// use polyglot_format::localize::to_time;
///
/// let mut i18n = I18n::new();
/// i18n.merge_translations(
///     Value::from(serde_json::json!({"en": {"date": {"formats": {"short": "%d/%m/%Y"}}}}))
///         .into_tree()
///         .unwrap(),
/// );
/// assert_eq!(to_time(&i18n, "date.formats.short", "2009-04-26Z"), "26/04/2009");
/// assert_eq!(to_time(&i18n, "date.formats.short", "garbage"), "Invalid Date");
/// ```
pub fn to_time(i18n: &I18n, scope: &str, input: impl Into<DateInput>) -> String {
    let parsed = parse_date(input);
    let ParsedDate::Valid(date) = parsed else {
        return parsed.to_string();
    };

    match i18n.lookup(scope, &Options::new()) {
        Some(Value::String(format)) => strftime(i18n, &date, &format),
        _ => {
            tracing::debug!(scope, "no date format, using default display");
            parsed.to_string()
        }
    }
}

/// Localizes `value` according to `scope`.
///
/// | Scope | Result |
/// |-------|--------|
/// | `currency` | [`to_currency`] |
/// | `number` | [`to_number`] with the locale's `number.format` |
/// | `percentage` | [`to_percentage`] |
/// | `date…` or `time…` | [`to_time`] |
/// | anything else | the value's display string |
///
/// Text that does not parse as a number is returned unchanged by the
/// numeric scopes.
///
/// # Examples
///
/// ```
/// use polyglot_core::I18n;
/// use polyglot_format::localize::localize;
///
/// let i18n = I18n::new();
/// assert_eq!(localize(&i18n, "currency", 1234.5), "$1,234.50");
/// assert_eq!(localize(&i18n, "percentage", "42"), "42.000%");
/// assert_eq!(localize(&i18n, "time.formats.none", "2012-01-01T12:00:00Z"), "Sun Jan 01 2012 12:00:00 GMT+0000");
/// assert_eq!(localize(&i18n, "unknown", 12), "12");
/// ```
pub fn localize(i18n: &I18n, scope: &str, value: impl Into<Localizable>) -> String {
    let value = value.into();
    let options = Options::new();

    let numeric = |format: fn(&I18n, f64, &Options) -> String| {
        value
            .number()
            .map_or_else(|| value.display(), |n| format(i18n, n, &options))
    };

    match scope {
        "currency" => numeric(to_currency),
        "number" => numeric(to_number),
        "percentage" => numeric(to_percentage),
        _ if scope.starts_with("date") || scope.starts_with("time") => {
            to_time(i18n, scope, value.date_input())
        }
        _ => value.display(),
    }
}

/// Alias for [`localize`].
pub fn l(i18n: &I18n, scope: &str, value: impl Into<Localizable>) -> String {
    localize(i18n, scope, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixture() -> I18n {
        let mut i18n = I18n::new();
        i18n.merge_translations(
            Value::from(json!({
                "en": {
                    "date": {"formats": {"long": "%B %-d, %Y"}},
                    "time": {"formats": {"short": "%H:%M"}, "nested": {"not": "a format"}},
                    "number": {"format": {"precision": 1}}
                }
            }))
            .into_tree()
            .unwrap(),
        );
        i18n
    }

    #[test]
    fn test_localize_dates_and_times() {
        let i18n = fixture();
        assert_eq!(
            localize(&i18n, "date.formats.long", "2009-04-26T19:35:44Z"),
            "April 26, 2009"
        );
        assert_eq!(localize(&i18n, "time.formats.short", "2009-04-26T19:35:44Z"), "19:35");
    }

    #[test]
    fn test_localize_timestamp_number() {
        let i18n = fixture();
        let expected = parse_date(1_240_774_544_000_i64);
        let ParsedDate::Valid(date) = expected else {
            panic!("timestamp should parse");
        };
        assert_eq!(
            localize(&i18n, "date.formats.long", 1_240_774_544_000_i64),
            strftime(&i18n, &date, "%B %-d, %Y")
        );
    }

    #[test]
    fn test_to_time_non_string_format_uses_default_display() {
        let i18n = fixture();
        assert_eq!(
            to_time(&i18n, "time.nested", "2012-01-01T12:00:00Z"),
            "Sun Jan 01 2012 12:00:00 GMT+0000"
        );
    }

    #[test]
    fn test_localize_number_uses_number_format() {
        let i18n = fixture();
        assert_eq!(localize(&i18n, "number", 1234.56), "1,234.6");
    }

    #[test]
    fn test_localize_unparseable_numeric_text() {
        let i18n = fixture();
        assert_eq!(localize(&i18n, "currency", "lots"), "lots");
    }

    #[test]
    fn test_localize_other_scopes_display() {
        let i18n = fixture();
        assert_eq!(localize(&i18n, "name", "Ana"), "Ana");
        assert_eq!(localize(&i18n, "ratio", 2.5), "2.5");
        assert_eq!(l(&i18n, "flag", Value::Bool(true)), "true");
    }

    #[test]
    fn test_localize_chrono_date() {
        let i18n = fixture();
        let date = Utc.with_ymd_and_hms(2011, 7, 20, 12, 51, 55).unwrap();
        assert_eq!(localize(&i18n, "date.formats.long", date), "July 20, 2011");
    }

    #[test]
    fn test_localize_invalid_date() {
        let i18n = fixture();
        assert_eq!(localize(&i18n, "date.formats.long", "soon"), "Invalid Date");
    }

    #[test]
    fn test_localize_non_finite_timestamp_is_invalid() {
        let i18n = fixture();
        assert_eq!(localize(&i18n, "date.formats.long", f64::NAN), "Invalid Date");
        assert_eq!(localize(&i18n, "time.formats.short", f64::INFINITY), "Invalid Date");
        assert_eq!(localize(&i18n, "date.formats.x", f64::NEG_INFINITY), "Invalid Date");
    }
}
