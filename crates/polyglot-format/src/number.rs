//! Number, currency, percentage, and file size formatting.
//!
//! Every formatter resolves its options first-set-wins from three layers:
//! the explicit options, the locale's configuration scopes, and built-in
//! defaults.
//!
//! | Formatter | Configuration scopes | Defaults |
//! |-----------|----------------------|----------|
//! | [`to_number`] | `number.format` | precision 3, separator `.`, delimiter `,` |
//! | [`to_currency`] | `number.currency.format`, `number.format` | unit `$`, precision 2, format `%u%n` |
//! | [`to_percentage`] | `number.percentage.format`, `number.format` | precision 3, delimiter empty, format `%n%` |
//! | [`to_human_size`] | `number.format` | precision 0 or 1, format `%n%u`, delimiter empty |
//!
//! Configuration scopes are read in the locale named by the `locale` option,
//! or the current locale.

use polyglot_core::options::keys as core_keys;
use polyglot_core::{I18n, Options, Value};

use crate::template;

/// Option keys understood by the formatters.
pub mod keys {
    /// Fraction digits.
    pub const PRECISION: &str = "precision";
    /// Decimal separator.
    pub const SEPARATOR: &str = "separator";
    /// Thousands delimiter.
    pub const DELIMITER: &str = "delimiter";
    /// Whether trailing fraction zeros are removed.
    pub const STRIP_INSIGNIFICANT_ZEROS: &str = "strip_insignificant_zeros";
    /// Output template (`%n` number, `%u` unit).
    pub const FORMAT: &str = "format";
    /// Output template for negative numbers.
    pub const NEGATIVE_FORMAT: &str = "negative_format";
    /// Currency or size unit.
    pub const UNIT: &str = "unit";
}

/// Powers of 1024 and their unit keys under `number.human.storage_units.units`.
const SIZE_UNITS: [&str; 5] = ["byte", "kb", "mb", "gb", "tb"];

fn number_defaults() -> Options {
    Options::new()
        .with(keys::PRECISION, 3)
        .with(keys::SEPARATOR, ".")
        .with(keys::DELIMITER, ",")
        .with(keys::STRIP_INSIGNIFICANT_ZEROS, false)
}

fn currency_defaults() -> Options {
    Options::new()
        .with(keys::UNIT, "$")
        .with(keys::PRECISION, 2)
        .with(keys::FORMAT, "%u%n")
        .with(keys::DELIMITER, ",")
        .with(keys::SEPARATOR, ".")
}

fn percentage_defaults() -> Options {
    Options::new()
        .with(keys::PRECISION, 3)
        .with(keys::SEPARATOR, ".")
        .with(keys::DELIMITER, "")
        .with(keys::FORMAT, "%n%")
}

/// Looks up a configuration scope in the locale the call targets.
pub(crate) fn config(i18n: &I18n, scope: &str, options: &Options) -> Option<Value> {
    i18n.lookup(scope, &locale_only(options))
}

/// An options bag carrying only the caller's `locale`, if any.
pub(crate) fn locale_only(options: &Options) -> Options {
    options
        .locale()
        .map_or_else(Options::new, |locale| Options::new().with(core_keys::LOCALE, locale))
}

/// Formats a number with grouping and fixed precision.
///
/// # Examples
///
/// ```
/// use polyglot_core::{I18n, Options};
/// use polyglot_format::number::to_number;
///
/// let i18n = I18n::new();
/// assert_eq!(to_number(&i18n, 1234.5678, &Options::new()), "1,234.568");
/// assert_eq!(to_number(&i18n, -1234.5, &Options::new().with("precision", 0)), "-1,235");
/// ```
pub fn to_number(i18n: &I18n, number: f64, options: &Options) -> String {
    let options = options
        .clone()
        .or_value(config(i18n, "number.format", options).as_ref())
        .or_options(&number_defaults());
    format_number(number, &options)
}

/// Formats a number with fully resolved options.
fn format_number(number: f64, options: &Options) -> String {
    let negative = number < 0.0;
    let precision = precision_of(options);
    let separator = display_option(options, keys::SEPARATOR);
    let delimiter = display_option(options, keys::DELIMITER);

    if !number.is_finite() {
        let text = if number.is_nan() { "NaN" } else { "Infinity" };
        return if negative { format!("-{text}") } else { text.to_string() };
    }

    let fixed = to_fixed(number.abs(), precision);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut formatted = group_digits(integer, &delimiter);

    let fraction = if options.get_flag(keys::STRIP_INSIGNIFICANT_ZEROS) {
        fraction.trim_end_matches('0')
    } else {
        fraction
    };

    if precision > 0 && !fraction.is_empty() {
        formatted.push_str(&separator);
        formatted.push_str(fraction);
    }

    if negative {
        formatted.insert(0, '-');
    }
    formatted
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn precision_of(options: &Options) -> usize {
    options
        .get_f64(keys::PRECISION)
        .filter(|p| p.is_finite() && *p > 0.0)
        .map_or(0, |p| p.min(100.0) as usize)
}

fn display_option(options: &Options, key: &str) -> String {
    options.get(key).map(ToString::to_string).unwrap_or_default()
}

/// Renders a non-negative finite value with `precision` fraction digits,
/// rounding exact halves away from zero.
fn to_fixed(value: f64, precision: usize) -> String {
    const PROBE: usize = 25;

    // Display rounds exact ties to even; detect them from a longer expansion.
    let probe = format!("{value:.prec$}", prec = precision + PROBE);
    let (head, tail) = probe.split_at(probe.len() - PROBE);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{value:.precision$}");
    }

    let truncated = head.trim_end_matches('.');
    increment_last_digit(truncated)
}

/// Adds one unit in the last place to a decimal string of digits and at most one `.`.
fn increment_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        match *b {
            b'.' => {}
            b'9' => *b = b'0',
            _ => {
                *b += 1;
                carry = false;
            }
        }
    }
    let mut result = String::from_utf8(bytes).unwrap_or_default();
    if carry {
        result.insert(0, '1');
    }
    result
}

/// Joins integer digits in groups of three from the right.
fn group_digits(integer: &str, delimiter: &str) -> String {
    let digits: Vec<char> = integer.chars().collect();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3 * delimiter.len());

    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push_str(delimiter);
        }
        result.push(*ch);
    }
    result
}

/// Formats a currency amount.
///
/// Negative amounts switch to `negative_format` (default `"-"` followed by
/// `format`) and format the absolute value.
///
/// # Examples
///
/// ```
/// use polyglot_core::{I18n, Options};
/// use polyglot_format::number::to_currency;
///
/// let i18n = I18n::new();
/// assert_eq!(to_currency(&i18n, 1000.99, &Options::new()), "$1,000.99");
/// assert_eq!(to_currency(&i18n, -12.0, &Options::new()), "-$12.00");
/// assert_eq!(to_currency(&i18n, 1234.0, &Options::new().with("format", "%u %n")), "$ 1,234.00");
/// ```
pub fn to_currency(i18n: &I18n, number: f64, options: &Options) -> String {
    let options = options
        .clone()
        .or_value(config(i18n, "number.currency.format", options).as_ref())
        .or_value(config(i18n, "number.format", options).as_ref())
        .or_options(&currency_defaults());

    let format = display_option(&options, keys::FORMAT);
    let (template, amount) = if number < 0.0 {
        let negative = options
            .get_str(keys::NEGATIVE_FORMAT)
            .filter(|f| !f.is_empty())
            .map_or_else(|| format!("-{format}"), ToString::to_string);
        (negative, number.abs())
    } else {
        (format, number)
    };

    let formatted = format_number(amount, &options);
    let unit = display_option(&options, keys::UNIT);
    template::fill(&template, |directive| match directive {
        "u" => Some(unit.clone()),
        "n" => Some(formatted.clone()),
        _ => None,
    })
}

/// Formats a percentage. The number is used as-is (`12.5` renders `12.500%`).
///
/// # Examples
///
/// ```
/// use polyglot_core::{I18n, Options};
/// use polyglot_format::number::to_percentage;
///
/// let i18n = I18n::new();
/// assert_eq!(to_percentage(&i18n, 12.5, &Options::new()), "12.500%");
/// assert_eq!(to_percentage(&i18n, 1234.0, &Options::new().with("precision", 0)), "1234%");
/// ```
pub fn to_percentage(i18n: &I18n, number: f64, options: &Options) -> String {
    let options = options
        .clone()
        .or_value(config(i18n, "number.percentage.format", options).as_ref())
        .or_value(config(i18n, "number.format", options).as_ref())
        .or_options(&percentage_defaults());

    let formatted = format_number(number, &options);
    let format = display_option(&options, keys::FORMAT);
    template::fill(&format, |directive| (directive == "n").then(|| formatted.clone()))
}

/// Formats a byte count with binary (1024) units.
///
/// # Examples
///
/// ```
/// use polyglot_core::{I18n, Options};
/// use polyglot_format::number::to_human_size;
///
/// let i18n = I18n::new();
/// assert_eq!(to_human_size(&i18n, 1.0, &Options::new()), "1Byte");
/// assert_eq!(to_human_size(&i18n, 1024.0, &Options::new()), "1KB");
/// assert_eq!(to_human_size(&i18n, 1536.0, &Options::new()), "1.5KB");
/// ```
pub fn to_human_size(i18n: &I18n, number: f64, options: &Options) -> String {
    let mut size = number;
    let mut power = 0;
    while size >= 1024.0 && power < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        power += 1;
    }

    let unit = storage_unit(i18n, SIZE_UNITS[power], size, options);
    let precision = if power == 0 || size.fract() == 0.0 { 0 } else { 1 };
    tracing::trace!(size, unit = %unit, precision, "human size");

    let size_defaults = Options::new()
        .with(keys::PRECISION, precision)
        .with(keys::FORMAT, "%n%u")
        .with(keys::DELIMITER, "");
    let options = options.clone().or_options(&size_defaults);

    let formatted = to_number(i18n, size, &options);
    let format = display_option(&options, keys::FORMAT);
    template::fill(&format, |directive| match directive {
        "u" => Some(unit.clone()),
        "n" => Some(formatted.clone()),
        _ => None,
    })
}

/// Resolves a storage unit label, pluralizing bytes by `size`.
fn storage_unit(i18n: &I18n, key: &str, size: f64, options: &Options) -> String {
    let scope = format!("number.human.storage_units.units.{key}");
    let mut unit_options = locale_only(options);
    if key == "byte" {
        unit_options.set(core_keys::COUNT, size);
    }

    if i18n.lookup(&scope, &unit_options).is_some() {
        return i18n.translate(&scope, &unit_options).to_string();
    }

    match key {
        "byte" if (size - 1.0).abs() < f64::EPSILON => "Byte",
        "byte" => "Bytes",
        "kb" => "KB",
        "mb" => "MB",
        "gb" => "GB",
        _ => "TB",
    }
    .to_string()
}
