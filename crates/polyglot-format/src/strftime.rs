//! strftime-style date formatting with translated names.
//!
//! | Directive | Meaning |
//! |-----------|---------|
//! | `%a` / `%A` | abbreviated / full weekday name |
//! | `%b` / `%B` | abbreviated / full month name |
//! | `%d` / `%-d` / `%e` | day of month, padded / unpadded / unpadded |
//! | `%H` / `%-H` | hour (00..23) |
//! | `%I` / `%-I` | hour (01..12) |
//! | `%m` / `%-m` | month (01..12) |
//! | `%M` / `%-M` | minute |
//! | `%p` | meridian indicator |
//! | `%S` / `%-S` | second |
//! | `%w` | weekday, Sunday is 0 |
//! | `%y` / `%-y` | year without century |
//! | `%Y` | year with century |
//! | `%z` | offset from UTC (`+0545`) |
//! | `%%` | a literal `%` |
//!
//! Names come from the `date` scope (`day_names`, `abbr_day_names`,
//! `month_names`, `abbr_month_names`, `meridian`). Month arrays are indexed
//! from 1, so their first entry is a placeholder (usually `null`). Each
//! list the locale does not provide falls back to English.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use polyglot_core::{I18n, Options, Value};

use crate::template;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const ABBR_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const ABBR_MONTH_NAMES: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MERIDIAN: [&str; 2] = ["AM", "PM"];

/// Translated day, month, and meridian names for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateNames {
    /// Full weekday names, Sunday first.
    pub day_names: Vec<String>,
    /// Abbreviated weekday names, Sunday first.
    pub abbr_day_names: Vec<String>,
    /// Full month names; index 0 is unused.
    pub month_names: Vec<String>,
    /// Abbreviated month names; index 0 is unused.
    pub abbr_month_names: Vec<String>,
    /// Morning and afternoon indicators.
    pub meridian: Vec<String>,
}

impl Default for DateNames {
    fn default() -> Self {
        Self {
            day_names: owned(&DAY_NAMES),
            abbr_day_names: owned(&ABBR_DAY_NAMES),
            month_names: owned(&MONTH_NAMES),
            abbr_month_names: owned(&ABBR_MONTH_NAMES),
            meridian: owned(&MERIDIAN),
        }
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

impl DateNames {
    /// Reads the `date` scope of the current locale, keeping English for
    /// every list it lacks.
    pub fn resolve(i18n: &I18n) -> Self {
        let mut names = Self::default();
        let Some(Value::Tree(date)) = i18n.lookup("date", &Options::new()) else {
            return names;
        };

        for (key, slot) in [
            ("day_names", &mut names.day_names),
            ("abbr_day_names", &mut names.abbr_day_names),
            ("month_names", &mut names.month_names),
            ("abbr_month_names", &mut names.abbr_month_names),
            ("meridian", &mut names.meridian),
        ] {
            if let Some(Value::Array(items)) = date.get(key) {
                *slot = items
                    .iter()
                    .map(|item| if item.is_null() { String::new() } else { item.to_string() })
                    .collect();
            }
        }
        names
    }

    fn pick(list: &[String], index: usize) -> String {
        list.get(index).cloned().unwrap_or_default()
    }
}

/// Formats `date` using names from the current locale.
///
/// Unknown directives are copied through verbatim.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use polyglot_core::I18n;
/// use polyglot_format::strftime::strftime;
///
/// let i18n = I18n::new();
/// let date = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2009, 4, 26, 19, 35, 44).unwrap();
/// assert_eq!(strftime(&i18n, &date, "%A, %B %-d %Y %I:%M %p"), "Sunday, April 26 2009 07:35 PM");
/// ```
pub fn strftime(i18n: &I18n, date: &DateTime<FixedOffset>, format: &str) -> String {
    format_with_names(&DateNames::resolve(i18n), date, format)
}

/// Formats `date` with explicit names.
pub fn format_with_names(names: &DateNames, date: &DateTime<FixedOffset>, format: &str) -> String {
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let month = date.month();
    let hour = date.hour();
    let hour12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let year = date.year();

    template::fill(format, |directive| {
        let text = match directive {
            "a" => DateNames::pick(&names.abbr_day_names, weekday),
            "A" => DateNames::pick(&names.day_names, weekday),
            "b" => DateNames::pick(&names.abbr_month_names, month as usize),
            "B" => DateNames::pick(&names.month_names, month as usize),
            "d" => format!("{:02}", date.day()),
            "-d" | "e" => date.day().to_string(),
            "H" => format!("{hour:02}"),
            "-H" => hour.to_string(),
            "I" => format!("{hour12:02}"),
            "-I" => hour12.to_string(),
            "m" => format!("{month:02}"),
            "-m" => month.to_string(),
            "M" => format!("{:02}", date.minute()),
            "-M" => date.minute().to_string(),
            "p" => DateNames::pick(&names.meridian, usize::from(hour > 11)),
            "S" => format!("{:02}", date.second()),
            "-S" => date.second().to_string(),
            "w" => weekday.to_string(),
            "y" => format!("{:02}", year.rem_euclid(100)),
            "-y" => year.rem_euclid(100).to_string(),
            "Y" => year.to_string(),
            "z" => utc_offset(date.offset()),
            "%" => "%".to_string(),
            _ => return None,
        };
        Some(text)
    })
}

/// Renders an offset as `±HHMM`.
fn utc_offset(offset: &FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{sign}{:02}{:02}", minutes / 60, minutes % 60)
}
