//! Date parsing.
//!
//! [`parse_date`] turns anything a caller may hold (a chrono value, a
//! millisecond timestamp, or text) into a [`ParsedDate`]. Text is matched
//! against the ISO-like pattern first:
//!
//! ```text
//! yyyy-mm-dd
//! yyyy-mm-dd[ T]hh:mm:ss
//! yyyy-mm-dd[ T]hh:mm:ssZ
//! yyyy-mm-dd[ T]hh:mm:ss[ ]±hh[:]mm
//! ```
//!
//! A `Z` marker means UTC and an explicit offset is kept as given; without
//! either the components are local time. Exact RFC 3339 text is parsed
//! directly. Other text is tried as RFC 2822 and the
//! `Sun Jan 01 2012 12:00:00 GMT+0000` display shape.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

/// The display shape used for dates with no configured format.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// What [`ParsedDate`] displays for unparseable input.
pub const INVALID_DATE: &str = "Invalid Date";

/// Something that can be interpreted as a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// An instant with a known offset.
    DateTime(DateTime<FixedOffset>),
    /// Wall-clock components in local time.
    Naive(NaiveDateTime),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    /// Text to be parsed.
    Text(String),
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt.fixed_offset())
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Naive(dt)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Naive(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        Self::Timestamp(ms)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// The result of [`parse_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// A valid instant with its offset.
    Valid(DateTime<FixedOffset>),
    /// Unparseable or out-of-range input.
    Invalid,
}

impl ParsedDate {
    /// Returns `true` for a valid date.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The parsed instant, if valid.
    pub const fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Valid(dt) => Some(dt),
            Self::Invalid => None,
        }
    }
}

impl From<Option<DateTime<FixedOffset>>> for ParsedDate {
    fn from(dt: Option<DateTime<FixedOffset>>) -> Self {
        dt.map_or(Self::Invalid, Self::Valid)
    }
}

impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(dt) => write!(f, "{}", dt.format(DEFAULT_DISPLAY_FORMAT)),
            Self::Invalid => f.write_str(INVALID_DATE),
        }
    }
}

fn iso_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(\d{4})-(\d{2})-(\d{2})(?:[ T](\d{2}):(\d{2}):(\d{2})(?:\.\d+)?)? ?(Z|([+-])(\d{2}):?(\d{2}))?",
        )
        .expect("ISO date pattern")
    })
}

/// Parses a date.
///
/// # Examples
///
/// ```
/// use polyglot_format::date::{parse_date, ParsedDate};
///
/// let date = parse_date("2009-04-26T19:35:44Z");
/// assert_eq!(date.to_string(), "Sun Apr 26 2009 19:35:44 GMT+0000");
/// assert_eq!(parse_date("2009-13-01Z"), ParsedDate::Invalid);
/// assert_eq!(parse_date("yesterday").to_string(), "Invalid Date");
/// ```
pub fn parse_date(input: impl Into<DateInput>) -> ParsedDate {
    match input.into() {
        DateInput::DateTime(dt) => ParsedDate::Valid(dt),
        DateInput::Naive(naive) => in_local_time(&naive).into(),
        DateInput::Timestamp(ms) => Local
            .timestamp_millis_opt(ms)
            .single()
            .map(|dt| dt.fixed_offset())
            .into(),
        DateInput::Text(text) => parse_text(&text),
    }
}

fn parse_text(text: &str) -> ParsedDate {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return ParsedDate::Valid(dt);
    }

    if let Some(caps) = iso_pattern().captures(text) {
        let number = |i: usize| -> u32 {
            caps.get(i)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };
        let year = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok()).unwrap_or(0);
        let naive = NaiveDate::from_ymd_opt(year, number(2), number(3))
            .and_then(|d| d.and_hms_opt(number(4), number(5), number(6)));
        let Some(naive) = naive else {
            tracing::debug!(text, "date components out of range");
            return ParsedDate::Invalid;
        };

        return match caps.get(7).map(|m| m.as_str()) {
            None => in_local_time(&naive).into(),
            Some("Z") => ParsedDate::Valid(Utc.from_utc_datetime(&naive).fixed_offset()),
            Some(_) => {
                let sign = if caps.get(8).is_some_and(|m| m.as_str() == "-") { -1 } else { 1 };
                #[allow(clippy::cast_possible_wrap)]
                let seconds = (number(9) * 3600 + number(10) * 60) as i32;
                FixedOffset::east_opt(sign * seconds)
                    .and_then(|offset| offset.from_local_datetime(&naive).single())
                    .into()
            }
        };
    }

    // The display shape may carry a trailing zone name: "... GMT+0000 (UTC)".
    let display = trimmed.split(" (").next().unwrap_or(trimmed);

    DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_str(display, DEFAULT_DISPLAY_FORMAT))
        .map_or_else(
            |_| {
                tracing::debug!(text, "unrecognized date");
                ParsedDate::Invalid
            },
            ParsedDate::Valid,
        )
}

/// Interprets wall-clock components in the local zone. Nonexistent local
/// times (inside a DST gap) are invalid; ambiguous ones take the earlier instant.
fn in_local_time(naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}
