//! Timestamp validation, parsing and formatting.
//!
//! Shifts arrive from spreadsheets and databases with timestamps in a handful
//! of shapes. This module accepts the supported shapes and rejects everything
//! else, so the engines only ever see well-formed [`NaiveDateTime`] values.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Largest epoch-millisecond magnitude accepted as a timestamp.
///
/// chrono cannot represent the whole of this range, so values beyond about
/// ±8.2e15 ms (years past ±262,000) are rejected too.
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Earliest calendar year accepted in `YYYY-MM-DD HH:mm[:ss]` strings.
const MIN_CALENDAR_YEAR: i32 = 100;

/// A timestamp as supplied by a caller, before validation.
///
/// # Example
///
/// ```
/// use section2_engine::calendar::{TimestampInput, parse_timestamp};
///
/// let input = TimestampInput::from("2025-10-02 12:00");
/// let parsed = parse_timestamp(&input).unwrap();
/// assert_eq!(parsed.to_string(), "2025-10-02 12:00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampInput {
    /// Milliseconds since the Unix epoch (interpreted as UTC wall-clock).
    EpochMillis(i64),
    /// A `YYYY-MM-DD HH:mm[:ss]` or ISO-8601 string.
    Text(String),
    /// An already-constructed date and time.
    DateTime(NaiveDateTime),
}

impl TimestampInput {
    /// Returns true for the empty string, which callers use to mean "not supplied".
    pub fn is_empty(&self) -> bool {
        matches!(self, TimestampInput::Text(s) if s.is_empty())
    }
}

impl fmt::Display for TimestampInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampInput::EpochMillis(ms) => write!(f, "{ms}"),
            TimestampInput::Text(s) => write!(f, "{s}"),
            TimestampInput::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<NaiveDateTime> for TimestampInput {
    fn from(value: NaiveDateTime) -> Self {
        TimestampInput::DateTime(value)
    }
}

impl From<&str> for TimestampInput {
    fn from(value: &str) -> Self {
        TimestampInput::Text(value.to_string())
    }
}

impl From<String> for TimestampInput {
    fn from(value: String) -> Self {
        TimestampInput::Text(value)
    }
}

impl From<i64> for TimestampInput {
    fn from(value: i64) -> Self {
        TimestampInput::EpochMillis(value)
    }
}

/// Returns true if the input is a supported, well-formed timestamp.
///
/// # Example
///
/// ```
/// use section2_engine::calendar::{TimestampInput, is_valid_timestamp};
///
/// assert!(is_valid_timestamp(&TimestampInput::from("2025-10-02 22:15:00")));
/// assert!(is_valid_timestamp(&TimestampInput::from("2025-10-02T22:15:00.000Z")));
/// assert!(!is_valid_timestamp(&TimestampInput::from("2025/10/02 22:15:00")));
/// assert!(!is_valid_timestamp(&TimestampInput::from("2025-13-02 22:15:00")));
/// ```
pub fn is_valid_timestamp(input: &TimestampInput) -> bool {
    parse_timestamp(input).is_some()
}

/// Parses a supported timestamp into a wall-clock [`NaiveDateTime`].
///
/// Offset-bearing ISO strings and epoch values are normalized to UTC.
/// Returns `None` for anything malformed, impossible (e.g. month 13) or out
/// of range.
pub fn parse_timestamp(input: &TimestampInput) -> Option<NaiveDateTime> {
    match input {
        TimestampInput::DateTime(dt) => Some(*dt),
        TimestampInput::EpochMillis(ms) => {
            if !(-MAX_EPOCH_MILLIS..=MAX_EPOCH_MILLIS).contains(ms) {
                return None;
            }
            DateTime::from_timestamp_millis(*ms).map(|dt| dt.naive_utc())
        }
        TimestampInput::Text(s) => parse_text(s),
    }
}

/// Formats the calendar date of an instant as `YYYY-MM-DD`.
///
/// # Example
///
/// ```
/// use section2_engine::calendar::format_sortable_date;
/// use chrono::NaiveDateTime;
///
/// let dt = NaiveDateTime::parse_from_str("2025-10-02 22:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(format_sortable_date(dt), "2025-10-02");
/// ```
pub fn format_sortable_date(instant: NaiveDateTime) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// Returns `to`, moved forward a day if it falls before `from`.
///
/// Historical records sometimes store an end time that has wrapped past
/// midnight without its date advancing. `to` is returned unchanged when the
/// following day is not representable.
pub fn end_after_start(from: NaiveDateTime, to: NaiveDateTime) -> NaiveDateTime {
    if from > to {
        to.checked_add_signed(Duration::days(1)).unwrap_or(to)
    } else {
        to
    }
}

fn parse_text(s: &str) -> Option<NaiveDateTime> {
    if matches_shape(s, "dddd-dd-dd dd:dd:dd") {
        return parse_calendar(s, "%Y-%m-%d %H:%M:%S");
    }
    if matches_shape(s, "dddd-dd-dd dd:dd") {
        return parse_calendar(s, "%Y-%m-%d %H:%M");
    }
    parse_iso(s)
}

fn parse_calendar(s: &str, format: &str) -> Option<NaiveDateTime> {
    let dt = NaiveDateTime::parse_from_str(s, format).ok()?;
    (dt.year() >= MIN_CALENDAR_YEAR).then_some(dt)
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    let (base, rest) = s.split_at_checked(19)?;
    if !matches_shape(base, "dddd-dd-ddTdd:dd:dd") {
        return None;
    }

    let fraction_len = match rest.strip_prefix('.') {
        Some(after_dot) => {
            let digits = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return None;
            }
            digits + 1
        }
        None => 0,
    };
    let offset = &rest[fraction_len..];

    if offset.is_empty() {
        return NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok();
    }

    let valid_offset = offset == "Z"
        || (offset.len() == 6
            && (offset.starts_with('+') || offset.starts_with('-'))
            && matches_shape(&offset[1..], "dd:dd"));
    if !valid_offset {
        return None;
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Checks `s` against a pattern where `d` is any ASCII digit and every other
/// character must match literally.
fn matches_shape(s: &str, pattern: &str) -> bool {
    s.len() == pattern.len()
        && s.bytes().zip(pattern.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

/// Serde adapter for [`NaiveDateTime`] fields that accepts every
/// [`TimestampInput`] shape on input and writes ISO-8601 on output.
pub mod serde_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::{TimestampInput, parse_timestamp};

    /// Serializes as `YYYY-MM-DDTHH:MM:SS.fff`.
    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
    }

    /// Deserializes any supported timestamp shape.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let input = TimestampInput::deserialize(deserializer)?;
        parse_timestamp(&input)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {input}")))
    }
}
