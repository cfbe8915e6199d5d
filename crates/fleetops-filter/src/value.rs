//! Field value conversions used by the predicate stages.
//!
//! Two conversions matter for filtering: the canonical string form that
//! free-text search matches against ([`display_string`]) and date parsing
//! for range checks ([`Timestamp::parse`]).

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Number, Value};

/// Returns the canonical string form of a field value.
///
/// | Value | Form |
/// |-------|------|
/// | string | itself |
/// | integer | decimal (`42`) |
/// | float | integral floats drop the fraction (`5.0` -> `5`), others keep it (`2.5`) |
/// | bool | `true` / `false` |
/// | null | `null` |
/// | array | elements joined by `,`, null elements empty |
/// | object | `[object Object]` |
///
/// ```
/// use fleetops_filter::display_string;
/// use serde_json::json;
///
/// assert_eq!(display_string(&json!("Depot 4")), "Depot 4");
/// assert_eq!(display_string(&json!(12.0)), "12");
/// assert_eq!(display_string(&json!(["a", 1, null])), "a,1,");
/// ```
pub fn display_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(number_string(n)),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Null => Cow::Borrowed("null"),
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => Cow::Borrowed(""),
                    other => display_string(other),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Borrowed("[object Object]"),
    }
}

fn number_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    // Float Display already prints integral values without a fraction.
    n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
}

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// Date strings without an explicit offset are read as UTC, so
/// `2024-01-02` is midnight UTC on that day.
///
/// # Example
///
/// ```
/// use fleetops_filter::Timestamp;
///
/// let day = Timestamp::parse("2024-01-02").unwrap();
/// let later = Timestamp::parse("2024-01-02T08:30:00Z").unwrap();
/// assert!(day < later);
/// assert_eq!(Timestamp::parse("next tuesday"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parses a date or date-time string.
    ///
    /// Accepted forms:
    ///
    /// | Form | Example |
    /// |------|---------|
    /// | RFC 3339 | `2024-01-02T08:30:00+02:00` |
    /// | RFC 2822 / HTTP date | `Tue, 02 Jan 2024 10:00:00 GMT` |
    /// | ISO date-time, compact offset | `2024-01-02T08:30:00+0200` |
    /// | ISO date-time, no offset | `2024-01-02T08:30`, `2024-01-02 08:30:00.250` |
    /// | date | `2024-01-02`, `2024/01/02`, `01/02/2024`, `Jan 2, 2024`, `2 Jan 2024` |
    ///
    /// Forms without an offset are read as UTC. Returns `None` for anything
    /// else.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(Timestamp(dt.timestamp_millis()));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
            return Some(Timestamp(dt.timestamp_millis()));
        }

        const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
        if let Some(ts) = OFFSET_FORMATS.iter().find_map(|format| {
            DateTime::parse_from_str(input, format)
                .ok()
                .map(|dt| Timestamp(dt.timestamp_millis()))
        }) {
            return Some(ts);
        }

        const DATE_FORMATS: [&str; 6] = [
            "%Y-%m-%d",
            "%Y/%m/%d",
            "%m/%d/%Y",
            "%b %d, %Y",
            "%B %d, %Y",
            "%d %b %Y",
        ];
        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| Timestamp(dt.and_utc().timestamp_millis()));
        }

        const NAIVE_FORMATS: [&str; 6] = [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M",
            "%Y/%m/%d %H:%M:%S",
            "%Y/%m/%d %H:%M",
        ];
        NAIVE_FORMATS.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(input, format)
                .ok()
                .map(|dt| Timestamp(dt.and_utc().timestamp_millis()))
        })
    }

    /// Reads a timestamp from a field value.
    ///
    /// Strings are parsed with [`Timestamp::parse`]; numbers are taken as
    /// epoch milliseconds. `null`, booleans, arrays and objects yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Timestamp::parse(s),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(Timestamp),
            _ => None,
        }
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
