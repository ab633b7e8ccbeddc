//! Date search values
//!
//! A datetime search matches whole days:
//! - `2024-01-05` -> `[2024-01-05 00:00, 2024-01-06 00:00)`
//! - `2024-01-05 - 2024-01-07` -> `[2024-01-05 00:00, 2024-01-08 00:00)`
//!
//! Either side may carry a time (`2024-01-05 10:00`); the window then
//! starts at that instant and ends one day after the last value.
//!
//! Times are naive (UTC). One day is a calendar day, so month and year
//! rollover are handled by `chrono`.

use std::sync::OnceLock;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Date-only token formats, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Time suffixes accepted after a date
const TIME_FORMATS: &[&str] = &[" %H:%M:%S", " %H:%M", "T%H:%M:%S", "T%H:%M"];

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Each side is a date with an optional ` H:M[:S]` or `TH:M[:S]` suffix
        let token = r"(\d[\d/\-]*(?:[ T]\d{1,2}:\d{2}(?::\d{2})?)?)";
        Regex::new(&format!(r"^\s*{token}\s+-\s+{token}\s*$")).expect("range pattern is valid")
    })
}

/// Half-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayWindow {
    /// Parse a single date or a `<left> - <right>` range.
    ///
    /// Errors carry a human-readable reason.
    pub fn parse(value: &str) -> Result<Self, String> {
        if let Some(captures) = range_pattern().captures(value) {
            let start = parse_token(&captures[1])?;
            let last = parse_token(&captures[2])?;
            return Ok(Self {
                start,
                end: next_day(last)?,
            });
        }

        let start = parse_token(value)?;
        Ok(Self {
            start,
            end: next_day(start)?,
        })
    }

    pub fn contains(&self, value: NaiveDateTime) -> bool {
        value >= self.start && value < self.end
    }
}

fn parse_token(token: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(token).ok_or_else(|| format!("'{}' is not a recognized date", token.trim()))
}

fn next_day(value: NaiveDateTime) -> Result<NaiveDateTime, String> {
    value
        .checked_add_days(Days::new(1))
        .ok_or_else(|| format!("'{}' is out of range", value))
}

/// Parse a date or date-time written in one of the accepted formats.
///
/// Also accepts RFC 3339 timestamps, converted to UTC.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for date_format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, date_format) {
            return date.and_hms_opt(0, 0, 0);
        }

        for time_format in TIME_FORMATS {
            let format = format!("{}{}", date_format, time_format);
            if let Ok(datetime) = NaiveDateTime::parse_from_str(value, &format) {
                return Some(datetime);
            }
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
}
