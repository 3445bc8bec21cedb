//! Parsing and display of stay dates.
//!
//! Query-string dates are untrusted: anything that does not parse becomes
//! "no date" instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Check-in/check-out pair parsed from user input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestedRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RequestedRange {
    /// Both ends, when both parsed.
    pub fn complete(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.from.zip(self.to)
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Parse a calendar date from free-form text.
///
/// Accepts ISO dates, RFC 3339 timestamps (the date as written in its own
/// offset), naive timestamps, `YYYY/MM/DD`, `MM/DD/YYYY` and the display
/// format `Jul 1, 2024`.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

/// Parse an optional check-in/check-out pair. Never fails.
pub fn parse_requested_range(check_in: Option<&str>, check_out: Option<&str>) -> RequestedRange {
    RequestedRange {
        from: check_in.and_then(parse_calendar_date),
        to: check_out.and_then(parse_calendar_date),
    }
}

/// `Jul 1, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Jul 1 - Jul 4, 2024`
pub fn format_date_range(check_in: NaiveDate, check_out: NaiveDate) -> String {
    format!(
        "{} - {}",
        check_in.format("%b %-d"),
        check_out.format("%b %-d, %Y")
    )
}
