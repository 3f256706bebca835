//! Date parsing for imported tables
//!
//! Upstream exports write dates day-first, sometimes with a time of day
//! attached. Month-first is tried last so that `12/31/2024` still parses.

use chrono::NaiveDate;

/// Formats tried in order; two-digit years before four so `%Y` never
/// swallows a short year.
const DATE_FORMATS: &[&str] = &["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Parse a date cell, ignoring any trailing time component
///
/// Returns `None` for blank or unrecognised text.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let date_part = s
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()?;
    if date_part.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}
