//! Allocation description parsing
//!
//! Funding rows describe each weekly claim as free text such as
//! "Funded hours: 30.00 hours x €2.79". This module pulls the hours and hourly
//! rate out of that text and turns rows into [`AllocationFact`]s.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{AllocationFact, AllocationRow};

static ALLOCATION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn allocation_pattern() -> &'static Regex {
    ALLOCATION_PATTERN.get_or_init(|| {
        Regex::new(r"([0-9]+\.[0-9]+|[0-9]+) hours x €([0-9]+\.[0-9]+|[0-9]+)")
            .expect("allocation pattern is valid")
    })
}

/// Extract `(hours, rate)` from an allocation description
///
/// Returns `None` when the text does not contain `<number> hours x €<number>`.
/// Absence is an expected outcome; some rows carry unrelated text.
///
/// ```
/// use funding_recon::services::allocation::parse_allocation;
/// assert_eq!(parse_allocation("30.00 hours x €2.79"), Some((30.0, 2.79)));
/// assert_eq!(parse_allocation("Registration fee"), None);
/// ```
pub fn parse_allocation<'a>(description: impl Into<Option<&'a str>>) -> Option<(f64, f64)> {
    let description = description.into()?;
    let captures = allocation_pattern().captures(description)?;

    let hours: f64 = captures.get(1)?.as_str().parse().ok()?;
    let rate: f64 = captures.get(2)?.as_str().parse().ok()?;
    Some((hours, rate))
}

/// Why an allocation row could not become a fact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    /// The row's date was missing or unparseable
    MissingDate,
    /// The description did not contain hours and a rate
    UnparseableDescription,
}

/// Turn an allocation row into a fact
pub fn parse_row(row: &AllocationRow) -> Result<AllocationFact, RowRejection> {
    let date = row.date.ok_or(RowRejection::MissingDate)?;
    let (hours, rate) = parse_allocation(row.description.as_str())
        .ok_or(RowRejection::UnparseableDescription)?;
    Ok(AllocationFact::new(hours, rate, date))
}

/// Facts parsed from a child's rows, with a tally of what was dropped
#[derive(Debug, Clone, Default)]
pub struct ParsedAllocations {
    /// Rows that became facts, in input order
    pub facts: Vec<AllocationFact>,
    /// Rows dropped for a missing or bad date
    pub missing_dates: usize,
    /// Rows dropped for an unparseable description
    pub unparseable: usize,
}

impl ParsedAllocations {
    /// Number of rows dropped for any reason
    pub fn dropped(&self) -> usize {
        self.missing_dates + self.unparseable
    }
}

/// Parse every row, dropping the ones that cannot become facts
pub fn parse_rows<'r>(rows: impl IntoIterator<Item = &'r AllocationRow>) -> ParsedAllocations {
    let mut parsed = ParsedAllocations::default();

    for row in rows {
        match parse_row(row) {
            Ok(fact) => parsed.facts.push(fact),
            Err(RowRejection::MissingDate) => {
                tracing::debug!(child = %row.child_key, "Dropping allocation row without a valid date");
                parsed.missing_dates += 1;
            }
            Err(RowRejection::UnparseableDescription) => {
                tracing::debug!(
                    child = %row.child_key,
                    description = %row.description,
                    "Dropping allocation row with unparseable description"
                );
                parsed.unparseable += 1;
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_decimal_values() {
        assert_eq!(parse_allocation("30.00 hours x €2.79"), Some((30.0, 2.79)));
        assert_eq!(parse_allocation("22.5 hours x €1.40"), Some((22.5, 1.4)));
    }

    #[test]
    fn test_parse_integer_values() {
        assert_eq!(parse_allocation("20 hours x €2"), Some((20.0, 2.0)));
    }

    #[test]
    fn test_parse_embedded_in_text() {
        assert_eq!(
            parse_allocation("NCS subsidy: 15.25 hours x €3.10 (term time)"),
            Some((15.25, 3.1))
        );
    }

    #[test]
    fn test_parse_no_match() {
        assert_eq!(parse_allocation("30 hours at €2.79"), None);
        assert_eq!(parse_allocation("30 hours x $2.79"), None);
        assert_eq!(parse_allocation(""), None);
        assert_eq!(parse_allocation(None), None);
    }

    #[test]
    fn test_values_are_exact_for_typical_inputs() {
        for (text, hours, rate) in [
            ("45 hours x €0.50", 45.0, 0.5),
            ("7.5 hours x €12.25", 7.5, 12.25),
            ("0.25 hours x €3.99", 0.25, 3.99),
        ] {
            assert_eq!(parse_allocation(text), Some((hours, rate)));
        }
    }

    #[test]
    fn test_parse_rows_tallies_drops() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5);
        let rows = vec![
            AllocationRow::new("Amy", "20 hours x €2", date),
            AllocationRow::new("Amy", "20 hours x €2", None),
            AllocationRow::new("Amy", "Adjustment", date),
        ];

        let parsed = parse_rows(&rows);
        assert_eq!(parsed.facts.len(), 1);
        assert_eq!(parsed.missing_dates, 1);
        assert_eq!(parsed.unparseable, 1);
        assert_eq!(parsed.dropped(), 2);
        assert_eq!(parsed.facts[0].week_end, date.unwrap());
    }
}
