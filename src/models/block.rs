//! Funding blocks and funding levels
//!
//! A funding block is a maximal run of consecutive days during which a
//! child's weekly hours and hourly rate stay the same. A funding level is just
//! the (hours, rate) pair; the base claim is the level covering the most days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An (hours, rate) pair
///
/// Equality is exact on both fields. Hours are kept as real numbers for
/// grouping and only truncated when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingLevel {
    /// Weekly hours
    pub hours: f64,
    /// Hourly rate
    pub rate: f64,
}

impl FundingLevel {
    /// Create a new funding level
    pub fn new(hours: f64, rate: f64) -> Self {
        Self { hours, rate }
    }

    /// Whole hours for display (truncated toward zero)
    pub fn whole_hours(&self) -> i64 {
        self.hours.trunc() as i64
    }

    /// Format the rate with a currency symbol and two decimals
    pub fn format_rate(&self, symbol: &str) -> String {
        format_rate(self.rate, symbol)
    }
}

impl fmt::Display for FundingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h x {}", self.whole_hours(), self.format_rate("€"))
    }
}

/// Format a rate with a currency symbol and two decimals
pub fn format_rate(rate: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, rate)
}

/// A contiguous, date-bounded run of one funding level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingBlock {
    /// Weekly hours
    pub hours: f64,
    /// Hourly rate
    pub rate: f64,
    /// First day of the block
    pub start: NaiveDate,
    /// Last day of the block (inclusive)
    pub end: NaiveDate,
}

impl FundingBlock {
    /// Create a new block
    pub fn new(hours: f64, rate: f64, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            hours,
            rate,
            start,
            end,
        }
    }

    /// The (hours, rate) pair of this block
    pub fn level(&self) -> FundingLevel {
        FundingLevel::new(self.hours, self.rate)
    }

    /// Check if this block carries the given level
    pub fn has_level(&self, level: &FundingLevel) -> bool {
        self.hours == level.hours && self.rate == level.rate
    }

    /// Number of days covered, inclusive of both ends
    pub fn covered_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for FundingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..{}", self.level(), self.start, self.end)
    }
}
