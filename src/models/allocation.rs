//! Allocation rows and parsed allocation facts
//!
//! An allocation row is one weekly subsidy claim as it arrives from the
//! funding table. Once its description and date are understood it becomes an
//! [`AllocationFact`] carrying the hours and rate for the week ending on its
//! date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days before the week-end date that the claim week starts on
pub const WEEK_SPAN_DAYS: i64 = 6;

/// A raw weekly allocation row for a child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    /// Key linking the row to a child (the raw child name in the funding table)
    pub child_key: String,

    /// Free-text description, e.g. "30.00 hours x €2.79"
    pub description: String,

    /// Week-end date, if it could be parsed
    pub date: Option<NaiveDate>,
}

impl AllocationRow {
    /// Create a new allocation row
    pub fn new(
        child_key: impl Into<String>,
        description: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            child_key: child_key.into(),
            description: description.into(),
            date,
        }
    }

    /// Check if the row belongs to the child with this raw name
    ///
    /// Rows are linked to children by exact name, as written in both tables.
    pub fn belongs_to(&self, child_name: &str) -> bool {
        self.child_key == child_name
    }
}

/// A parsed weekly allocation: hours at a rate for the week ending `week_end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationFact {
    /// Weekly hours
    pub hours: f64,

    /// Hourly rate
    pub rate: f64,

    /// Last day of the claim week
    pub week_end: NaiveDate,
}

impl AllocationFact {
    /// Create a new allocation fact
    pub fn new(hours: f64, rate: f64, week_end: NaiveDate) -> Self {
        Self {
            hours,
            rate,
            week_end,
        }
    }

    /// First day of the claim week (six days before the week-end date)
    pub fn week_start(&self) -> NaiveDate {
        self.week_end - Duration::days(WEEK_SPAN_DAYS)
    }
}
