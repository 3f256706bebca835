//! Entitlement window representation
//!
//! The entitlement window is the 52 whole weeks ending on a child's claim
//! expiry date. Allocations outside it are ignored and allocations straddling
//! its edges are clipped.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the entitlement window in days (52 weeks)
pub const WINDOW_DAYS: i64 = 364;

/// An inclusive date range within which a child's allocations count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitlementWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl EntitlementWindow {
    /// Create a window from explicit bounds
    ///
    /// Returns `None` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Derive the 52-week window ending on the claim expiry date
    pub fn from_claim_until(claim_until: NaiveDate) -> Self {
        Self {
            start: claim_until - Duration::days(WINDOW_DAYS) + Duration::days(1),
            end: claim_until,
        }
    }

    /// First day of the window
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Check if the inclusive range `[start, end]` touches the window
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        !(start > self.end || end < self.start)
    }

    /// Clip an inclusive range to the window bounds
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        (start.max(self.start), end.min(self.end))
    }

    /// Number of days covered by the window
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for EntitlementWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_claim_until_spans_52_weeks() {
        let window = EntitlementWindow::from_claim_until(date(2025, 8, 17));
        assert_eq!(window.end(), date(2025, 8, 17));
        assert_eq!(window.start(), date(2024, 8, 19));
        assert_eq!(window.days(), 364);
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        assert!(EntitlementWindow::new(date(2025, 2, 1), date(2025, 1, 1)).is_none());
        assert!(EntitlementWindow::new(date(2025, 1, 1), date(2025, 1, 1)).is_some());
    }

    #[test]
    fn test_overlaps_and_clip() {
        let window = EntitlementWindow::new(date(2025, 1, 1), date(2025, 1, 19)).unwrap();

        assert!(window.overlaps(date(2024, 12, 30), date(2025, 1, 5)));
        assert!(!window.overlaps(date(2024, 12, 20), date(2024, 12, 31)));
        assert!(!window.overlaps(date(2025, 1, 20), date(2025, 1, 26)));

        assert_eq!(
            window.clip(date(2024, 12, 30), date(2025, 1, 5)),
            (date(2025, 1, 1), date(2025, 1, 5))
        );
        assert_eq!(
            window.clip(date(2025, 1, 13), date(2025, 1, 25)),
            (date(2025, 1, 13), date(2025, 1, 19))
        );
    }

    #[test]
    fn test_display() {
        let window = EntitlementWindow::new(date(2025, 1, 1), date(2025, 1, 19)).unwrap();
        assert_eq!(window.to_string(), "2025-01-01..2025-01-19");
        assert!(window.contains(date(2025, 1, 10)));
    }
}
