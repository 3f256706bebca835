//! Reconciliation output records
//!
//! These are the structured results handed to the exporters: one funding
//! record per (child, block) pair, plus reports for children that could not
//! be identified or have nothing to claim.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::identity::MatchCandidate;

/// Whether a record carries the base claim or a top-up above it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// The child's base claim over the whole coverage range
    Base,
    /// Hours above the base claim for one block
    TopUp,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "Base"),
            Self::TopUp => write!(f, "Top-up"),
        }
    }
}

/// One billing-ready row of a child's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRecord {
    /// Raw child name this record was built for
    pub child_key: String,
    /// Display name of the child
    pub child: String,
    /// Funding-subsidy identifier
    pub chick: Option<String>,
    /// Date of birth as given
    pub date_of_birth: Option<String>,
    /// Claim expiry date
    pub claim_until: Option<NaiveDate>,
    /// Weekly hours (the difference above base for top-ups)
    pub weekly_hours: f64,
    /// Hourly rate
    pub hour_rate: f64,
    /// First day covered by this record
    pub block_start: NaiveDate,
    /// Last day covered by this record
    pub block_end: NaiveDate,
    /// Base claim or top-up
    pub kind: RecordKind,
}

impl FundingRecord {
    /// Whole weekly hours for display (truncated toward zero)
    pub fn whole_hours(&self) -> i64 {
        self.weekly_hours.trunc() as i64
    }
}

/// A child left without a roster match after resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedIdentity {
    /// Name as it appears in the children table
    pub child_name: String,
    /// Funding-subsidy identifier
    pub chick: Option<String>,
    /// Best-ranked roster candidates
    pub candidates: Vec<MatchCandidate>,
}

/// Why a child produced no funding records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoFundingReason {
    /// Claim expiry date missing or unparseable
    NoEntitlementWindow,
    /// No allocation row had both a parseable date and description
    NoValidAllocations,
    /// Allocations exist but none fall inside the entitlement window
    NoActiveFunding,
}

impl fmt::Display for NoFundingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEntitlementWindow => write!(f, "No claim expiry date"),
            Self::NoValidAllocations => write!(f, "No valid allocations"),
            Self::NoActiveFunding => write!(f, "No active funding in window"),
        }
    }
}

/// A child that yielded no funding records, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoFundingEntry {
    /// Name as it appears in the children table
    pub child_name: String,
    /// Funding-subsidy identifier
    pub chick: Option<String>,
    /// Claim expiry as written in the children table
    #[serde(default)]
    pub claim_until: Option<String>,
    /// Reason no records were produced
    pub reason: NoFundingReason,
}
