//! Child record model
//!
//! One row of the children table: the child's name as the funding system
//! spells it, the subsidy identifier and the claim expiry date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::window::EntitlementWindow;

/// A child as read from the children table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    /// Name exactly as it appears in the children table
    pub raw_name: String,

    /// Funding-subsidy identifier (CHICK)
    #[serde(default)]
    pub chick: Option<String>,

    /// Date of birth, passed through untouched
    #[serde(default)]
    pub date_of_birth: Option<String>,

    /// Claim expiry date, if present and parseable
    #[serde(default)]
    pub claim_until: Option<NaiveDate>,

    /// Claim expiry as written in the input, kept for reporting
    #[serde(default)]
    pub claim_until_raw: Option<String>,
}

impl ChildRecord {
    /// Create a record with just a name
    pub fn new(raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            chick: None,
            date_of_birth: None,
            claim_until: None,
            claim_until_raw: None,
        }
    }

    /// Set the CHICK identifier
    pub fn with_chick(mut self, chick: impl Into<String>) -> Self {
        self.chick = Some(chick.into());
        self
    }

    /// Set the date of birth
    pub fn with_date_of_birth(mut self, dob: impl Into<String>) -> Self {
        self.date_of_birth = Some(dob.into());
        self
    }

    /// Set the claim expiry date
    pub fn with_claim_until(mut self, claim_until: NaiveDate) -> Self {
        self.claim_until = Some(claim_until);
        self
    }

    /// The entitlement window for this child, if the expiry date is known
    pub fn entitlement_window(&self) -> Option<EntitlementWindow> {
        self.claim_until.map(EntitlementWindow::from_claim_until)
    }
}
