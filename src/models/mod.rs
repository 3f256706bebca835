//! Core data models for funding reconciliation
//!
//! Children, allocation rows, entitlement windows, funding blocks, roster
//! identities and the records produced by a reconciliation run.

pub mod allocation;
pub mod block;
pub mod child;
pub mod identity;
pub mod record;
pub mod roster;
pub mod window;

pub use allocation::{AllocationFact, AllocationRow};
pub use block::{FundingBlock, FundingLevel};
pub use child::ChildRecord;
pub use identity::{ChildIdentity, MatchCandidate, MatchKind};
pub use record::{FundingRecord, NoFundingEntry, NoFundingReason, RecordKind, UnresolvedIdentity};
pub use roster::RosterEntry;
pub use window::EntitlementWindow;
