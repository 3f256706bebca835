//! Service layer for funding reconciliation
//!
//! Name handling, allocation parsing, block consolidation, roster matching
//! and the reconciliation driver that ties them together.

pub mod allocation;
pub mod consolidation;
pub mod matcher;
pub mod names;
pub mod reconciliation;
pub mod registry;
pub mod resolver;

pub use consolidation::{consolidate, Consolidation};
pub use matcher::{exact_match, find_matches, MatchLimits};
pub use reconciliation::{ReconcileOptions, ReconciliationReport, ReconciliationService};
pub use registry::RosterRegistry;
pub use resolver::{resolve_interactively, Operator, ResolutionOutcome, ResolutionRequest};
