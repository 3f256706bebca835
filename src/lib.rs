//! funding-recon - childcare funding reconciliation
//!
//! Reconciles weekly childcare subsidy allocations against each child's
//! rolling 52-week entitlement window. Allocations are consolidated into
//! contiguous funding blocks, the level covering the most days becomes the
//! base claim, and blocks above it become top-ups. Children are matched to
//! the main system's roster exactly or by shared words, with an operator
//! resolving what remains.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (children, allocations, blocks, records)
//! - `services`: Parsing, matching, consolidation and the reconciliation driver
//! - `import`: CSV readers for the input tables
//! - `export`: CSV and JSON writers for the outputs
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use funding_recon::models::{AllocationRow, ChildRecord};
//! use funding_recon::services::{ReconcileOptions, ReconciliationService};
//!
//! let roster = vec!["Amy Byrne".to_string()];
//! let children = vec![ChildRecord::new("Amy Byrne")
//!     .with_claim_until(NaiveDate::from_ymd_opt(2025, 1, 19).unwrap())];
//! let rows = vec![AllocationRow::new(
//!     "Amy Byrne",
//!     "20 hours x €2.00",
//!     NaiveDate::from_ymd_opt(2025, 1, 5),
//! )];
//!
//! let report = ReconciliationService::new(&roster, ReconcileOptions::default())
//!     .reconcile(&children, &rows);
//! assert_eq!(report.funding_records().len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod services;

pub use error::{FundingError, FundingResult};
