//! JSON Export functionality
//!
//! Writes a machine-readable report of a whole run with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FundingError, FundingResult};
use crate::models::{FundingRecord, NoFundingEntry, UnresolvedIdentity};
use crate::services::reconciliation::{ReconciliationReport, ReconciliationSummary};

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Report timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that produced the report
    pub app_version: String,

    /// Headline counts
    pub summary: ReconciliationSummary,

    /// Funding records that were exported
    pub records: Vec<FundingRecord>,

    /// Children still without a roster match
    pub unresolved: Vec<UnresolvedIdentity>,

    /// Children without funding records
    pub no_funding: Vec<NoFundingEntry>,
}

impl JsonReport {
    /// Build a report from a finished run
    pub fn from_report(report: &ReconciliationReport) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            summary: report.summary(),
            records: report.funding_records(),
            unresolved: report.unresolved(),
            no_funding: report.no_funding(),
        }
    }
}

/// Export a run report to JSON
pub fn export_report_json<W: Write>(
    report: &ReconciliationReport,
    writer: &mut W,
    pretty: bool,
) -> FundingResult<()> {
    let export = JsonReport::from_report(report);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FundingError::Export(e.to_string()))?;

    Ok(())
}
