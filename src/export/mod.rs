//! Export module for funding-recon
//!
//! - CSV: the auto-filler schedule, the uploader list, and the unmatched and
//!   no-funding reports
//! - JSON: a machine-readable report of the whole run

pub mod csv;
pub mod json;

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{FundingError, FundingResult};
use crate::services::reconciliation::ReconciliationReport;

pub use self::csv::{
    export_auto_filler_csv, export_no_funding_csv, export_unmatched_csv, export_uploader_csv,
};
pub use self::json::{export_report_json, JsonReport, REPORT_SCHEMA_VERSION};

/// Schedule consumed by the auto-filler
pub const AUTO_FILLER_FILE: &str = "forAutoFiller.csv";
/// Child list consumed by the uploader
pub const UPLOADER_FILE: &str = "toChildPathsUploader.csv";
/// Children left without a roster match
pub const UNMATCHED_FILE: &str = "unmatchedChildren.csv";
/// Children without funding records
pub const NO_FUNDING_FILE: &str = "noActiveFunding.csv";
/// Full JSON report
pub const REPORT_FILE: &str = "report.json";

/// Formatting choices for exported files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFormat {
    /// strftime format for dates
    pub date_format: String,
    /// Currency symbol prefixed to rates
    pub currency_symbol: String,
    /// Candidate columns in the unmatched report
    pub report_candidates: usize,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ExportFormat {
    /// Take formatting choices from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            date_format: settings.date_format.clone(),
            currency_symbol: settings.currency_symbol.clone(),
            report_candidates: settings.report_candidates,
        }
    }
}

/// Check that a strftime format string has no invalid specifiers
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Format a date, reporting bad format strings as errors instead of panicking
pub fn format_date(date: NaiveDate, format: &str) -> FundingResult<String> {
    if !is_valid_date_format(format) {
        return Err(FundingError::Export(format!("Invalid date format '{}'", format)));
    }
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| FundingError::Export(format!("Invalid date format '{}'", format)))?;
    Ok(out)
}

fn create(dir: &Path, name: &str) -> FundingResult<(PathBuf, BufWriter<File>)> {
    let path = dir.join(name);
    let file = File::create(&path)
        .map_err(|e| FundingError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    Ok((path, BufWriter::new(file)))
}

/// Write every output file for a run into `dir`
///
/// The schedule and uploader files are always written. The unmatched and
/// no-funding reports are only written when they have rows. Returns the
/// paths written, in order.
pub fn export_all(
    report: &ReconciliationReport,
    format: &ExportFormat,
    dir: &Path,
    include_json: bool,
) -> FundingResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| {
        FundingError::Export(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let mut written = Vec::new();
    let records = report.funding_records();

    let (path, mut out) = create(dir, AUTO_FILLER_FILE)?;
    export_auto_filler_csv(&records, format, &mut out)?;
    out.flush()?;
    written.push(path);

    let (path, mut out) = create(dir, UPLOADER_FILE)?;
    export_uploader_csv(&records, format, &mut out)?;
    out.flush()?;
    written.push(path);

    let unresolved = report.unresolved();
    if !unresolved.is_empty() {
        let (path, mut out) = create(dir, UNMATCHED_FILE)?;
        export_unmatched_csv(&unresolved, format, &mut out)?;
        out.flush()?;
        written.push(path);
    }

    let no_funding = report.no_funding();
    if !no_funding.is_empty() {
        let (path, mut out) = create(dir, NO_FUNDING_FILE)?;
        export_no_funding_csv(&no_funding, &mut out)?;
        out.flush()?;
        written.push(path);
    }

    if include_json {
        let (path, mut out) = create(dir, REPORT_FILE)?;
        export_report_json(report, &mut out, true)?;
        out.flush()?;
        written.push(path);
    }

    for path in &written {
        tracing::info!(path = %path.display(), "Wrote export file");
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationRow, ChildRecord};
    use crate::services::reconciliation::{ReconcileOptions, ReconciliationService};
    use tempfile::TempDir;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 17).unwrap();
        assert_eq!(format_date(date, "%d/%m/%Y").unwrap(), "17/08/2025");
        assert!(format_date(date, "%Q").is_err());
        assert!(is_valid_date_format("%Y-%m-%d"));
    }

    #[test]
    fn test_export_all_skips_empty_reports() {
        let temp_dir = TempDir::new().unwrap();
        let roster = vec!["Amy Byrne".to_string()];
        let children =
            vec![ChildRecord::new("Amy Byrne").with_claim_until(NaiveDate::from_ymd_opt(2025, 1, 19).unwrap())];
        let rows = vec![AllocationRow::new(
            "Amy Byrne",
            "20 hours x €2.00",
            NaiveDate::from_ymd_opt(2025, 1, 5),
        )];
        let report =
            ReconciliationService::new(&roster, ReconcileOptions::default()).reconcile(&children, &rows);

        let written = export_all(&report, &ExportFormat::default(), temp_dir.path(), false).unwrap();

        assert_eq!(written.len(), 2);
        assert!(temp_dir.path().join(AUTO_FILLER_FILE).exists());
        assert!(temp_dir.path().join(UPLOADER_FILE).exists());
        assert!(!temp_dir.path().join(UNMATCHED_FILE).exists());
        assert!(!temp_dir.path().join(NO_FUNDING_FILE).exists());
    }

    #[test]
    fn test_export_all_writes_reports_and_json() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("out");
        let roster = vec!["Amy Byrne".to_string()];
        let children = vec![ChildRecord::new("Zed Nobody")];
        let report =
            ReconciliationService::new(&roster, ReconcileOptions::default()).reconcile(&children, &[]);

        let written = export_all(&report, &ExportFormat::default(), &out_dir, true).unwrap();

        assert_eq!(written.len(), 5);
        assert!(out_dir.join(UNMATCHED_FILE).exists());
        assert!(out_dir.join(NO_FUNDING_FILE).exists());
        assert!(out_dir.join(REPORT_FILE).exists());
    }
}
