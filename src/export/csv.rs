//! CSV Export functionality
//!
//! Writes the reconciliation outputs in the layouts the downstream upload
//! and auto-fill tools read.

use std::io::Write;

use csv::Writer;

use super::{format_date, ExportFormat};
use crate::error::FundingResult;
use crate::models::block::format_rate;
use crate::models::{FundingRecord, NoFundingEntry, UnresolvedIdentity};

/// UTF-8 byte-order mark; spreadsheet tools need it to read `€` correctly
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the auto-filler schedule: one row per funding record
///
/// `Claim Until` is the last day the record covers and `Funding Start` the
/// first, so a top-up row carries its own block range. The auto-filler reads
/// the columns in that order; the child's own expiry date follows at the end
/// as `Claim Expiry`.
pub fn export_auto_filler_csv<W: Write>(
    records: &[FundingRecord],
    format: &ExportFormat,
    writer: &mut W,
) -> FundingResult<()> {
    writer.write_all(UTF8_BOM)?;

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record([
        "Child",
        "CHICK",
        "Date of Birth",
        "Claim Until",
        "Funding Start",
        "Weekly Total",
        "Hour rate",
        "Type",
        "Claim Expiry",
    ])?;

    for record in records {
        let claim_expiry = match record.claim_until {
            Some(date) => format_date(date, &format.date_format)?,
            None => String::new(),
        };
        wtr.write_record([
            record.child.clone(),
            record.chick.clone().unwrap_or_default(),
            record.date_of_birth.clone().unwrap_or_default(),
            format_date(record.block_end, &format.date_format)?,
            format_date(record.block_start, &format.date_format)?,
            record.whole_hours().to_string(),
            format_rate(record.hour_rate, &format.currency_symbol),
            record.kind.to_string(),
            claim_expiry,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the uploader list: identity columns for each funding record
pub fn export_uploader_csv<W: Write>(
    records: &[FundingRecord],
    format: &ExportFormat,
    writer: &mut W,
) -> FundingResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Child", "CHICK", "Date of Birth", "Claim Until"])?;

    for record in records {
        wtr.write_record([
            record.child.clone(),
            record.chick.clone().unwrap_or_default(),
            record.date_of_birth.clone().unwrap_or_default(),
            format_date(record.block_end, &format.date_format)?,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the unmatched report with a fixed number of candidate columns
pub fn export_unmatched_csv<W: Write>(
    unresolved: &[UnresolvedIdentity],
    format: &ExportFormat,
    writer: &mut W,
) -> FundingResult<()> {
    let columns = format.report_candidates;

    let mut header = vec!["Child Name".to_string(), "CHICK".to_string()];
    header.extend((1..=columns).map(|n| format!("Potential Match {}", n)));

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(&header)?;

    for child in unresolved {
        let mut row = vec![child.child_name.clone(), child.chick.clone().unwrap_or_default()];
        row.extend((0..columns).map(|i| {
            child
                .candidates
                .get(i)
                .map(|c| c.roster_name.clone())
                .unwrap_or_default()
        }));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the list of children without funding records
pub fn export_no_funding_csv<W: Write>(
    entries: &[NoFundingEntry],
    writer: &mut W,
) -> FundingResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Child Name", "CHICK", "Claim Until", "Reason"])?;

    for entry in entries {
        wtr.write_record([
            entry.child_name.clone(),
            entry.chick.clone().unwrap_or_default(),
            entry.claim_until.clone().unwrap_or_default(),
            entry.reason.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchCandidate, NoFundingReason, RecordKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(kind: RecordKind, hours: f64, rate: f64) -> FundingRecord {
        FundingRecord {
            child_key: "amy  byrne".into(),
            child: "amy byrne".into(),
            chick: Some("CH1".into()),
            date_of_birth: Some("01/02/2021".into()),
            claim_until: Some(date(2025, 1, 19)),
            weekly_hours: hours,
            hour_rate: rate,
            block_start: date(2024, 12, 30),
            block_end: date(2025, 1, 19),
            kind,
        }
    }

    #[test]
    fn test_auto_filler_has_bom_and_rows() {
        let records = vec![
            record(RecordKind::Base, 20.5, 2.0),
            record(RecordKind::TopUp, 10.0, 3.25),
        ];
        let mut output = Vec::new();
        export_auto_filler_csv(&records, &ExportFormat::default(), &mut output).unwrap();

        assert!(output.starts_with(UTF8_BOM));
        let text = String::from_utf8(output[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Child,CHICK,Date of Birth,Claim Until,Funding Start,Weekly Total,Hour rate,Type,Claim Expiry"
        );
        assert_eq!(
            lines[1],
            "amy byrne,CH1,01/02/2021,19/01/2025,30/12/2024,20,€2.00,Base,19/01/2025"
        );
        assert_eq!(
            lines[2],
            "amy byrne,CH1,01/02/2021,19/01/2025,30/12/2024,10,€3.25,Top-up,19/01/2025"
        );
    }

    #[test]
    fn test_auto_filler_keeps_block_end_apart_from_claim_expiry() {
        let mut top_up = record(RecordKind::TopUp, 10.0, 3.0);
        top_up.block_start = date(2025, 1, 6);
        top_up.block_end = date(2025, 1, 12);
        let mut output = Vec::new();
        export_auto_filler_csv(&[top_up], &ExportFormat::default(), &mut output).unwrap();

        let text = String::from_utf8(output[UTF8_BOM.len()..].to_vec()).unwrap();
        assert!(text.contains("amy byrne,CH1,01/02/2021,12/01/2025,06/01/2025,10,€3.00,Top-up,19/01/2025"));
    }

    #[test]
    fn test_uploader_uses_configured_date_format() {
        let format = ExportFormat {
            date_format: "%Y-%m-%d".into(),
            ..ExportFormat::default()
        };
        let mut output = Vec::new();
        export_uploader_csv(&[record(RecordKind::Base, 20.0, 2.0)], &format, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Child,CHICK,Date of Birth,Claim Until\n"));
        assert!(text.contains("amy byrne,CH1,01/02/2021,2025-01-19"));
    }

    #[test]
    fn test_unmatched_pads_candidate_columns() {
        let unresolved = vec![UnresolvedIdentity {
            child_name: "Jon Smith".into(),
            chick: None,
            candidates: vec![
                MatchCandidate::new("John Smith", 1),
                MatchCandidate::new("Jon Smyth", 1),
            ],
        }];
        let format = ExportFormat {
            report_candidates: 3,
            ..ExportFormat::default()
        };
        let mut output = Vec::new();
        export_unmatched_csv(&unresolved, &format, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Child Name,CHICK,Potential Match 1,Potential Match 2,Potential Match 3"
        );
        assert_eq!(lines[1], "Jon Smith,,John Smith,Jon Smyth,");
    }

    #[test]
    fn test_no_funding_report() {
        let entries = vec![NoFundingEntry {
            child_name: "Tom Ryan".into(),
            chick: Some("CH2".into()),
            claim_until: Some("sometime".into()),
            reason: NoFundingReason::NoEntitlementWindow,
        }];
        let mut output = Vec::new();
        export_no_funding_csv(&entries, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Child Name,CHICK,Claim Until,Reason\n"));
        assert!(text.contains("Tom Ryan,CH2,sometime,No claim expiry date"));
    }
}
