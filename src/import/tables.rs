//! CSV readers for the three input tables
//!
//! Each table has a `read_*` function over any reader (used by tests) and a
//! `load_*` wrapper that opens a file. Structural problems (unreadable file,
//! missing required column) are errors; bad cells only degrade their row.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::columns::{ChildrenColumns, FundingColumns, RosterColumns};
use super::dates::parse_date;
use crate::error::{FundingError, FundingResult};
use crate::models::{AllocationRow, ChildRecord, RosterEntry};
use crate::services::registry::RosterRegistry;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn open(path: &Path) -> FundingResult<std::fs::File> {
    std::fs::File::open(path)
        .map_err(|e| FundingError::Import(format!("Failed to open {}: {}", path.display(), e)))
}

/// Non-empty cell text at `idx`
fn cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Read the children table
pub fn read_children<R: Read>(reader: R) -> FundingResult<Vec<ChildRecord>> {
    let mut reader = csv_reader(reader);
    let columns = ChildrenColumns::detect(reader.headers()?)?;

    let mut children = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let Some(name) = cell(&record, columns.name) else {
            tracing::debug!(row = idx + 1, "Skipping children row without a name");
            continue;
        };

        let mut child = ChildRecord::new(name);
        child.chick = columns.chick.and_then(|c| cell(&record, c)).map(str::to_string);
        child.date_of_birth = columns
            .date_of_birth
            .and_then(|c| cell(&record, c))
            .map(str::to_string);

        if let Some(raw) = columns.claim_until.and_then(|c| cell(&record, c)) {
            child.claim_until = parse_date(raw);
            if child.claim_until.is_none() {
                tracing::warn!(child = %name, value = %raw, "Unparseable claim expiry date");
            }
            child.claim_until_raw = Some(raw.to_string());
        }

        children.push(child);
    }

    tracing::info!(count = children.len(), "Loaded children");
    Ok(children)
}

/// Load the children table from a file
pub fn load_children(path: &Path) -> FundingResult<Vec<ChildRecord>> {
    read_children(open(path)?)
}

/// Read the funding table
///
/// Dates that fail to parse are kept as `None` so the row can be counted and
/// dropped during allocation parsing.
pub fn read_allocations<R: Read>(reader: R) -> FundingResult<Vec<AllocationRow>> {
    let mut reader = csv_reader(reader);
    let columns = FundingColumns::detect(reader.headers()?)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let Some(child) = cell(&record, columns.child) else {
            continue;
        };
        let description = cell(&record, columns.description).unwrap_or_default();
        let date = cell(&record, columns.date).and_then(parse_date);

        rows.push(AllocationRow::new(child, description, date));
    }

    tracing::info!(count = rows.len(), "Loaded allocation rows");
    Ok(rows)
}

/// Load the funding table from a file
pub fn load_allocations(path: &Path) -> FundingResult<Vec<AllocationRow>> {
    read_allocations(open(path)?)
}

/// Read a roster table into `registry`; returns how many entries were new
pub fn read_roster_into<R: Read>(
    registry: &mut RosterRegistry,
    reader: R,
    source: &str,
) -> FundingResult<usize> {
    let mut reader = csv_reader(reader);
    let columns = RosterColumns::detect(reader.headers()?)?;

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result?;
        let Some(name) = cell(&record, columns.name) else {
            continue;
        };
        let id = columns.id.and_then(|c| cell(&record, c)).map(str::to_string);
        entries.push(RosterEntry::new(id, name, source));
    }

    let read = entries.len();
    let added = registry.extend(entries);
    tracing::info!(source, read, added, "Loaded roster");
    Ok(added)
}

/// Load a roster file into `registry`
pub fn load_roster_into(registry: &mut RosterRegistry, path: &Path) -> FundingResult<usize> {
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    read_roster_into(registry, open(path)?, &source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_children() {
        let data = "\u{feff}Child Name,Child Date of Birth,CHICK,Claim Until\n\
                    Amy Byrne,01/02/2021,CH1,19/01/2025\n\
                    ,02/02/2021,CH2,19/01/2025\n\
                    Tom Ryan,03/03/2022,,soon\n";

        let children = read_children(data.as_bytes()).unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].raw_name, "Amy Byrne");
        assert_eq!(children[0].chick.as_deref(), Some("CH1"));
        assert_eq!(children[0].date_of_birth.as_deref(), Some("01/02/2021"));
        assert_eq!(children[0].claim_until, NaiveDate::from_ymd_opt(2025, 1, 19));

        assert_eq!(children[1].chick, None);
        assert_eq!(children[1].claim_until, None);
        assert_eq!(children[1].claim_until_raw.as_deref(), Some("soon"));
    }

    #[test]
    fn test_read_children_requires_name_column() {
        let err = read_children("Pupil,CHICK\nAmy,CH1\n".as_bytes()).unwrap_err();
        assert!(err.is_missing_column());
    }

    #[test]
    fn test_read_allocations_keeps_bad_dates_as_none() {
        let data = "Approved Date,Child,Description,Date\n\
                    01/01/2025,Amy Byrne,Funded: 20 hours x €2.00,05/01/2025\n\
                    01/01/2025,Amy Byrne,Funded: 20 hours x €2.00,not a date\n";

        let rows = read_allocations(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].child_key, "Amy Byrne");
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 1, 5));
        assert_eq!(rows[1].date, None);
    }

    #[test]
    fn test_roster_files_are_deduplicated() {
        let mut registry = RosterRegistry::new();

        let first = "id,name\nc1,Amy Byrne\nc2,Tom Ryan\n";
        let second = "id,name\nc2,Thomas Ryan\nc3,Sarah Brien\n";

        assert_eq!(read_roster_into(&mut registry, first.as_bytes(), "a.csv").unwrap(), 2);
        assert_eq!(read_roster_into(&mut registry, second.as_bytes(), "b.csv").unwrap(), 1);
        assert_eq!(registry.names(), vec!["Amy Byrne", "Tom Ryan", "Sarah Brien"]);
    }

    #[test]
    fn test_load_roster_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name").unwrap();
        writeln!(file, "Amy Byrne").unwrap();
        writeln!(file, "amy  byrne").unwrap();

        let mut registry = RosterRegistry::new();
        let added = load_roster_into(&mut registry, file.path()).unwrap();

        assert_eq!(added, 1);
        assert!(registry.entries()[0].id.is_none());
    }

    #[test]
    fn test_missing_file_is_import_error() {
        let err = load_children(Path::new("/nonexistent/children.csv")).unwrap_err();
        assert!(matches!(err, FundingError::Import(_)));
    }
}
