//! Column detection from header records

use csv::StringRecord;

use crate::error::{FundingError, FundingResult};

/// Header cell with surrounding whitespace and any byte-order mark removed
fn header_text(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

/// Index of the first header satisfying `pred`
fn find_column(headers: &StringRecord, pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers.iter().position(|h| pred(header_text(h)))
}

/// Column positions in the children table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildrenColumns {
    /// Child name (header contains "Child")
    pub name: usize,
    /// Date of birth (header contains "Birth")
    pub date_of_birth: Option<usize>,
    /// Subsidy identifier (header contains "CHICK")
    pub chick: Option<usize>,
    /// Claim expiry (header contains "Claim Until")
    pub claim_until: Option<usize>,
}

impl ChildrenColumns {
    /// Detect columns from the header record
    ///
    /// Only the name column is required; children without an expiry column
    /// simply end up with no entitlement window.
    pub fn detect(headers: &StringRecord) -> FundingResult<Self> {
        let name = find_column(headers, |h| h.contains("Child") && !h.contains("Birth"))
            .ok_or_else(|| FundingError::missing_column("Children", "Child"))?;

        Ok(Self {
            name,
            date_of_birth: find_column(headers, |h| h.contains("Birth")),
            chick: find_column(headers, |h| h.contains("CHICK")),
            claim_until: find_column(headers, |h| h.contains("Claim Until")),
        })
    }
}

/// Column positions in the funding table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingColumns {
    /// Child name (header contains "Child")
    pub child: usize,
    /// Allocation description (header contains "Description")
    pub description: usize,
    /// Week-ending date (header contains "Date" but not "Approved")
    pub date: usize,
}

impl FundingColumns {
    /// Detect columns from the header record; all three are required
    pub fn detect(headers: &StringRecord) -> FundingResult<Self> {
        let child = find_column(headers, |h| h.contains("Child"))
            .ok_or_else(|| FundingError::missing_column("Funding", "Child"))?;
        let description = find_column(headers, |h| h.contains("Description"))
            .ok_or_else(|| FundingError::missing_column("Funding", "Description"))?;
        let date = find_column(headers, |h| h.contains("Date") && !h.contains("Approved"))
            .ok_or_else(|| FundingError::missing_column("Funding", "Date"))?;

        Ok(Self {
            child,
            description,
            date,
        })
    }
}

/// Column positions in a roster table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterColumns {
    /// Child name
    pub name: usize,
    /// Identifier in the main system
    pub id: Option<usize>,
}

impl RosterColumns {
    /// Detect columns from the header record
    ///
    /// A header equal to `name` (any case) wins; otherwise the first header
    /// containing it. The optional identifier is a header equal to `id` or
    /// `childid`.
    pub fn detect(headers: &StringRecord) -> FundingResult<Self> {
        let lower: Vec<String> = headers
            .iter()
            .map(|h| header_text(h).to_lowercase())
            .collect();

        let name = lower
            .iter()
            .position(|h| h == "name")
            .or_else(|| lower.iter().position(|h| h.contains("name")))
            .ok_or_else(|| FundingError::missing_column("Roster", "name"))?;
        let id = lower
            .iter()
            .position(|h| matches!(h.as_str(), "id" | "childid" | "child id"));

        Ok(Self { name, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    #[test]
    fn test_children_columns() {
        let cols = ChildrenColumns::detect(&headers(&[
            "\u{feff}Child Date of Birth",
            "Child Name",
            "CHICK Number",
            "Claim Until Date",
        ]))
        .unwrap();

        assert_eq!(cols.name, 1);
        assert_eq!(cols.date_of_birth, Some(0));
        assert_eq!(cols.chick, Some(2));
        assert_eq!(cols.claim_until, Some(3));
    }

    #[test]
    fn test_children_name_is_required() {
        let err = ChildrenColumns::detect(&headers(&["Pupil", "CHICK"])).unwrap_err();
        assert!(err.is_missing_column());
        assert_eq!(err.to_string(), "Children table has no column matching 'Child'");
    }

    #[test]
    fn test_funding_date_skips_approved() {
        let cols = FundingColumns::detect(&headers(&[
            "Approved Date",
            "Child",
            "Description",
            "Week Ending Date",
        ]))
        .unwrap();

        assert_eq!(cols.child, 1);
        assert_eq!(cols.description, 2);
        assert_eq!(cols.date, 3);

        let err = FundingColumns::detect(&headers(&["Child", "Description", "Approved Date"]))
            .unwrap_err();
        assert!(err.is_missing_column());
    }

    #[test]
    fn test_roster_columns() {
        let cols = RosterColumns::detect(&headers(&["childId", "Full Name", "Name"])).unwrap();
        assert_eq!(cols.name, 2);
        assert_eq!(cols.id, Some(0));

        let cols = RosterColumns::detect(&headers(&["Child Name"])).unwrap();
        assert_eq!(cols.name, 0);
        assert_eq!(cols.id, None);

        assert!(RosterColumns::detect(&headers(&["Pupil", "Room"])).is_err());
    }
}
