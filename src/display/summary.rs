//! Run summary display formatting

use crate::models::NoFundingEntry;
use crate::services::reconciliation::ReconciliationSummary;

/// Format the headline counts of a run
pub fn format_run_summary(summary: &ReconciliationSummary) -> String {
    let rows = [
        ("Children processed", summary.children),
        ("With funding data", summary.with_funding),
        ("Found in roster", summary.exact_matches),
        ("Manually matched", summary.manual_matches),
        ("Not found in roster", summary.unmatched),
        ("Without funding", summary.no_funding),
        ("Funding records", summary.records),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut output = String::new();
    for (label, count) in rows {
        output.push_str(&format!(
            "{:<label_width$}  {:>6}\n",
            label,
            count,
            label_width = label_width
        ));
    }
    output
}

/// Format children without funding records as a table
pub fn format_no_funding_list(entries: &[NoFundingEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let name_width = entries
        .iter()
        .map(|e| e.child_name.len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<10}  {}\n",
        "Child",
        "CHICK",
        "Reason",
        name_width = name_width
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<10}  {:-<6}\n",
        "",
        "",
        "",
        name_width = name_width
    ));
    for entry in entries {
        output.push_str(&format!(
            "{:<name_width$}  {:<10}  {}\n",
            entry.child_name,
            entry.chick.as_deref().unwrap_or(""),
            entry.reason,
            name_width = name_width
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoFundingReason;

    #[test]
    fn test_run_summary() {
        let summary = ReconciliationSummary {
            children: 4,
            with_funding: 3,
            exact_matches: 2,
            manual_matches: 1,
            unmatched: 1,
            no_funding: 1,
            records: 5,
        };
        let output = format_run_summary(&summary);

        assert_eq!(output.lines().count(), 7);
        assert!(output.lines().next().unwrap().starts_with("Children processed"));
        assert!(output.lines().next().unwrap().ends_with('4'));
    }

    #[test]
    fn test_no_funding_list() {
        assert!(format_no_funding_list(&[]).is_empty());

        let output = format_no_funding_list(&[NoFundingEntry {
            child_name: "Tom Ryan".into(),
            chick: None,
            claim_until: None,
            reason: NoFundingReason::NoEntitlementWindow,
        }]);
        assert!(output.contains("Tom Ryan"));
        assert!(output.contains("No claim expiry date"));
    }
}
