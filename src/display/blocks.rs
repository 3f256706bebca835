//! Funding block display formatting

use chrono::NaiveDate;

use crate::export::format_date;
use crate::models::block::format_rate;
use crate::models::{EntitlementWindow, FundingLevel};
use crate::services::consolidation::Consolidation;

/// Format one child's consolidated blocks, base claim and top-ups
pub fn format_consolidation(
    consolidation: &Consolidation,
    window: &EntitlementWindow,
    currency: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Entitlement window: {} to {}\n\n",
        show_date(window.start(), date_format),
        show_date(window.end(), date_format)
    ));

    if consolidation.is_empty() {
        output.push_str("No funding blocks inside the entitlement window.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<12}  {:<12}  {:>6}  {:>8}  {:>5}  {}\n",
        "Start", "End", "Hours", "Rate", "Days", ""
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<12}  {:->6}  {:->8}  {:->5}  {:-<6}\n",
        "", "", "", "", "", ""
    ));

    for block in &consolidation.blocks {
        let marker = match consolidation.base_claim {
            Some(base) if block.has_level(&base) => "base",
            Some(base) if block.hours > base.hours => "top-up",
            _ => "",
        };
        output.push_str(&format!(
            "{:<12}  {:<12}  {:>6}  {:>8}  {:>5}  {}\n",
            show_date(block.start, date_format),
            show_date(block.end, date_format),
            block.level().whole_hours(),
            format_rate(block.rate, currency),
            block.covered_days(),
            marker,
        ));
    }

    output.push('\n');
    if let Some(base) = consolidation.base_claim {
        output.push_str(&format!("Base claim: {}\n", describe_level(&base, currency)));
    }
    if let (Some(start), Some(end)) = (consolidation.coverage_start, consolidation.coverage_end) {
        output.push_str(&format!(
            "Coverage:   {} to {}\n",
            show_date(start, date_format),
            show_date(end, date_format)
        ));
    }

    let top_ups = consolidation.top_ups();
    if !top_ups.is_empty() {
        output.push_str("Top-ups:\n");
        for (block, extra) in top_ups {
            output.push_str(&format!(
                "  +{}h at {} from {} to {}\n",
                extra.trunc() as i64,
                format_rate(block.rate, currency),
                show_date(block.start, date_format),
                show_date(block.end, date_format)
            ));
        }
    }

    output
}

fn show_date(date: NaiveDate, date_format: &str) -> String {
    format_date(date, date_format).unwrap_or_else(|_| date.to_string())
}

fn describe_level(level: &FundingLevel, currency: &str) -> String {
    format!("{}h x {}", level.whole_hours(), level.format_rate(currency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AllocationFact;
    use crate::services::consolidation::consolidate;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_consolidation() {
        let window = EntitlementWindow::from_claim_until(date(2025, 1, 19));
        let facts = vec![
            AllocationFact::new(20.0, 2.0, date(2025, 1, 5)),
            AllocationFact::new(20.0, 2.0, date(2025, 1, 12)),
            AllocationFact::new(30.0, 3.0, date(2025, 1, 19)),
        ];
        let consolidation = consolidate(&facts, &window);

        let output = format_consolidation(&consolidation, &window, "€", "%d/%m/%Y");

        assert!(output.contains("Entitlement window: 22/01/2024 to 19/01/2025"));
        assert!(output.contains("Base claim: 20h x €2.00"));
        assert!(output.contains("Coverage:   30/12/2024 to 19/01/2025"));
        assert!(output.contains("+10h at €3.00 from 13/01/2025 to 19/01/2025"));
    }

    #[test]
    fn test_format_empty_consolidation() {
        let window = EntitlementWindow::from_claim_until(date(2025, 1, 19));
        let output = format_consolidation(&Consolidation::default(), &window, "€", "%d/%m/%Y");
        assert!(output.contains("No funding blocks"));
    }
}
