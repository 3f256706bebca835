//! Roster match display formatting
//!
//! Also renders the screen shown to an operator for each unmatched child.

use crate::models::MatchCandidate;
use crate::services::resolver::{ResolutionOutcome, ResolutionRequest};

/// Format ranked candidates as a numbered list
pub fn format_candidate_list(candidates: &[MatchCandidate]) -> String {
    if candidates.is_empty() {
        return "No roster names share a word with this name.\n".to_string();
    }

    let mut output = String::new();
    for (idx, candidate) in candidates.iter().enumerate() {
        output.push_str(&format!("{}) {}", idx + 1, candidate.roster_name));
        if candidate.is_single_word() {
            output.push_str(" (single-word match)");
        }
        output.push('\n');
    }
    output
}

/// Format the screen for one resolution request
pub fn format_resolution_screen(request: &ResolutionRequest) -> String {
    let mut output = String::new();
    output.push_str(&format!("Processing: {} of {}\n\n", request.position, request.total));
    output.push_str(&format!("Unmatched Name: {}\n", request.display_name));
    if let Some(chick) = request.chick.as_deref().filter(|c| !c.is_empty()) {
        output.push_str(&format!("CHICK: {}\n", chick));
    }

    output.push_str("\nPossible Matches\n");
    output.push_str(&format_candidate_list(&request.candidates));
    output.push_str("\n0) No Match (skip)\n");

    if let Some(rejection) = &request.rejection {
        output.push_str(&format!("\n{}\n", rejection));
    }
    output
}

/// Format the end-of-session summary
pub fn format_session_summary(outcome: &ResolutionOutcome, total: usize) -> String {
    let mut output = String::new();
    if outcome.interrupted {
        output.push_str("Input closed; remaining children left unmatched.\n");
    }
    output.push_str(&format!("Processed {} of {} children\n", outcome.processed, total));
    output.push_str(&format!("Created {} manual matches\n", outcome.matches.len()));
    output.push_str(&format!("Skipped {} children\n", outcome.skipped));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ResolutionRequest {
        ResolutionRequest {
            position: 2,
            total: 3,
            raw_name: "Jon O'Smith".into(),
            display_name: "Jon OSmith".into(),
            chick: Some("CH7".into()),
            candidates: vec![MatchCandidate::new("Jon Smith", 2), MatchCandidate::new("Amy Jon", 1)],
            rejection: None,
        }
    }

    #[test]
    fn test_candidate_list_flags_single_word() {
        let output = format_candidate_list(&request().candidates);
        assert_eq!(output, "1) Jon Smith\n2) Amy Jon (single-word match)\n");
    }

    #[test]
    fn test_resolution_screen() {
        let mut req = request();
        req.rejection = Some("Please enter a number between 0 and 2".into());

        let output = format_resolution_screen(&req);

        assert!(output.starts_with("Processing: 2 of 3\n"));
        assert!(output.contains("Unmatched Name: Jon OSmith\n"));
        assert!(output.contains("CHICK: CH7\n"));
        assert!(output.contains("Possible Matches\n1) Jon Smith\n"));
        assert!(output.contains("0) No Match (skip)"));
        assert!(output.ends_with("Please enter a number between 0 and 2\n"));
    }

    #[test]
    fn test_session_summary() {
        let mut outcome = ResolutionOutcome::default();
        outcome.processed = 2;
        outcome.skipped = 1;
        outcome.matches.insert("Jon Smith".into(), "John Smith".into());

        let output = format_session_summary(&outcome, 3);
        assert!(output.contains("Processed 2 of 3 children"));
        assert!(output.contains("Created 1 manual matches"));
        assert!(output.contains("Skipped 1 children"));
    }
}
