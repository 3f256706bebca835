//! Terminal operator for interactive resolution
//!
//! Prints the resolution screen and reads one line per reply. End of input is
//! reported as the operator going away.

use std::io::{BufRead, Write};

use crate::display::format_resolution_screen;
use crate::error::{FundingError, FundingResult};
use crate::services::resolver::{Operator, ResolutionRequest};

/// Prompt shown after every screen
pub const SELECT_PROMPT: &str = "Select option: ";

/// Operator backed by a line reader and a writer (normally stdin and stdout)
pub struct TerminalOperator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalOperator<R, W> {
    /// Create a new terminal operator
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Operator for TerminalOperator<R, W> {
    fn respond(&mut self, request: &ResolutionRequest) -> FundingResult<Option<String>> {
        write!(self.output, "\n{}\n{}", format_resolution_screen(request), SELECT_PROMPT)
            .and_then(|_| self.output.flush())
            .map_err(|e| FundingError::Resolution(format!("Failed to write prompt: {}", e)))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| FundingError::Resolution(format!("Failed to read reply: {}", e)))?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchCandidate, UnresolvedIdentity};
    use crate::services::resolver::resolve_interactively;

    fn unresolved() -> Vec<UnresolvedIdentity> {
        vec![
            UnresolvedIdentity {
                child_name: "Jon Smith".into(),
                chick: Some("CH1".into()),
                candidates: vec![MatchCandidate::new("John Smith", 1)],
            },
            UnresolvedIdentity {
                child_name: "Amy Bloggs".into(),
                chick: None,
                candidates: vec![MatchCandidate::new("Amy Blogs", 1)],
            },
        ]
    }

    #[test]
    fn test_terminal_session() {
        let input = "abc\n1\n0\n".as_bytes();
        let mut operator = TerminalOperator::new(input, Vec::new());

        let outcome = resolve_interactively(&unresolved(), &mut operator).unwrap();
        assert_eq!(outcome.matches.get("Jon Smith").map(String::as_str), Some("John Smith"));
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.rejected_replies, 1);

        let screen = String::from_utf8(operator.into_output()).unwrap();
        assert!(screen.contains("Processing: 1 of 2"));
        assert!(screen.contains("Unmatched Name: Jon Smith"));
        assert!(screen.contains("1) John Smith (single-word match)"));
        assert!(screen.contains("Please enter a number between 0 and 1"));
        assert!(screen.contains("Processing: 2 of 2"));
        assert_eq!(screen.matches(SELECT_PROMPT).count(), 3);
    }

    #[test]
    fn test_end_of_input() {
        let mut operator = TerminalOperator::new("".as_bytes(), Vec::new());
        let outcome = resolve_interactively(&unresolved(), &mut operator).unwrap();

        assert!(outcome.interrupted);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.processed, 0);
    }
}
