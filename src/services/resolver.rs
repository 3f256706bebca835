//! Interactive resolution of unmatched children
//!
//! Each unmatched child is put to an [`Operator`] as a [`ResolutionRequest`]
//! carrying the ranked candidates. The operator replies with a 1-based
//! candidate number, or `0` to leave the child unmatched. Anything else is
//! rejected and the same request is asked again with the rejection attached.
//! Children are presented strictly in input order, one at a time.

use std::collections::HashMap;

use thiserror::Error;

use crate::error::FundingResult;
use crate::models::{MatchCandidate, UnresolvedIdentity};
use crate::services::names::clean;

/// Reply that leaves a child unmatched
pub const SKIP_REPLY: &str = "0";

/// One question put to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// 1-based position of this child in the session
    pub position: usize,
    /// Number of children in the session
    pub total: usize,
    /// Name as it appears in the children table
    pub raw_name: String,
    /// Cleaned display form of the name
    pub display_name: String,
    /// Funding-subsidy identifier
    pub chick: Option<String>,
    /// Ranked candidates, presented 1-based
    pub candidates: Vec<MatchCandidate>,
    /// Why the previous reply to this request was rejected
    pub rejection: Option<String>,
}

/// Something that can answer resolution requests
///
/// Returning `Ok(None)` means the operator has gone away (for a terminal,
/// end of input). The session stops and the remaining children stay
/// unmatched.
pub trait Operator {
    /// Answer one request with a raw reply
    fn respond(&mut self, request: &ResolutionRequest) -> FundingResult<Option<String>>;
}

impl<F> Operator for F
where
    F: FnMut(&ResolutionRequest) -> FundingResult<Option<String>>,
{
    fn respond(&mut self, request: &ResolutionRequest) -> FundingResult<Option<String>> {
        self(request)
    }
}

/// A valid operator reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Leave the child unmatched
    Skip,
    /// Take the candidate at this 0-based index
    Choose(usize),
}

/// An operator reply that could not be accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSelection {
    /// Reply was not a whole number
    #[error("Please enter a number between 0 and {max}")]
    NotANumber { max: usize },

    /// Reply was a number with no matching option
    #[error("Invalid selection {choice}. Enter a number between 0 and {max}")]
    OutOfRange { choice: usize, max: usize },
}

/// Interpret a reply against a candidate list of the given length
pub fn parse_selection(reply: &str, candidate_count: usize) -> Result<Selection, InvalidSelection> {
    let choice: usize = reply.trim().parse().map_err(|_| InvalidSelection::NotANumber {
        max: candidate_count,
    })?;

    match choice {
        0 => Ok(Selection::Skip),
        n if n <= candidate_count => Ok(Selection::Choose(n - 1)),
        n => Err(InvalidSelection::OutOfRange {
            choice: n,
            max: candidate_count,
        }),
    }
}

/// What an interactive session produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// Original child name -> chosen roster name; skipped children are absent
    pub matches: HashMap<String, String>,
    /// Children the operator answered (matched or skipped)
    pub processed: usize,
    /// Children explicitly skipped
    pub skipped: usize,
    /// Replies rejected along the way
    pub rejected_replies: usize,
    /// Whether the operator went away before the session finished
    pub interrupted: bool,
}

/// Walk the operator through every unresolved child in order
pub fn resolve_interactively<O: Operator + ?Sized>(
    unresolved: &[UnresolvedIdentity],
    operator: &mut O,
) -> FundingResult<ResolutionOutcome> {
    let mut outcome = ResolutionOutcome::default();
    let total = unresolved.len();

    for (idx, child) in unresolved.iter().enumerate() {
        let mut request = ResolutionRequest {
            position: idx + 1,
            total,
            raw_name: child.child_name.clone(),
            display_name: clean(child.child_name.as_str()),
            chick: child.chick.clone(),
            candidates: child.candidates.clone(),
            rejection: None,
        };

        loop {
            let Some(reply) = operator.respond(&request)? else {
                tracing::info!(
                    remaining = total - idx,
                    "Operator input closed, leaving remaining children unmatched"
                );
                outcome.interrupted = true;
                return Ok(outcome);
            };

            match parse_selection(&reply, request.candidates.len()) {
                Ok(Selection::Skip) => {
                    outcome.skipped += 1;
                    break;
                }
                Ok(Selection::Choose(index)) => {
                    let chosen = request.candidates[index].roster_name.clone();
                    tracing::info!(child = %child.child_name, matched = %chosen, "Manual match recorded");
                    outcome.matches.insert(child.child_name.clone(), chosen);
                    break;
                }
                Err(err) => {
                    outcome.rejected_replies += 1;
                    request.rejection = Some(err.to_string());
                }
            }
        }

        outcome.processed += 1;
    }

    Ok(outcome)
}
