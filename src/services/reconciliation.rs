//! Reconciliation service
//!
//! Drives one batch: for every child it parses allocation rows, consolidates
//! them against the child's entitlement window, resolves the child's roster
//! identity and assembles the output records. Problems with one child never
//! stop the batch; they are recorded on that child's outcome instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    AllocationRow, ChildIdentity, ChildRecord, FundingRecord, MatchCandidate, MatchKind,
    NoFundingEntry, NoFundingReason, RecordKind, UnresolvedIdentity,
};
use crate::services::allocation::parse_rows;
use crate::services::consolidation::{consolidate, Consolidation};
use crate::services::matcher::{exact_match, find_matches_with, MatchLimits};

/// Options controlling a reconciliation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Candidate limits for fuzzy matching
    pub limits: MatchLimits,
    /// Emit funding records for children left unmatched
    pub include_unmatched_funding: bool,
}

/// Everything learned about one child
#[derive(Debug, Clone, Serialize)]
pub struct ChildOutcome {
    /// The input record
    pub child: ChildRecord,
    /// Roster identity
    pub identity: ChildIdentity,
    /// Ranked roster candidates (empty for exact matches)
    pub candidates: Vec<MatchCandidate>,
    /// Consolidated funding, when a window could be derived
    pub consolidation: Option<Consolidation>,
    /// Why the child has no funding records, if it has none
    pub no_funding: Option<NoFundingReason>,
    /// Allocation rows that could not be parsed
    pub dropped_rows: usize,
}

impl ChildOutcome {
    /// Check if this child has a base claim
    pub fn has_funding(&self) -> bool {
        self.no_funding.is_none()
    }

    /// Funding records for this child: the base claim, then each top-up
    pub fn records(&self) -> Vec<FundingRecord> {
        let Some(consolidation) = &self.consolidation else {
            return Vec::new();
        };
        let (Some(base), Some(start), Some(end)) = (
            consolidation.base_claim,
            consolidation.coverage_start,
            consolidation.coverage_end,
        ) else {
            return Vec::new();
        };

        let child = self.identity.display_name();
        let record = |kind, weekly_hours, hour_rate, block_start, block_end| FundingRecord {
            child_key: self.child.raw_name.clone(),
            child: child.clone(),
            chick: self.child.chick.clone(),
            date_of_birth: self.child.date_of_birth.clone(),
            claim_until: self.child.claim_until,
            weekly_hours,
            hour_rate,
            block_start,
            block_end,
            kind,
        };

        let mut records = vec![record(RecordKind::Base, base.hours, base.rate, start, end)];
        for (block, extra_hours) in consolidation.top_ups() {
            records.push(record(
                RecordKind::TopUp,
                extra_hours,
                block.rate,
                block.start,
                block.end,
            ));
        }
        records
    }
}

/// Headline counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    /// Children processed
    pub children: usize,
    /// Children with a base claim
    pub with_funding: usize,
    /// Children matched exactly to the roster
    pub exact_matches: usize,
    /// Children matched by an operator
    pub manual_matches: usize,
    /// Children with no roster match
    pub unmatched: usize,
    /// Children without funding records
    pub no_funding: usize,
    /// Funding records that will be exported
    pub records: usize,
}

/// The result of a reconciliation run
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    /// Per-child outcomes in input order
    pub outcomes: Vec<ChildOutcome>,
    /// Whether unmatched children contribute funding records
    pub include_unmatched_funding: bool,
}

impl ReconciliationReport {
    /// Funding records for export, in child order
    pub fn funding_records(&self) -> Vec<FundingRecord> {
        self.outcomes
            .iter()
            .filter(|o| self.include_unmatched_funding || o.identity.match_kind.is_identified())
            .flat_map(ChildOutcome::records)
            .collect()
    }

    /// Children still without a roster match, in input order
    pub fn unresolved(&self) -> Vec<UnresolvedIdentity> {
        self.outcomes
            .iter()
            .filter(|o| o.identity.match_kind == MatchKind::Unmatched)
            .map(|o| UnresolvedIdentity {
                child_name: o.child.raw_name.clone(),
                chick: o.child.chick.clone(),
                candidates: o.candidates.clone(),
            })
            .collect()
    }

    /// Children that produced no funding records, and why
    pub fn no_funding(&self) -> Vec<NoFundingEntry> {
        self.outcomes
            .iter()
            .filter_map(|o| {
                o.no_funding.map(|reason| NoFundingEntry {
                    child_name: o.child.raw_name.clone(),
                    chick: o.child.chick.clone(),
                    claim_until: o.child.claim_until_raw.clone(),
                    reason,
                })
            })
            .collect()
    }

    /// Merge operator choices back into the outcomes
    ///
    /// Only children that are still unmatched are updated. Returns the number
    /// of outcomes changed.
    pub fn apply_manual_matches(&mut self, matches: &HashMap<String, String>) -> usize {
        let mut applied = 0;
        for outcome in &mut self.outcomes {
            if outcome.identity.match_kind != MatchKind::Unmatched {
                continue;
            }
            if let Some(roster_name) = matches.get(&outcome.child.raw_name) {
                outcome.identity.set_manual(roster_name.clone());
                applied += 1;
            }
        }
        applied
    }

    /// Headline counts
    pub fn summary(&self) -> ReconciliationSummary {
        let count_kind =
            |kind: MatchKind| self.outcomes.iter().filter(|o| o.identity.match_kind == kind).count();

        ReconciliationSummary {
            children: self.outcomes.len(),
            with_funding: self.outcomes.iter().filter(|o| o.has_funding()).count(),
            exact_matches: count_kind(MatchKind::Exact),
            manual_matches: count_kind(MatchKind::Manual),
            unmatched: count_kind(MatchKind::Unmatched),
            no_funding: self.outcomes.iter().filter(|o| !o.has_funding()).count(),
            records: self.funding_records().len(),
        }
    }
}

/// Service for reconciliation runs
pub struct ReconciliationService<'a> {
    roster: &'a [String],
    options: ReconcileOptions,
}

impl<'a> ReconciliationService<'a> {
    /// Create a new reconciliation service over a roster
    pub fn new(roster: &'a [String], options: ReconcileOptions) -> Self {
        Self { roster, options }
    }

    /// Reconcile every child against its allocation rows
    pub fn reconcile(&self, children: &[ChildRecord], rows: &[AllocationRow]) -> ReconciliationReport {
        let mut rows_by_child: HashMap<&str, Vec<&AllocationRow>> = HashMap::new();
        for row in rows {
            rows_by_child.entry(row.child_key.as_str()).or_default().push(row);
        }

        tracing::info!(
            children = children.len(),
            rows = rows.len(),
            roster = self.roster.len(),
            "Starting reconciliation"
        );

        let outcomes = children
            .iter()
            .map(|child| {
                let child_rows = rows_by_child
                    .get(child.raw_name.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                self.reconcile_child(child, child_rows)
            })
            .collect();

        ReconciliationReport {
            outcomes,
            include_unmatched_funding: self.options.include_unmatched_funding,
        }
    }

    /// Reconcile a single child
    pub fn reconcile_child(&self, child: &ChildRecord, rows: &[&AllocationRow]) -> ChildOutcome {
        let (identity, candidates) = self.identify(&child.raw_name);

        let mut outcome = ChildOutcome {
            child: child.clone(),
            identity,
            candidates,
            consolidation: None,
            no_funding: None,
            dropped_rows: 0,
        };

        let Some(window) = child.entitlement_window() else {
            tracing::warn!(child = %child.raw_name, "No claim expiry date, skipping consolidation");
            outcome.no_funding = Some(NoFundingReason::NoEntitlementWindow);
            return outcome;
        };

        let parsed = parse_rows(rows.iter().copied());
        outcome.dropped_rows = parsed.dropped();

        if parsed.facts.is_empty() {
            tracing::warn!(
                child = %child.raw_name,
                rows = rows.len(),
                "No valid allocation rows"
            );
            outcome.no_funding = Some(NoFundingReason::NoValidAllocations);
            return outcome;
        }

        let consolidation = consolidate(&parsed.facts, &window);
        if consolidation.is_empty() {
            tracing::warn!(child = %child.raw_name, %window, "No allocations inside entitlement window");
            outcome.no_funding = Some(NoFundingReason::NoActiveFunding);
        } else {
            tracing::debug!(
                child = %child.raw_name,
                blocks = consolidation.blocks.len(),
                "Consolidated allocations"
            );
        }
        outcome.consolidation = Some(consolidation);
        outcome
    }

    /// Exact roster match, or the ranked fuzzy candidates
    pub fn identify(&self, raw_name: &str) -> (ChildIdentity, Vec<MatchCandidate>) {
        if let Some(roster_name) = exact_match(raw_name, self.roster) {
            return (ChildIdentity::exact(raw_name, roster_name), Vec::new());
        }

        let candidates = find_matches_with(raw_name, self.roster, self.options.limits);
        if candidates.is_empty() {
            tracing::debug!(child = %raw_name, "No roster candidates");
        }
        (ChildIdentity::unmatched(raw_name), candidates)
    }
}
