//! Block consolidation and base claim detection
//!
//! Turns a child's weekly allocation facts into the smallest set of
//! contiguous funding blocks inside the entitlement window, then picks the
//! base claim: the (hours, rate) level covering the most days.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{AllocationFact, EntitlementWindow, FundingBlock, FundingLevel};

/// Result of consolidating one child's allocations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consolidation {
    /// Merged blocks, ordered by start date and pairwise non-overlapping
    pub blocks: Vec<FundingBlock>,
    /// Level with the most covered days, if any block survived
    pub base_claim: Option<FundingLevel>,
    /// Earliest block start
    pub coverage_start: Option<NaiveDate>,
    /// Latest block end
    pub coverage_end: Option<NaiveDate>,
}

/// Total covered days for one funding level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelTotal {
    /// The (hours, rate) pair
    pub level: FundingLevel,
    /// Sum of covered days across all blocks with this level
    pub days: i64,
}

impl Consolidation {
    /// Check if nothing survived clipping
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total covered days per distinct level, in order of first appearance
    pub fn level_totals(&self) -> Vec<LevelTotal> {
        level_totals(&self.blocks)
    }

    /// Total days covered by all blocks
    pub fn covered_days(&self) -> i64 {
        self.blocks.iter().map(FundingBlock::covered_days).sum()
    }

    /// Blocks at least one whole hour above the base claim, with the hours above base
    ///
    /// Blocks at the base level are never top-ups. Blocks at or below the
    /// base hours (a different rate at the same hours, or fewer hours) are
    /// not reported either, and neither are blocks less than an hour above.
    pub fn top_ups(&self) -> Vec<(FundingBlock, f64)> {
        let Some(base) = self.base_claim else {
            return Vec::new();
        };

        self.blocks
            .iter()
            .filter(|block| !block.has_level(&base))
            .map(|block| (*block, block.hours - base.hours))
            .filter(|(_, extra)| extra.trunc() > 0.0)
            .collect()
    }
}

/// Clip, merge and summarise a child's allocation facts
///
/// Facts whose week lies entirely outside `window` are dropped; the rest are
/// clipped to it. Repeated rows for the same week and level count once.
/// Facts sharing (hours, rate) merge only when the later one starts exactly
/// one day after the current block ends.
pub fn consolidate(facts: &[AllocationFact], window: &EntitlementWindow) -> Consolidation {
    let mut clipped: Vec<FundingBlock> = facts
        .iter()
        .filter(|fact| window.overlaps(fact.week_start(), fact.week_end))
        .map(|fact| {
            let (start, end) = window.clip(fact.week_start(), fact.week_end);
            FundingBlock::new(fact.hours, fact.rate, start, end)
        })
        .collect();

    if clipped.is_empty() {
        return Consolidation::default();
    }

    clipped.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.end.cmp(&b.end))
            .then(a.hours.total_cmp(&b.hours))
            .then(a.rate.total_cmp(&b.rate))
    });
    clipped.dedup();

    let blocks = merge_adjacent(clipped);
    let base_claim = select_base_claim(&level_totals(&blocks));
    let coverage_start = blocks.iter().map(|b| b.start).min();
    let coverage_end = blocks.iter().map(|b| b.end).max();

    Consolidation {
        blocks,
        base_claim,
        coverage_start,
        coverage_end,
    }
}

/// Merge start-ordered blocks that share a level and touch day-to-day
fn merge_adjacent(sorted: Vec<FundingBlock>) -> Vec<FundingBlock> {
    let mut merged: Vec<FundingBlock> = Vec::with_capacity(sorted.len());

    for block in sorted {
        match merged.last_mut() {
            Some(current)
                if current.has_level(&block.level())
                    && block.start == current.end + Duration::days(1) =>
            {
                current.end = block.end;
            }
            _ => merged.push(block),
        }
    }

    merged
}

/// Sum covered days per distinct level, in order of first appearance
pub fn level_totals(blocks: &[FundingBlock]) -> Vec<LevelTotal> {
    let mut totals: Vec<LevelTotal> = Vec::new();

    for block in blocks {
        match totals.iter_mut().find(|t| block.has_level(&t.level)) {
            Some(total) => total.days += block.covered_days(),
            None => totals.push(LevelTotal {
                level: block.level(),
                days: block.covered_days(),
            }),
        }
    }

    totals
}

/// Pick the level with the most days; ties go to the lowest hours
///
/// A tie on hours as well falls back to the lowest rate so the choice never
/// depends on input order.
pub fn select_base_claim(totals: &[LevelTotal]) -> Option<FundingLevel> {
    totals
        .iter()
        .min_by(|a, b| {
            b.days
                .cmp(&a.days)
                .then(a.level.hours.total_cmp(&b.level.hours))
                .then(a.level.rate.total_cmp(&b.level.rate))
        })
        .map(|total| total.level)
}
