//! Roster registry
//!
//! Rosters can come from several sources in one run. The registry collects
//! them and keeps one entry per identifier (or per normalized name when a
//! source has no identifiers), preserving first-seen order. It is created by
//! the caller and passed into each loading step.

use std::collections::HashSet;

use crate::models::RosterEntry;

/// Deduplicating collection of roster entries
#[derive(Debug, Clone, Default)]
pub struct RosterRegistry {
    entries: Vec<RosterEntry>,
    seen: HashSet<String>,
}

impl RosterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry; returns false if its key was already present
    pub fn register(&mut self, entry: RosterEntry) -> bool {
        if entry.name.trim().is_empty() {
            return false;
        }
        if !self.seen.insert(entry.key()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Register many entries; returns how many were new
    pub fn extend(&mut self, entries: impl IntoIterator<Item = RosterEntry>) -> usize {
        let mut added = 0;
        for entry in entries {
            if self.register(entry) {
                added += 1;
            }
        }
        added
    }

    /// All entries in first-seen order
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Roster names in first-seen order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
