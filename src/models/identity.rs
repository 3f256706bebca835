//! Child identity and roster matching models

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::names::clean;

/// How a child's name was tied to the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Case/whitespace-insensitive equality with a roster name
    Exact,
    /// Chosen by an operator during interactive resolution
    Manual,
    /// No roster name tied to this child
    #[default]
    Unmatched,
}

impl MatchKind {
    /// Check if the child is tied to a roster name
    pub fn is_identified(&self) -> bool {
        !matches!(self, Self::Unmatched)
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "Yes"),
            Self::Manual => write!(f, "Manual Match"),
            Self::Unmatched => write!(f, "No"),
        }
    }
}

/// A child's roster identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildIdentity {
    /// Name as it appears in the children table
    pub raw_name: String,
    /// Display form of the raw name
    pub cleaned_name: String,
    /// Roster name this child is tied to
    pub roster_match: Option<String>,
    /// How the roster match was made
    pub match_kind: MatchKind,
}

impl ChildIdentity {
    /// Create an unmatched identity
    pub fn unmatched(raw_name: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        Self {
            cleaned_name: clean(raw_name.as_str()),
            raw_name,
            roster_match: None,
            match_kind: MatchKind::Unmatched,
        }
    }

    /// Create an identity exactly matched to a roster name
    pub fn exact(raw_name: impl Into<String>, roster_name: impl Into<String>) -> Self {
        let mut identity = Self::unmatched(raw_name);
        identity.roster_match = Some(roster_name.into());
        identity.match_kind = MatchKind::Exact;
        identity
    }

    /// Record an operator's choice
    pub fn set_manual(&mut self, roster_name: impl Into<String>) {
        self.roster_match = Some(roster_name.into());
        self.match_kind = MatchKind::Manual;
    }

    /// Name used in exported records
    ///
    /// Manual matches adopt the cleaned roster spelling; everything else uses
    /// the cleaned raw name.
    pub fn display_name(&self) -> String {
        match (&self.match_kind, &self.roster_match) {
            (MatchKind::Manual, Some(roster)) => clean(roster.as_str()),
            _ => self.cleaned_name.clone(),
        }
    }
}

/// A roster name scored against a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Roster name as given
    pub roster_name: String,
    /// Number of distinct words shared with the query (always >= 1)
    pub shared_word_count: usize,
}

impl MatchCandidate {
    /// Create a new candidate
    pub fn new(roster_name: impl Into<String>, shared_word_count: usize) -> Self {
        Self {
            roster_name: roster_name.into(),
            shared_word_count,
        }
    }

    /// Check if only one word is shared
    pub fn is_single_word(&self) -> bool {
        self.shared_word_count == 1
    }
}
