//! Roster entry model

use serde::{Deserialize, Serialize};

use crate::services::names::normalize;

/// A child known to the main system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Identifier in the main system, when the source provides one
    #[serde(default)]
    pub id: Option<String>,
    /// Name as the main system spells it
    pub name: String,
    /// Where the entry came from (file name or similar)
    #[serde(default)]
    pub source: String,
}

impl RosterEntry {
    /// Create a roster entry
    pub fn new(id: Option<String>, name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            source: source.into(),
        }
    }

    /// Key used for de-duplication: the id if present, else the normalized name
    pub fn key(&self) -> String {
        match &self.id {
            Some(id) if !id.trim().is_empty() => format!("id:{}", id.trim()),
            _ => format!("name:{}", normalize(self.name.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefers_id() {
        let entry = RosterEntry::new(Some("abc123".into()), "Jane Doe", "a.csv");
        assert_eq!(entry.key(), "id:abc123");

        let entry = RosterEntry::new(None, "Jane  DOE", "a.csv");
        assert_eq!(entry.key(), "name:jane doe");

        let entry = RosterEntry::new(Some("  ".into()), "Jane Doe", "a.csv");
        assert_eq!(entry.key(), "name:jane doe");
    }
}
