//! Roster name matching
//!
//! Exact matching compares normalized names. Fuzzy matching scores every
//! roster name by how many distinct words it shares with the query and
//! returns the best candidates.

use crate::models::MatchCandidate;

use super::names::{normalize, word_set};

/// Default number of candidates returned for a query
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Number of candidates returned when the best match shares a single word
pub const WEAK_MATCH_RESULTS: usize = 15;

/// Candidate limits for fuzzy matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Maximum candidates when the best score is above one word
    pub max_results: usize,
    /// Maximum candidates when the best score is exactly one word
    pub weak_match_results: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            weak_match_results: WEAK_MATCH_RESULTS,
        }
    }
}

impl MatchLimits {
    /// Limits with a custom `max_results` and the default weak-match limit
    pub fn with_max_results(max_results: usize) -> Self {
        Self {
            max_results,
            ..Self::default()
        }
    }
}

/// Find the first roster name equal to the query, ignoring case and spacing
pub fn exact_match<'r, S: AsRef<str>>(query: &str, roster: &'r [S]) -> Option<&'r str> {
    let wanted = normalize(query);
    if wanted.is_empty() {
        return None;
    }
    roster
        .iter()
        .map(|name| name.as_ref())
        .find(|name| normalize(*name) == wanted)
}

/// Rank roster names by words shared with the query
///
/// Candidates with no shared words are never returned. Ties keep roster
/// order. If the best candidate shares exactly one word, up to 15 candidates
/// are returned so the operator sees more of the weak options; otherwise at
/// most `max_results`.
pub fn find_matches<S: AsRef<str>>(
    query: &str,
    roster: &[S],
    max_results: usize,
) -> Vec<MatchCandidate> {
    find_matches_with(query, roster, MatchLimits::with_max_results(max_results))
}

/// [`find_matches`] with explicit limits
pub fn find_matches_with<S: AsRef<str>>(
    query: &str,
    roster: &[S],
    limits: MatchLimits,
) -> Vec<MatchCandidate> {
    let query_words = word_set(query);
    if query_words.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<MatchCandidate> = roster
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let shared = word_set(name)
                .iter()
                .filter(|word| query_words.contains(*word))
                .count();
            (shared > 0).then(|| MatchCandidate::new(name, shared))
        })
        .collect();

    // Stable: equal scores keep roster order
    candidates.sort_by(|a, b| b.shared_word_count.cmp(&a.shared_word_count));

    let limit = match candidates.first() {
        Some(best) if best.is_single_word() => limits.weak_match_results,
        _ => limits.max_results,
    };
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_ignores_case_and_spacing() {
        let roster = vec!["Jane Doe", "John  Smith"];
        assert_eq!(exact_match("john smith", &roster), Some("John  Smith"));
        assert_eq!(exact_match("JANE   DOE", &roster), Some("Jane Doe"));
        assert_eq!(exact_match("Jane", &roster), None);
        assert_eq!(exact_match("", &roster), None);
    }

    #[test]
    fn test_ranks_by_shared_words() {
        let roster = vec!["Sarah Brien", "John Smith", "Alice Jones"];
        let matches = find_matches("John O Brien Smith", &roster, 5);

        assert_eq!(
            matches,
            vec![
                MatchCandidate::new("John Smith", 2),
                MatchCandidate::new("Sarah Brien", 1),
            ]
        );
    }

    #[test]
    fn test_hyphenated_query_shares_words_with_both() {
        let roster = vec!["Sarah Brien", "John Smith"];
        let matches = find_matches("John O Brien-Smith", &roster, 5);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], MatchCandidate::new("John Smith", 2));
        assert_eq!(matches[1], MatchCandidate::new("Sarah Brien", 1));
    }

    #[test]
    fn test_never_returns_zero_score() {
        let roster = vec!["Alice Jones", "Bob Brown"];
        assert!(find_matches("Carol White", &roster, 5).is_empty());
        assert!(find_matches("", &roster, 5).is_empty());
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let roster = vec!["Amy Kelly", "Ben Kelly", "Cara Kelly"];
        let names: Vec<_> = find_matches("Dan Kelly", &roster, 5)
            .into_iter()
            .map(|m| m.roster_name)
            .collect();
        assert_eq!(names, vec!["Amy Kelly", "Ben Kelly", "Cara Kelly"]);
    }

    #[test]
    fn test_single_word_best_returns_up_to_fifteen() {
        let roster: Vec<String> = (0..20).map(|i| format!("Child{} Murphy", i)).collect();
        let matches = find_matches("Sean Murphy", &roster, 5);
        assert_eq!(matches.len(), 15);
        assert!(matches.iter().all(|m| m.shared_word_count == 1));
    }

    #[test]
    fn test_strong_best_caps_at_max_results() {
        let mut roster: Vec<String> = (0..10).map(|i| format!("Sean Murphy{}", i)).collect();
        roster.push("Sean Murphy".to_string());
        let matches = find_matches("Sean Murphy", &roster, 5);
        assert_eq!(matches.len(), 5);
        assert_eq!(matches[0], MatchCandidate::new("Sean Murphy", 2));
    }

    #[test]
    fn test_custom_weak_limit() {
        let roster: Vec<String> = (0..20).map(|i| format!("Kid{} Ryan", i)).collect();
        let limits = MatchLimits {
            max_results: 3,
            weak_match_results: 8,
        };
        assert_eq!(find_matches_with("Ryan", &roster, limits).len(), 8);
    }
}
