//! Name normalization and cleaning
//!
//! Two independent transforms. [`normalize`] exists only for comparing names
//! regardless of case and spacing; [`clean`] produces the form written to
//! exports. Both accept missing input and return an empty string for it.

use std::sync::OnceLock;

use regex::Regex;

static FATHER_WORD: OnceLock<Regex> = OnceLock::new();

fn father_word() -> &'static Regex {
    FATHER_WORD.get_or_init(|| Regex::new(r"(?i)\bfather\b").expect("father pattern is valid"))
}

/// Lowercase a name and collapse whitespace runs to single spaces
///
/// ```
/// use funding_recon::services::names::normalize;
/// assert_eq!(normalize("  Jane   DOE "), "jane doe");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize<'a>(name: impl Into<Option<&'a str>>) -> String {
    match name.into() {
        Some(name) => name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
        None => String::new(),
    }
}

/// Produce the display form of a name
///
/// Drops the standalone word "father", turns dashes into spaces, strips
/// everything that is not an ASCII letter, ASCII digit or whitespace, and
/// collapses whitespace. Case is preserved.
///
/// ```
/// use funding_recon::services::names::clean;
/// assert_eq!(clean("John O'Brien-Smith (Father)"), "John OBrien Smith");
/// ```
pub fn clean<'a>(name: impl Into<Option<&'a str>>) -> String {
    let Some(name) = name.into() else {
        return String::new();
    };

    let without_father = father_word().replace_all(name, "");

    let kept: String = without_father
        .replace('-', " ")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a name into its set of normalized words, in first-seen order
///
/// Dashes separate words as well as whitespace, so a double-barrelled
/// surname contributes both halves.
pub fn word_set(name: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for word in normalize(name).split(|c: char| c == ' ' || c == '-') {
        if !word.is_empty() && !words.iter().any(|w| w == word) {
            words.push(word.to_string());
        }
    }
    words
}
