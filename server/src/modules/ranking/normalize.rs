//! Search text folding.
//!
//! Matching is substring containment over a folded form: NFD
//! decomposition, combining marks stripped, lowercased. The fold runs
//! in memory after candidates are fetched, so matching never depends on
//! the collation support of the store underneath.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for matching: decompose, drop combining marks, lowercase.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Whether the folded haystack contains the folded needle.
pub fn matches(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}
