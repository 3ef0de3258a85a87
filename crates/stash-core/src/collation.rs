//! Locale-style string ordering.
//!
//! Strings are compared on two levels: base letters first (transliterated to
//! ASCII with case folded away, so `Ø` sorts with `o` and `Æ` with `ae`),
//! then accents. Case never decides an ordering here, so two
//! names differing only in case tie and the caller's stable sort keeps them
//! in input order. [`compare_labels`] adds a case level for lists that must
//! not contain ties.

use std::cmp::Ordering;

use deunicode::deunicode;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Precomputed comparison key for case-insensitive collation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    /// Lowercased ASCII transliteration of the text with combining marks
    /// removed.
    primary: String,
    /// Lowercased NFKD form, accents intact.
    secondary: String,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let secondary: String = text.to_lowercase().nfkd().collect();
        let base: String = secondary
            .chars()
            .filter(|c| !is_combining_mark(*c))
            .collect();
        Self {
            primary: deunicode(&base).to_lowercase(),
            secondary,
        }
    }
}

/// Case-insensitive, accent-aware comparison.
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Like [`compare_ignore_case`], then lowercase before uppercase, then code
/// point. Only identical strings compare equal.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    compare_ignore_case(a, b).then_with(|| {
        let rank = |c: char| (!c.is_lowercase(), c);
        a.chars().map(rank).cmp(b.chars().map(rank))
    })
}
