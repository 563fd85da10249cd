//! Text normalizer shared by indexing and querying
//!
//! Pipeline: ASCII punctuation → space, split on whitespace (which collapses
//! runs and trims), lowercase. Documents and queries must go through the
//! same pipeline or terms stop matching.
//!
//! Whitespace is Unicode `White_Space` plus the ASCII information separators
//! U+001C..=U+001F. NUL also separates terms, so binary noise in otherwise
//! textual content cannot glue two words together.

use rustc_hash::FxHashMap;

/// Per-document term tally: term → occurrences
pub type TermCounts = FxHashMap<String, u32>;

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation() || matches!(c, '\0' | '\x1c'..='\x1f')
}

/// Iterate over the normalized terms of `text`, left to right.
///
/// Never yields an empty term.
pub fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(is_separator)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Normalize text into a sequence of terms.
///
/// # Example
///
/// ```
/// use quarry_search::normalizer::normalize;
///
/// let terms = normalize("  Hello, World!  hello");
/// assert_eq!(terms, vec!["hello", "world", "hello"]);
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    terms(text).collect()
}

/// Normalize text into a single space-joined string.
///
/// This is the key under which a single-word lookup is resolved.
///
/// ```
/// use quarry_search::normalizer::normalize_text;
///
/// assert_eq!(normalize_text("Self-Driving\tCARS."), "self driving cars");
/// assert_eq!(normalize_text("?!"), "");
/// ```
pub fn normalize_text(text: &str) -> String {
    normalize(text).join(" ")
}

/// Count occurrences of every term in `text`.
///
/// This is the private tally built before a document touches the shared index.
pub fn term_counts(text: &str) -> TermCounts {
    let mut counts = TermCounts::default();
    for term in terms(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}
