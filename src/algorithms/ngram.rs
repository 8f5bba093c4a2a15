//! N-gram overlap similarity
//!
//! Compares strings based on shared n-character substrings. Each string is
//! wrapped in a boundary marker on both sides before extraction, so the
//! first and last characters take part in boundary n-grams.

use super::overlap::multiset_overlap;
use super::Similarity;
use crate::error::{MatchError, Result};

/// Boundary marker wrapped around a string before n-gram extraction.
pub const BOUNDARY_MARKER: char = '#';

/// Default n-gram size used by the matcher.
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// N-gram overlap similarity calculator
///
/// # Complexity
/// - Time: O(m+n) for n-gram extraction and multiset comparison
/// - Space: O(m+n) for the n-gram sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramOverlap {
    /// Size of each n-gram
    pub n: usize,
}

impl Default for NgramOverlap {
    fn default() -> Self {
        Self::new(DEFAULT_NGRAM_SIZE)
    }
}

impl NgramOverlap {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    #[must_use]
    pub fn bigram() -> Self {
        Self::new(2)
    }

    #[must_use]
    pub fn trigram() -> Self {
        Self::new(3)
    }

    /// Extract boundary-wrapped n-grams from a string
    #[must_use]
    pub fn extract(&self, s: &str) -> Vec<String> {
        extract_ngrams(s, self.n)
    }
}

impl Similarity for NgramOverlap {
    fn ratio(&self, candidate: &str, term: &str) -> Result<f64> {
        ngram_overlap_ratio(candidate, term, self.n)
    }

    fn name(&self) -> &'static str {
        "ngram overlap"
    }
}

/// Extract every length-`n` window of `#s#`.
///
/// Yields `|s| + 2 - n + 1` n-grams, or none when `n` is zero or longer
/// than the wrapped string.
///
/// # Example
/// ```
/// use fuzzyterm::algorithms::ngram::extract_ngrams;
///
/// assert_eq!(extract_ngrams("ab", 2), vec!["#a", "ab", "b#"]);
/// ```
#[must_use]
pub fn extract_ngrams(s: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return vec![];
    }

    let mut chars: Vec<char> = Vec::with_capacity(s.len() + 2);
    chars.push(BOUNDARY_MARKER);
    chars.extend(s.chars());
    chars.push(BOUNDARY_MARKER);

    if chars.len() < n {
        return vec![];
    }

    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Number of n-grams shared by `a` and `b`, counted as a multiset.
#[must_use]
pub fn ngram_overlap_count(a: &str, b: &str, n: usize) -> usize {
    multiset_overlap(extract_ngrams(a, n), extract_ngrams(b, n))
}

/// `ngram_overlap_count(a, b, n) / |ngrams(a, n)|`.
///
/// Returns [`MatchError::InvalidInput`] for `n == 0` and
/// [`MatchError::DegenerateRatio`] when `a` yields no n-grams.
pub fn ngram_overlap_ratio(a: &str, b: &str, n: usize) -> Result<f64> {
    if n == 0 {
        return Err(MatchError::InvalidInput(
            "ngram size must be at least 1, got 0".to_string(),
        ));
    }
    let a_ngrams = extract_ngrams(a, n);
    if a_ngrams.is_empty() {
        return Err(MatchError::DegenerateRatio {
            metric: "ngram overlap",
        });
    }
    let max_overlap = a_ngrams.len();
    let overlap = multiset_overlap(a_ngrams, extract_ngrams(b, n));
    Ok(overlap as f64 / max_overlap as f64)
}
