//! Character overlap similarity
//!
//! Counts characters shared between two strings as a multiset: every
//! character of the second string is matched at most once against the
//! remaining characters of the first, so repeated characters are never
//! double counted.

use super::Similarity;
use crate::error::{MatchError, Result};
use ahash::AHashMap;
use std::hash::Hash;

/// Size of the multiset intersection of two item sequences.
///
/// Items of `b` are consumed against a frequency map of `a`; each match
/// decrements the remaining count.
pub(crate) fn multiset_overlap<T, A, B>(a: A, b: B) -> usize
where
    T: Eq + Hash,
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    let mut remaining: AHashMap<T, usize> = AHashMap::new();
    for item in a {
        *remaining.entry(item).or_insert(0) += 1;
    }

    let mut matches = 0;
    for item in b {
        if let Some(count) = remaining.get_mut(&item) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }
    matches
}

/// Character overlap similarity, normalized by the candidate length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharOverlap;

impl CharOverlap {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for CharOverlap {
    fn ratio(&self, candidate: &str, term: &str) -> Result<f64> {
        char_overlap_ratio(candidate, term)
    }

    fn name(&self) -> &'static str {
        "char overlap"
    }
}

/// Number of characters of `b` found in the multiset of characters of `a`.
///
/// # Example
/// ```
/// use fuzzyterm::algorithms::overlap::char_overlap_count;
///
/// assert_eq!(char_overlap_count("aab", "ab"), 2);
/// ```
#[must_use]
pub fn char_overlap_count(a: &str, b: &str) -> usize {
    multiset_overlap(a.chars(), b.chars())
}

/// `char_overlap_count(a, b) / |a|`.
///
/// Returns [`MatchError::DegenerateRatio`] when `a` is empty.
pub fn char_overlap_ratio(a: &str, b: &str) -> Result<f64> {
    let max_overlap = a.chars().count();
    if max_overlap == 0 {
        return Err(MatchError::DegenerateRatio {
            metric: "char overlap",
        });
    }
    Ok(char_overlap_count(a, b) as f64 / max_overlap as f64)
}
