//! Levenshtein (edit) distance implementation
//!
//! Single-row dynamic programming with unit costs for insertion, deletion
//! and substitution. The shorter string drives the inner loop so memory is
//! O(min(m, n)). Unicode-aware: strings are compared per `char`.

use super::EditDistance;
use crate::error::Result;
use smallvec::SmallVec;

/// Single-row DP distance over char slices.
#[inline]
fn dp_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Shorter string on the column axis
    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = usize::from(sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Levenshtein distance calculator
///
/// # Complexity
/// - Time: O(m*n) where m and n are string lengths
/// - Space: O(min(m,n)) using single-row DP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        edit_distance(a, b)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Compute the edit distance between two strings.
///
/// # Example
/// ```
/// use fuzzyterm::algorithms::levenshtein::edit_distance;
///
/// assert_eq!(edit_distance("kitten", "sitting"), 3);
/// assert_eq!(edit_distance("Deventer", "Devemter"), 1);
/// ```
#[inline]
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    dp_distance(&a_chars, &b_chars)
}

/// Normalized edit distance similarity: `1 - distance / max(|a|, |b|)`.
///
/// Returns [`DegenerateRatio`](crate::MatchError::DegenerateRatio) when both
/// strings are empty.
///
/// # Example
/// ```
/// use fuzzyterm::algorithms::levenshtein::edit_distance_ratio;
///
/// let ratio = edit_distance_ratio("Devemter", "Deventer").unwrap();
/// assert!((ratio - 0.875).abs() < 1e-9);
/// ```
#[inline]
pub fn edit_distance_ratio(a: &str, b: &str) -> Result<f64> {
    Levenshtein.distance_ratio(a, b)
}
