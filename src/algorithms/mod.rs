//! Core string similarity measures
//!
//! Each measure is implemented as a standalone function for composability,
//! plus a trait-based interface so the filter pipeline and ranker can treat
//! them uniformly.

pub mod levenshtein;
pub mod ngram;
pub mod overlap;

pub use levenshtein::*;
pub use ngram::*;
pub use overlap::*;

use crate::error::{MatchError, Result};

/// Trait for all similarity ratios used by the matcher.
///
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
/// The first argument is the candidate text, the second the search term;
/// some measures are asymmetric and normalize by the candidate side only.
pub trait Similarity: Send + Sync {
    fn ratio(&self, candidate: &str, term: &str) -> Result<f64>;

    /// Name of the measure for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distance algorithms that return integer distances
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Convert to normalized similarity: `1 - distance / max(|a|, |b|)`.
    ///
    /// Fails when both strings are empty.
    fn distance_ratio(&self, a: &str, b: &str) -> Result<f64> {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return Err(MatchError::DegenerateRatio {
                metric: EditDistance::name(self),
            });
        }
        Ok(1.0 - (self.distance(a, b) as f64 / max_len as f64))
    }

    fn name(&self) -> &'static str;
}

/// Blanket implementation: any EditDistance is also a Similarity
impl<T: EditDistance> Similarity for T {
    fn ratio(&self, candidate: &str, term: &str) -> Result<f64> {
        self.distance_ratio(candidate, term)
    }

    fn name(&self) -> &'static str {
        EditDistance::name(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOISY_PAIRS: &[(&str, &str)] = &[
        ("Devemter", "Deventer"),
        ("Deventer,", "Deventer"),
        ("Dcvcnter", "Deventer"),
        ("Zwol1e", "Zwolle"),
        ("aaaa", "a"),
        ("a", "aaaa"),
        ("1648", "(1648)"),
        ("Ærø", "Aero"),
        ("x", "Deventer"),
        ("Deventer", "Deventer"),
    ];

    #[test]
    fn test_ratios_stay_in_unit_interval() {
        for n in 1..=4 {
            let measures: [Box<dyn Similarity>; 3] = [
                Box::new(CharOverlap::new()),
                Box::new(NgramOverlap::new(n)),
                Box::new(Levenshtein::new()),
            ];
            for measure in &measures {
                for &(candidate, term) in NOISY_PAIRS {
                    match measure.ratio(candidate, term) {
                        Ok(r) => assert!(
                            (0.0..=1.0).contains(&r),
                            "{} n={} {:?}/{:?} gave {}",
                            measure.name(),
                            n,
                            candidate,
                            term,
                            r
                        ),
                        Err(e) => assert!(
                            matches!(e, MatchError::DegenerateRatio { .. }),
                            "{} n={} {:?}/{:?} failed with {:?}",
                            measure.name(),
                            n,
                            candidate,
                            term,
                            e
                        ),
                    }
                }
            }
        }
    }
}
