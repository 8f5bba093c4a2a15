//! Evaluation metrics for assessing match quality.
//!
//! Compares found match offsets against known attestation offsets so that
//! thresholds and length variance can be tuned for precision or recall.

use crate::candidate::TermMatch;
use ahash::AHashSet;

/// Confusion counts for a set of found matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Found offsets that are known attestations
    pub true_positives: usize,
    /// Found offsets that are not known attestations
    pub false_positives: usize,
    /// Known attestations that were not found
    pub false_negatives: usize,
}

/// `hits / (hits + misses)`, or 1.0 when both sides of the comparison are
/// empty and 0.0 when only the other side has entries.
fn hit_rate(hits: usize, misses: usize, other_misses: usize) -> f64 {
    match hits + misses {
        0 if other_misses == 0 => 1.0,
        0 => 0.0,
        total => hits as f64 / total as f64,
    }
}

impl ConfusionMatrix {
    /// Share of found offsets that are known attestations.
    pub fn precision(&self) -> f64 {
        hit_rate(self.true_positives, self.false_positives, self.false_negatives)
    }

    /// Share of known attestations that were found.
    pub fn recall(&self) -> f64 {
        hit_rate(self.true_positives, self.false_negatives, self.false_positives)
    }

    /// Weighted harmonic mean of precision and recall. `beta` above 1.0
    /// leans toward recall, below 1.0 toward precision.
    pub fn f_score(&self, beta: f64) -> f64 {
        let (precision, recall) = (self.precision(), self.recall());
        let weight = beta * beta;
        let denominator = weight * precision + recall;
        if denominator == 0.0 {
            return 0.0;
        }
        (1.0 + weight) * precision * recall / denominator
    }
}

/// Compare found matches against expected attestation offsets.
///
/// Duplicate offsets on either side are counted once.
pub fn evaluate_offsets(expected: &[usize], found: &[TermMatch]) -> ConfusionMatrix {
    let expected: AHashSet<usize> = expected.iter().copied().collect();
    let found: AHashSet<usize> = found.iter().map(|m| m.offset).collect();

    let true_positives = found.intersection(&expected).count();
    ConfusionMatrix {
        true_positives,
        false_positives: found.len() - true_positives,
        false_negatives: expected.len() - true_positives,
    }
}
