//! Threshold-based candidate filtering
//!
//! Three filters applied in a fixed order, each narrowing the output of the
//! previous one: character overlap, then n-gram overlap, then edit distance.

use crate::algorithms::{CharOverlap, Levenshtein, NgramOverlap, Similarity};
use crate::candidate::MatchString;
use crate::error::{MatchError, Result};
use log::{debug, trace};

/// Keep candidates whose `metric` ratio against `term` reaches `threshold`.
///
/// Candidate order and every field other than the match string are preserved.
pub fn filter_by<T, S>(
    candidates: Vec<T>,
    term: &str,
    metric: &S,
    threshold: f64,
) -> Result<Vec<T>>
where
    T: MatchString,
    S: Similarity + ?Sized,
{
    if candidates.is_empty() {
        return Ok(candidates);
    }

    let before = candidates.len();
    let mut kept = Vec::with_capacity(before);
    for candidate in candidates {
        let ratio = metric.ratio(candidate.match_string(), term)?;
        if ratio >= threshold {
            kept.push(candidate);
        } else {
            trace!(
                "{} ratio {:.3} < {:.3}, dropping {:?}",
                metric.name(),
                ratio,
                threshold,
                candidate.match_string()
            );
        }
    }

    debug!("{} filter kept {}/{} candidates", metric.name(), kept.len(), before);
    Ok(kept)
}

pub fn filter_char_match_candidates<T: MatchString>(
    candidates: Vec<T>,
    term: &str,
    threshold: f64,
) -> Result<Vec<T>> {
    filter_by(candidates, term, &CharOverlap, threshold)
}

pub fn filter_ngram_candidates<T: MatchString>(
    candidates: Vec<T>,
    term: &str,
    ngram_size: usize,
    threshold: f64,
) -> Result<Vec<T>> {
    filter_by(candidates, term, &NgramOverlap::new(ngram_size), threshold)
}

pub fn filter_levenshtein_candidates<T: MatchString>(
    candidates: Vec<T>,
    term: &str,
    threshold: f64,
) -> Result<Vec<T>> {
    filter_by(candidates, term, &Levenshtein, threshold)
}

/// The three-stage filter funnel with its thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPipeline {
    pub char_match_threshold: f64,
    pub ngram_threshold: f64,
    pub levenshtein_threshold: f64,
}

impl FilterPipeline {
    #[must_use]
    pub fn new(
        char_match_threshold: f64,
        ngram_threshold: f64,
        levenshtein_threshold: f64,
    ) -> Self {
        Self {
            char_match_threshold,
            ngram_threshold,
            levenshtein_threshold,
        }
    }

    /// Run all three filters in order: char overlap, n-gram, edit distance.
    pub fn apply<T: MatchString>(
        &self,
        candidates: Vec<T>,
        term: &str,
        ngram_size: usize,
    ) -> Result<Vec<T>> {
        if term.is_empty() {
            return Err(MatchError::InvalidTerm);
        }
        if ngram_size == 0 {
            return Err(MatchError::InvalidInput(
                "ngram size must be at least 1, got 0".to_string(),
            ));
        }
        let candidates =
            filter_char_match_candidates(candidates, term, self.char_match_threshold)?;
        let candidates =
            filter_ngram_candidates(candidates, term, ngram_size, self.ngram_threshold)?;
        filter_levenshtein_candidates(candidates, term, self.levenshtein_threshold)
    }
}

impl From<&crate::config::MatcherConfig> for FilterPipeline {
    fn from(config: &crate::config::MatcherConfig) -> Self {
        Self::new(
            config.char_match_threshold,
            config.ngram_threshold,
            config.levenshtein_threshold,
        )
    }
}
