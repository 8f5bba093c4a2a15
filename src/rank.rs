//! Candidate ranking
//!
//! Scores every candidate with all three similarity ratios and orders them by
//! their un-normalized sum, highest first. Scores are derived on each call and
//! never cached.

use crate::algorithms::{char_overlap_ratio, edit_distance_ratio, ngram_overlap_ratio};
use crate::candidate::MatchString;
use crate::config::TieBreak;
use crate::error::{MatchError, Result};
use serde::Serialize;
use std::cmp::Ordering;

/// Similarity breakdown for one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score<T> {
    pub candidate: T,
    /// Character overlap ratio (0.0 - 1.0)
    pub char: f64,
    /// N-gram overlap ratio (0.0 - 1.0)
    pub ngram: f64,
    /// Edit distance ratio (0.0 - 1.0)
    pub levenshtein: f64,
    /// Sum of the three ratios (0.0 - 3.0)
    pub total: f64,
}

impl<T: MatchString> Score<T> {
    /// Compute all three ratios of `candidate` against `term`
    pub fn compute(candidate: T, term: &str, ngram_size: usize) -> Result<Self> {
        let text = candidate.match_string();
        let char = char_overlap_ratio(text, term)?;
        let ngram = ngram_overlap_ratio(text, term, ngram_size)?;
        let levenshtein = edit_distance_ratio(text, term)?;
        Ok(Self {
            candidate,
            char,
            ngram,
            levenshtein,
            total: char + ngram + levenshtein,
        })
    }
}

fn compare_scores<T: MatchString>(a: &Score<T>, b: &Score<T>, tie_break: TieBreak) -> Ordering {
    let by_total = b.total.total_cmp(&a.total);
    match tie_break {
        TieBreak::InputOrder => by_total,
        TieBreak::ShorterThenLexical => by_total.then_with(|| {
            let (a, b) = (a.candidate.match_string(), b.candidate.match_string());
            a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b))
        }),
    }
}

/// Score and sort candidates by descending total.
///
/// The sort is stable, so with [`TieBreak::InputOrder`] equal totals keep
/// their input order and re-ranking a ranked sequence is a no-op.
pub fn rank_candidates<T: MatchString>(
    candidates: Vec<T>,
    term: &str,
    ngram_size: usize,
    tie_break: TieBreak,
) -> Result<Vec<Score<T>>> {
    if term.is_empty() {
        return Err(MatchError::InvalidTerm);
    }

    let mut scores = candidates
        .into_iter()
        .map(|candidate| Score::compute(candidate, term, ngram_size))
        .collect::<Result<Vec<_>>>()?;

    scores.sort_by(|a, b| compare_scores(a, b, tie_break));
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_components() {
        let score = Score::compute("Devemter", "Deventer", 2).unwrap();
        assert!((score.char - 0.875).abs() < 1e-9);
        assert!((score.ngram - 7.0 / 9.0).abs() < 1e-9);
        assert!((score.levenshtein - 0.875).abs() < 1e-9);
        assert!((score.total - (0.875 + 7.0 / 9.0 + 0.875)).abs() < 1e-9);
    }

    #[test]
    fn test_rank_descending() {
        let ranked = rank_candidates(
            vec!["Dover", "Deventer", "Devemter"],
            "Deventer",
            2,
            TieBreak::InputOrder,
        )
        .unwrap();
        let order: Vec<&str> = ranked.iter().map(|s| s.candidate).collect();
        assert_eq!(order, vec!["Deventer", "Devemter", "Dover"]);
        assert_eq!(ranked[0].total, 3.0);
        assert!(ranked.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        // Same multiset of characters and bigrams, same distance
        let ranked = rank_candidates(
            vec!["Dcventer", "Deventcr"],
            "Deventer",
            2,
            TieBreak::InputOrder,
        )
        .unwrap();
        assert_eq!(ranked[0].total, ranked[1].total);
        assert_eq!(ranked[0].candidate, "Dcventer");
    }

    #[test]
    fn test_rank_tie_break_shorter_then_lexical() {
        let ranked = rank_candidates(
            vec!["Dcventer", "Deventcr"],
            "Deventer",
            2,
            TieBreak::ShorterThenLexical,
        )
        .unwrap();
        assert_eq!(ranked[0].candidate, "Dcventer");

        let ranked = rank_candidates(
            vec!["Deventcr", "Dcventer"],
            "Deventer",
            2,
            TieBreak::ShorterThenLexical,
        )
        .unwrap();
        assert_eq!(ranked[0].candidate, "Dcventer");
    }

    #[test]
    fn test_rerank_is_idempotent() {
        let candidates = vec!["Dover", "Devemter", "Dcventer", "Deventer", "Deventcr", "Daventry"];
        let ranked = rank_candidates(candidates, "Deventer", 2, TieBreak::InputOrder).unwrap();
        let first: Vec<&str> = ranked.iter().map(|s| s.candidate).collect();
        let reranked = rank_candidates(first.clone(), "Deventer", 2, TieBreak::InputOrder).unwrap();
        let second: Vec<&str> = reranked.iter().map(|s| s.candidate).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_errors() {
        assert_eq!(
            rank_candidates(vec!["Deventer"], "", 2, TieBreak::InputOrder),
            Err(MatchError::InvalidTerm)
        );
        assert!(rank_candidates(vec![""], "Deventer", 2, TieBreak::InputOrder).is_err());
        assert!(rank_candidates(Vec::<String>::new(), "Deventer", 2, TieBreak::InputOrder)
            .unwrap()
            .is_empty());
    }
}
