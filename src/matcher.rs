//! Fuzzy term matcher
//!
//! Composes candidate generation, the filter pipeline and the ranker under
//! a single validated [`MatcherConfig`].

use crate::candidate::{MatchString, TermMatch};
use crate::config::MatcherConfig;
use crate::error::{MatchError, Result};
use crate::filter::FilterPipeline;
use crate::generator::CandidateGenerator;
use crate::rank::{rank_candidates, Score};
use log::debug;
use rayon::prelude::*;

/// Minimum batch size for parallel processing.
///
/// Below this, sequential processing avoids thread pool coordination
/// overhead.
const PARALLEL_THRESHOLD: usize = 64;

/// Finds approximate occurrences of terms in noisy text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuzzyMatcher {
    config: MatcherConfig,
}

impl FuzzyMatcher {
    /// Create a matcher bound to `config`, rejecting out-of-range knobs.
    pub fn new(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Return a matcher with a new configuration, leaving `self` untouched.
    pub fn with_config(&self, config: MatcherConfig) -> Result<Self> {
        Self::new(config)
    }

    fn generator(&self) -> CandidateGenerator {
        CandidateGenerator::new(self.config.max_length_variance, self.config.strip_suffix)
    }

    fn pipeline(&self) -> FilterPipeline {
        FilterPipeline::from(&self.config)
    }

    /// Generate candidates for `term` without filtering them.
    pub fn find_start_candidates(&self, text: &str, term: &str) -> Result<Vec<TermMatch>> {
        self.generator().generate(text, term)
    }

    /// Generate and filter candidates, using the configured n-gram size.
    ///
    /// Survivors are returned unranked in discovery order.
    pub fn find_candidates(&self, text: &str, term: &str) -> Result<Vec<TermMatch>> {
        self.find_candidates_with_ngram_size(text, term, self.config.ngram_size)
    }

    pub fn find_candidates_with_ngram_size(
        &self,
        text: &str,
        term: &str,
        ngram_size: usize,
    ) -> Result<Vec<TermMatch>> {
        let candidates = self.find_start_candidates(text, term)?;
        let generated = candidates.len();
        let survivors = self.pipeline().apply(candidates, term, ngram_size)?;
        debug!(
            "{:?}: {} of {} candidates survived filtering",
            term,
            survivors.len(),
            generated
        );
        Ok(survivors)
    }

    /// Apply only the filter pipeline to caller-supplied candidates.
    pub fn filter_candidates<T: MatchString>(
        &self,
        candidates: Vec<T>,
        term: &str,
    ) -> Result<Vec<T>> {
        self.filter_candidates_with_ngram_size(candidates, term, self.config.ngram_size)
    }

    pub fn filter_candidates_with_ngram_size<T: MatchString>(
        &self,
        candidates: Vec<T>,
        term: &str,
        ngram_size: usize,
    ) -> Result<Vec<T>> {
        self.pipeline().apply(candidates, term, ngram_size)
    }

    /// Score and order caller-supplied candidates, highest total first.
    pub fn rank_candidates<T: MatchString>(
        &self,
        candidates: Vec<T>,
        term: &str,
    ) -> Result<Vec<Score<T>>> {
        self.rank_candidates_with_ngram_size(candidates, term, self.config.ngram_size)
    }

    pub fn rank_candidates_with_ngram_size<T: MatchString>(
        &self,
        candidates: Vec<T>,
        term: &str,
        ngram_size: usize,
    ) -> Result<Vec<Score<T>>> {
        if ngram_size == 0 {
            return Err(MatchError::InvalidInput(
                "ngram size must be at least 1, got 0".to_string(),
            ));
        }
        rank_candidates(candidates, term, ngram_size, self.config.tie_break)
    }

    /// Highest ranked surviving candidate of `term` in `text`, if any.
    pub fn best_match(&self, text: &str, term: &str) -> Result<Option<Score<TermMatch>>> {
        let survivors = self.find_candidates(text, term)?;
        Ok(self.rank_candidates(survivors, term)?.into_iter().next())
    }

    /// Run [`find_candidates`](Self::find_candidates) over many texts.
    ///
    /// Results are in input order. Large batches are processed in parallel.
    pub fn find_candidates_batch<S>(&self, texts: &[S], term: &str) -> Result<Vec<Vec<TermMatch>>>
    where
        S: AsRef<str> + Sync,
    {
        if term.is_empty() {
            return Err(MatchError::InvalidTerm);
        }
        if texts.len() < PARALLEL_THRESHOLD {
            texts
                .iter()
                .map(|text| self.find_candidates(text.as_ref(), term))
                .collect()
        } else {
            texts
                .par_iter()
                .map(|text| self.find_candidates(text.as_ref(), term))
                .collect()
        }
    }

    /// Search one text for several terms, grouped per term in input order.
    pub fn find_keywords<S>(&self, text: &str, terms: &[S]) -> Result<Vec<Vec<TermMatch>>>
    where
        S: AsRef<str> + Sync,
    {
        if terms.len() < PARALLEL_THRESHOLD {
            terms
                .iter()
                .map(|term| self.find_candidates(text, term.as_ref()))
                .collect()
        } else {
            terms
                .par_iter()
                .map(|term| self.find_candidates(text, term.as_ref()))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::config::TieBreak;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn matcher() -> FuzzyMatcher {
        init_logging();
        FuzzyMatcher::default()
    }

    #[test]
    fn test_exact_occurrence() {
        let found = matcher()
            .find_candidates("the city of Deventer was founded", "Deventer")
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].match_string, "Deventer");
        assert_eq!(found[0].offset, 12);
        assert_eq!(found[0].matched_term, "Deventer");
    }

    #[test]
    fn test_noisy_occurrence_survives() {
        let found = matcher()
            .find_candidates("the ciry of Devemter", "Deventer")
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].match_string, "Devemter");
        assert_eq!(found[0].offset, 12);
    }

    #[test]
    fn test_suffix_stripped_before_scoring() {
        init_logging();
        let wide = FuzzyMatcher::new(MatcherConfig::default().with_max_length_variance(2)).unwrap();
        let start = wide.find_start_candidates("in Deventer, ", "Deventer").unwrap();
        assert_eq!(start[0].match_string, "Deventer");

        let raw = wide
            .with_config(wide.config().disable_suffix_stripping())
            .unwrap()
            .find_start_candidates("in Deventer, ", "Deventer")
            .unwrap();
        assert_eq!(raw[0].match_string, "Deventer, ");

        let ranked = wide.rank_candidates(start, "Deventer").unwrap();
        assert_eq!(ranked[0].total, 3.0);
    }

    #[test]
    fn test_empty_term_fails() {
        let m = matcher();
        assert_eq!(m.find_candidates("some text", ""), Err(MatchError::InvalidTerm));
        assert_eq!(
            m.filter_candidates(vec!["Deventer"], ""),
            Err(MatchError::InvalidTerm)
        );
        assert!(m.rank_candidates(vec!["Deventer"], "").is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatcherConfig::default().with_levenshtein_threshold(1.2);
        assert!(matches!(
            FuzzyMatcher::new(config),
            Err(MatchError::InvalidConfiguration { parameter: "levenshtein_threshold", .. })
        ));
        let m = matcher();
        assert!(m.with_config(config).is_err());
        assert_eq!(m.config().levenshtein_threshold, 0.5);
    }

    #[test]
    fn test_wide_variance_and_long_terms() {
        let too_wide = MatcherConfig::default().with_max_length_variance(100_000);
        assert!(matches!(
            FuzzyMatcher::new(too_wide),
            Err(MatchError::InvalidConfiguration { parameter: "max_length_variance", .. })
        ));

        let widest = MatcherConfig::default()
            .with_max_length_variance(crate::config::MAX_LENGTH_VARIANCE);
        let m = FuzzyMatcher::new(widest).unwrap();
        let raw = m.find_start_candidates("in Deventer", "Deventer").unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].offset, 3);

        let term = "D".repeat(crate::generator::MAX_TERM_LENGTH + 904);
        match matcher().find_candidates("Deventer", &term) {
            Err(MatchError::InvalidInput(message)) => assert!(!message.contains(&term)),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_discovery_order_and_offsets() {
        let text = "Kampen, Kanpen en Karnpen; daarna Kampen.";
        let found = matcher().find_candidates(text, "Kampen").unwrap();
        assert!(found.len() >= 3);
        assert!(found.windows(2).all(|w| w[0].offset <= w[1].offset));
        assert_eq!(found[0].match_string, "Kampen");
        assert_eq!(found[0].offset, 0);
    }

    #[test]
    fn test_strict_thresholds_drop_noise() {
        let config = MatcherConfig::new(1.0, 1.0, 1.0, 1).unwrap();
        let strict = FuzzyMatcher::new(config).unwrap();
        assert!(strict
            .find_candidates("the ciry of Devemter", "Deventer")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_longer_ngrams() {
        let m = matcher();
        let text = "the ciry of Devemter";
        let bigram = m.find_candidates_with_ngram_size(text, "Deventer", 2).unwrap();
        let trigram = m.find_candidates_with_ngram_size(text, "Deventer", 3).unwrap();
        assert_eq!(bigram.len(), 1);
        // #De Dev eve vem emt mte ter er# shares 5 of its 8 trigrams
        assert_eq!(trigram.len(), 1);
        assert!(matches!(
            m.find_candidates_with_ngram_size("Deventer", "Deventer", 0),
            Err(MatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_filter_and_rank_mixed_candidates() {
        let m = matcher();
        let candidates = vec![
            Candidate::from("Dover"),
            Candidate::from(TermMatch::new("Deventer", "Devemter", 40).with_metadata("page", "2")),
            Candidate::from("Deventer"),
            Candidate::from("Dxxxxxxxx"),
        ];
        let kept = m.filter_candidates(candidates, "Deventer").unwrap();
        assert!(kept.iter().all(|c| c.match_string() != "Dxxxxxxxx"));

        let ranked = m.rank_candidates(kept, "Deventer").unwrap();
        assert_eq!(ranked[0].candidate, Candidate::from("Deventer"));
        match &ranked[1].candidate {
            Candidate::Annotated(tm) => {
                assert_eq!(tm.metadata.get("page").map(String::as_str), Some("2"))
            }
            other => panic!("expected annotated candidate, got {:?}", other),
        }
    }

    #[test]
    fn test_best_match() {
        let m = matcher();
        let best = m
            .best_match("near Devemter and Deventer", "Deventer")
            .unwrap()
            .unwrap();
        assert_eq!(best.candidate.match_string, "Deventer");
        assert_eq!(best.candidate.offset, 18);
        assert!(m.best_match("no match here", "Deventer").unwrap().is_none());
    }

    #[test]
    fn test_tie_break_from_config() {
        let config = MatcherConfig::default().with_tie_break(TieBreak::ShorterThenLexical);
        let m = FuzzyMatcher::new(config).unwrap();
        let ranked = m.rank_candidates(vec!["Deventcr", "Dcventer"], "Deventer").unwrap();
        assert_eq!(ranked[0].candidate, "Dcventer");
    }

    #[test]
    fn test_batch_matches_sequential() {
        let m = matcher();
        let texts: Vec<String> = (0..200)
            .map(|i| {
                if i % 3 == 0 {
                    format!("regel {} noemt Devemter", i)
                } else {
                    format!("regel {} zonder plaats", i)
                }
            })
            .collect();
        let batch = m.find_candidates_batch(&texts, "Deventer").unwrap();
        assert_eq!(batch.len(), texts.len());
        for (text, found) in texts.iter().zip(&batch) {
            assert_eq!(found, &m.find_candidates(text, "Deventer").unwrap());
        }
        assert_eq!(batch.iter().filter(|f| !f.is_empty()).count(), 67);
        assert_eq!(
            m.find_candidates_batch(&texts, ""),
            Err(MatchError::InvalidTerm)
        );
    }

    #[test]
    fn test_find_keywords() {
        let m = matcher();
        let text = "Gegeven te Deventer den 12 Maart 1648";
        let found = m.find_keywords(text, &["Deventer", "1648", "Zwolle"]).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0][0].match_string, "Deventer");
        assert_eq!(found[1][0].match_string, "1648");
        assert_eq!(found[1][0].offset, 33);
        assert!(found[2].is_empty());
        assert!(m.find_keywords(text, &["Deventer", ""]).is_err());
    }
}
