//! Matcher configuration
//!
//! A [`MatcherConfig`] is an immutable value bound to a matcher for the
//! duration of a run. Changing a knob means building a new config.

use crate::algorithms::ngram::DEFAULT_NGRAM_SIZE;
use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MAX_LENGTH_VARIANCE: usize = 1;

/// Largest accepted length variance. The search window for a term of length
/// `n` spans up to `n - 1 + variance` characters.
pub const MAX_LENGTH_VARIANCE: usize = 1024;

/// Ordering applied to candidates whose total scores are equal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the relative input order (stable sort)
    #[default]
    InputOrder,
    /// Shorter match string first, then lexical order of the match string
    ShorterThenLexical,
}

/// Configuration for the fuzzy matcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum character overlap ratio
    pub char_match_threshold: f64,
    /// Minimum n-gram overlap ratio
    pub ngram_threshold: f64,
    /// Minimum edit distance ratio
    pub levenshtein_threshold: f64,
    /// Characters of length drift tolerated around the term length
    pub max_length_variance: usize,
    /// Trim a trailing separator from every generated candidate
    pub strip_suffix: bool,
    /// N-gram size used when a call does not pass one explicitly
    pub ngram_size: usize,
    pub tie_break: TieBreak,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            char_match_threshold: DEFAULT_THRESHOLD,
            ngram_threshold: DEFAULT_THRESHOLD,
            levenshtein_threshold: DEFAULT_THRESHOLD,
            max_length_variance: DEFAULT_MAX_LENGTH_VARIANCE,
            strip_suffix: true,
            ngram_size: DEFAULT_NGRAM_SIZE,
            tie_break: TieBreak::InputOrder,
        }
    }
}

/// Validate that a threshold is a finite number in [0.0, 1.0]
fn validate_threshold(value: f64, parameter: &'static str) -> Result<()> {
    if !value.is_finite() {
        return Err(MatchError::InvalidConfiguration {
            parameter,
            reason: format!("must be a finite number, got {}", value),
        });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(MatchError::InvalidConfiguration {
            parameter,
            reason: format!("must be in range [0.0, 1.0], got {}", value),
        });
    }
    Ok(())
}

impl MatcherConfig {
    /// Create a validated configuration from the four numeric knobs.
    ///
    /// Suffix stripping is enabled; the remaining fields take their defaults.
    pub fn new(
        char_match_threshold: f64,
        ngram_threshold: f64,
        levenshtein_threshold: f64,
        max_length_variance: usize,
    ) -> Result<Self> {
        let config = Self {
            char_match_threshold,
            ngram_threshold,
            levenshtein_threshold,
            max_length_variance,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every knob against its documented range.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.char_match_threshold, "char_match_threshold")?;
        validate_threshold(self.ngram_threshold, "ngram_threshold")?;
        validate_threshold(self.levenshtein_threshold, "levenshtein_threshold")?;
        if self.max_length_variance > MAX_LENGTH_VARIANCE {
            return Err(MatchError::InvalidConfiguration {
                parameter: "max_length_variance",
                reason: format!(
                    "must be at most {}, got {}",
                    MAX_LENGTH_VARIANCE, self.max_length_variance
                ),
            });
        }
        if self.ngram_size == 0 {
            return Err(MatchError::InvalidConfiguration {
                parameter: "ngram_size",
                reason: "must be at least 1, got 0".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_char_match_threshold(mut self, threshold: f64) -> Self {
        self.char_match_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_ngram_threshold(mut self, threshold: f64) -> Self {
        self.ngram_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_levenshtein_threshold(mut self, threshold: f64) -> Self {
        self.levenshtein_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_length_variance(mut self, variance: usize) -> Self {
        self.max_length_variance = variance;
        self
    }

    #[must_use]
    pub fn with_ngram_size(mut self, n: usize) -> Self {
        self.ngram_size = n;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub fn with_strip_suffix(mut self, strip_suffix: bool) -> Self {
        self.strip_suffix = strip_suffix;
        self
    }

    #[must_use]
    pub fn enable_suffix_stripping(self) -> Self {
        self.with_strip_suffix(true)
    }

    #[must_use]
    pub fn disable_suffix_stripping(self) -> Self {
        self.with_strip_suffix(false)
    }
}
