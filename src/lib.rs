//! FuzzyTerm - approximate term matching in noisy text
//!
//! Locates fuzzy occurrences of a known term (a place name, a date) inside
//! text that may carry OCR errors, and ranks them by similarity.
//!
//! # Pipeline
//! 1. Candidate generation: a windowed scan anchored on the term's first
//!    character, tolerating a few characters of length drift.
//! 2. Filtering: character overlap, n-gram overlap and edit distance ratios,
//!    each against its own threshold, always in that order.
//! 3. Ranking (optional): candidates ordered by the sum of the three ratios.
//!
//! # Example
//! ```
//! use fuzzyterm::FuzzyMatcher;
//!
//! let matcher = FuzzyMatcher::default();
//! let found = matcher.find_candidates("the ciry of Devemter", "Deventer").unwrap();
//! assert_eq!(found[0].match_string, "Devemter");
//! assert_eq!(found[0].offset, 12);
//! ```

pub mod algorithms;
pub mod candidate;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod matcher;
pub mod metrics;
pub mod rank;

// Python bindings (enabled with the python feature)
#[cfg(feature = "python")]
mod python;

pub use algorithms::{EditDistance, Similarity};
pub use candidate::{Candidate, MatchString, TermMatch};
pub use config::{MatcherConfig, TieBreak};
pub use error::{MatchError, Result};
pub use matcher::FuzzyMatcher;
pub use rank::Score;
