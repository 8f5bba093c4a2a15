//! Error types for term matching

use thiserror::Error;

/// Errors raised by the matching engine.
///
/// All errors are raised synchronously by the call that detects them; a
/// failing call leaves configuration and other candidates untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// The search term is empty, so no anchor character exists
    #[error("Search term must not be empty")]
    InvalidTerm,

    /// Text, candidate or call argument is not usable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A threshold or variance lies outside its documented range
    #[error("Invalid configuration for '{parameter}': {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },

    /// A ratio's denominator would be zero
    #[error("Degenerate {metric} ratio: denominator is zero")]
    DegenerateRatio { metric: &'static str },
}

pub type Result<T> = std::result::Result<T, MatchError>;
