//! Candidate generation from free text
//!
//! Scans a text for substrings that start with the term's first character
//! and whose length lies within `max_length_variance` characters of the
//! term length. Matches are non-overlapping and found left to right, so
//! candidate offsets never decrease.

use crate::candidate::TermMatch;
use crate::error::{MatchError, Result};
use log::{debug, trace};
use regex::RegexBuilder;

/// Longest term, in characters, the windowed scan accepts.
pub const MAX_TERM_LENGTH: usize = 4096;

/// Compiled size budget for a search window. A window of
/// `MAX_TERM_LENGTH + MAX_LENGTH_VARIANCE` characters fits well inside it.
const WINDOW_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Build the windowed search pattern for `term`.
///
/// The anchor is the term's first character (escaped when it is a pattern
/// metacharacter) followed by a run of `|term| - 1 ± variance` arbitrary
/// characters, clamped at zero on the low end.
///
/// # Example
/// ```
/// use fuzzyterm::generator::window_pattern;
///
/// assert_eq!(window_pattern("Deventer", 1).unwrap(), "D.{6,8}");
/// assert_eq!(window_pattern("(1648)", 2).unwrap(), r"\(.{3,7}");
/// ```
pub fn window_pattern(term: &str, max_length_variance: usize) -> Result<String> {
    let mut chars = term.chars();
    let initial = chars.next().ok_or(MatchError::InvalidTerm)?;
    let tail_len = chars.count();
    if tail_len >= MAX_TERM_LENGTH {
        return Err(MatchError::InvalidInput(format!(
            "search term has {} characters, at most {} are supported",
            tail_len + 1,
            MAX_TERM_LENGTH
        )));
    }

    let min = tail_len.saturating_sub(max_length_variance);
    let max = tail_len.saturating_add(max_length_variance);

    let mut buf = [0u8; 4];
    let anchor = regex::escape(initial.encode_utf8(&mut buf));
    Ok(format!("{}.{{{},{}}}", anchor, min, max))
}

/// Drop a trailing separator over-captured by the search window.
///
/// Removes the last two characters when the second-to-last is a space or
/// comma, or when they form `". "`, `"? "` or `".f"`; otherwise removes a
/// single trailing space, comma or period. Never empties the string.
#[must_use]
pub fn strip_suffix(s: &str) -> &str {
    let mut rev = s.char_indices().rev();
    let last = rev.next();
    let second = rev.next();

    if let (Some((_, last_c)), Some((second_idx, second_c))) = (last, second) {
        let separator_pair = matches!(second_c, ' ' | ',')
            || matches!((second_c, last_c), ('.', ' ') | ('?', ' ') | ('.', 'f'));
        if separator_pair && second_idx > 0 {
            return &s[..second_idx];
        }
    }

    match last {
        Some((last_idx, ' ' | ',' | '.')) if last_idx > 0 => &s[..last_idx],
        _ => s,
    }
}

/// Windowed candidate scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateGenerator {
    /// Characters of length drift tolerated around the term length
    pub max_length_variance: usize,
    /// Apply [`strip_suffix`] once to every candidate
    pub strip_suffix: bool,
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self {
            max_length_variance: crate::config::DEFAULT_MAX_LENGTH_VARIANCE,
            strip_suffix: true,
        }
    }
}

impl CandidateGenerator {
    #[must_use]
    pub fn new(max_length_variance: usize, strip_suffix: bool) -> Self {
        Self {
            max_length_variance,
            strip_suffix,
        }
    }

    /// Scan `text` for candidate occurrences of `term`.
    pub fn generate(&self, text: &str, term: &str) -> Result<Vec<TermMatch>> {
        let mut candidates = find_term_matches(text, term, self.max_length_variance)?;
        if self.strip_suffix {
            for candidate in &mut candidates {
                let stripped_len = strip_suffix(&candidate.match_string).len();
                if stripped_len < candidate.match_string.len() {
                    trace!(
                        "stripped suffix from {:?} at offset {}",
                        candidate.match_string,
                        candidate.offset
                    );
                    candidate.match_string.truncate(stripped_len);
                }
            }
        }
        Ok(candidates)
    }
}

/// Find every raw window match of `term` in `text`, without suffix stripping.
///
/// Offsets are character indices into `text`.
pub fn find_term_matches(
    text: &str,
    term: &str,
    max_length_variance: usize,
) -> Result<Vec<TermMatch>> {
    let pattern = window_pattern(term, max_length_variance)?;
    let re = RegexBuilder::new(&pattern)
        .size_limit(WINDOW_SIZE_LIMIT)
        .build()
        .map_err(|e| {
            MatchError::InvalidInput(format!(
                "cannot build search window of up to {} characters: {}",
                term.chars().count() + max_length_variance,
                e
            ))
        })?;

    let mut matches = Vec::new();
    let mut scanned_bytes = 0;
    let mut scanned_chars = 0;
    for m in re.find_iter(text) {
        scanned_chars += text[scanned_bytes..m.start()].chars().count();
        scanned_bytes = m.start();
        matches.push(TermMatch::new(term, m.as_str(), scanned_chars));
    }

    debug!("window {:?} produced {} candidates", pattern, matches.len());
    Ok(matches)
}
