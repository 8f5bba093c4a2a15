//! Python bindings
//!
//! Exposes [`FuzzyMatcher`] to the document-analysis pipeline. Candidates
//! passed in from Python may be strings, `TermMatch` objects, or any mapping
//! with a `match_string` key; filtering hands back the caller's own objects.

use crate::candidate::{MatchString, TermMatch};
use crate::config::MatcherConfig;
use crate::error::MatchError;
use crate::matcher::FuzzyMatcher;
use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyString};
use std::collections::BTreeMap;

// ============================================================================
// Custom Python Exceptions
// ============================================================================
//
// FuzzyTermError (base)
//   ├── InvalidTermError - empty search term
//   ├── InvalidInputError - unusable text or candidate
//   ├── InvalidConfigurationError - threshold or variance out of range
//   └── DegenerateRatioError - ratio denominator is zero

create_exception!(fuzzyterm, FuzzyTermError, PyException);
create_exception!(fuzzyterm, InvalidTermError, FuzzyTermError);
create_exception!(fuzzyterm, InvalidInputError, FuzzyTermError);
create_exception!(fuzzyterm, InvalidConfigurationError, FuzzyTermError);
create_exception!(fuzzyterm, DegenerateRatioError, FuzzyTermError);

impl From<MatchError> for PyErr {
    fn from(err: MatchError) -> Self {
        let message = err.to_string();
        match err {
            MatchError::InvalidTerm => InvalidTermError::new_err(message),
            MatchError::InvalidInput(_) => InvalidInputError::new_err(message),
            MatchError::InvalidConfiguration { .. } => InvalidConfigurationError::new_err(message),
            MatchError::DegenerateRatio { .. } => DegenerateRatioError::new_err(message),
        }
    }
}

fn to_variance(max_length_variance: i64) -> PyResult<usize> {
    usize::try_from(max_length_variance).map_err(|_| {
        InvalidConfigurationError::new_err(format!(
            "Invalid configuration for 'max_length_variance': must be >= 0, got {}",
            max_length_variance
        ))
    })
}

// ============================================================================
// Python Result Types
// ============================================================================

/// Candidate occurrence found in a text.
#[pyclass(name = "TermMatch")]
#[derive(Clone, Debug)]
pub struct PyTermMatch {
    #[pyo3(get)]
    pub match_term: String,

    #[pyo3(get)]
    pub match_string: String,

    /// Character offset of the match in the source text
    #[pyo3(get)]
    pub match_offset: usize,

    metadata: BTreeMap<String, String>,
}

#[pymethods]
impl PyTermMatch {
    #[new]
    #[pyo3(signature = (match_term, match_string, match_offset, metadata=None))]
    fn new(
        match_term: String,
        match_string: String,
        match_offset: usize,
        metadata: Option<BTreeMap<String, String>>,
    ) -> Self {
        Self {
            match_term,
            match_string,
            match_offset,
            metadata: metadata.unwrap_or_default(),
        }
    }

    #[getter]
    fn metadata(&self) -> BTreeMap<String, String> {
        self.metadata.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "TermMatch(match_term='{}', match_string='{}', match_offset={})",
            self.match_term, self.match_string, self.match_offset
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.match_term == other.match_term
            && self.match_string == other.match_string
            && self.match_offset == other.match_offset
            && self.metadata == other.metadata
    }
}

impl From<TermMatch> for PyTermMatch {
    fn from(m: TermMatch) -> Self {
        Self {
            match_term: m.matched_term,
            match_string: m.match_string,
            match_offset: m.offset,
            metadata: m.metadata,
        }
    }
}

/// A caller-supplied Python object paired with its extracted match string.
struct PyCandidate {
    obj: PyObject,
    text: String,
}

impl MatchString for PyCandidate {
    fn match_string(&self) -> &str {
        &self.text
    }
}

fn extract_match_string(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(s.to_str()?.to_owned());
    }
    if let Ok(m) = obj.downcast::<PyTermMatch>() {
        return Ok(m.borrow().match_string.clone());
    }
    if let Ok(value) = obj.get_item("match_string") {
        if let Ok(s) = value.extract::<String>() {
            return Ok(s);
        }
    }
    Err(InvalidInputError::new_err(format!(
        "Invalid input: candidate must be a str, TermMatch or mapping with a \
         'match_string' str, got {}",
        obj.get_type().name()?
    )))
}

fn extract_candidates(candidates: &[Bound<'_, PyAny>]) -> PyResult<Vec<PyCandidate>> {
    candidates
        .iter()
        .map(|obj| {
            Ok(PyCandidate {
                text: extract_match_string(obj)?,
                obj: obj.clone().unbind(),
            })
        })
        .collect()
}

// ============================================================================
// Matcher
// ============================================================================

/// Approximate term matcher for noisy OCR text.
#[pyclass(name = "FuzzyMatcher")]
struct PyFuzzyMatcher {
    inner: FuzzyMatcher,
}

#[pymethods]
impl PyFuzzyMatcher {
    #[new]
    #[pyo3(signature = (
        char_match_threshold=0.5,
        ngram_threshold=0.5,
        levenshtein_threshold=0.5,
        max_length_variance=1,
    ))]
    fn new(
        char_match_threshold: f64,
        ngram_threshold: f64,
        levenshtein_threshold: f64,
        max_length_variance: i64,
    ) -> PyResult<Self> {
        let config = MatcherConfig::new(
            char_match_threshold,
            ngram_threshold,
            levenshtein_threshold,
            to_variance(max_length_variance)?,
        )?;
        Ok(Self {
            inner: FuzzyMatcher::new(config)?,
        })
    }

    /// Replace the four numeric knobs, keeping the suffix stripping setting.
    fn configure(
        &mut self,
        char_match_threshold: f64,
        ngram_threshold: f64,
        levenshtein_threshold: f64,
        max_length_variance: i64,
    ) -> PyResult<()> {
        let config = self
            .inner
            .config()
            .with_char_match_threshold(char_match_threshold)
            .with_ngram_threshold(ngram_threshold)
            .with_levenshtein_threshold(levenshtein_threshold)
            .with_max_length_variance(to_variance(max_length_variance)?);
        self.inner = self.inner.with_config(config)?;
        Ok(())
    }

    fn enable_strip_suffix(&mut self) -> PyResult<()> {
        self.inner = self
            .inner
            .with_config(self.inner.config().enable_suffix_stripping())?;
        Ok(())
    }

    fn disable_strip_suffix(&mut self) -> PyResult<()> {
        self.inner = self
            .inner
            .with_config(self.inner.config().disable_suffix_stripping())?;
        Ok(())
    }

    #[getter]
    fn perform_strip_suffix(&self) -> bool {
        self.inner.config().strip_suffix
    }

    /// Find, filter and return candidate occurrences of `keyword` in `text`.
    #[pyo3(signature = (text, keyword, ngram_size=2))]
    fn find_candidates(
        &self,
        py: Python<'_>,
        text: &str,
        keyword: &str,
        ngram_size: usize,
    ) -> PyResult<Vec<PyTermMatch>> {
        // Release GIL during matching
        let found = py.allow_threads(|| {
            self.inner
                .find_candidates_with_ngram_size(text, keyword, ngram_size)
        })?;
        Ok(found.into_iter().map(PyTermMatch::from).collect())
    }

    /// Filter caller-supplied candidates, returning the surviving objects.
    #[pyo3(signature = (candidates, keyword, ngram_size=2))]
    fn filter_candidates(
        &self,
        candidates: Vec<Bound<'_, PyAny>>,
        keyword: &str,
        ngram_size: usize,
    ) -> PyResult<Vec<PyObject>> {
        let candidates = extract_candidates(&candidates)?;
        let kept = self
            .inner
            .filter_candidates_with_ngram_size(candidates, keyword, ngram_size)?;
        Ok(kept.into_iter().map(|c| c.obj).collect())
    }

    /// Score candidates and return dicts ordered by descending total.
    #[pyo3(signature = (candidates, keyword, ngram_size=2))]
    fn rank_candidates<'py>(
        &self,
        py: Python<'py>,
        candidates: Vec<Bound<'py, PyAny>>,
        keyword: &str,
        ngram_size: usize,
    ) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let candidates = extract_candidates(&candidates)?;
        let ranked = self
            .inner
            .rank_candidates_with_ngram_size(candidates, keyword, ngram_size)?;

        ranked
            .into_iter()
            .map(|score| {
                let dict = PyDict::new(py);
                dict.set_item("candidate", score.candidate.obj)?;
                dict.set_item("char", score.char)?;
                dict.set_item("ngram", score.ngram)?;
                dict.set_item("levenshtein", score.levenshtein)?;
                dict.set_item("total", score.total)?;
                Ok(dict)
            })
            .collect()
    }

    fn __repr__(&self) -> String {
        let c = self.inner.config();
        format!(
            "FuzzyMatcher(char_match_threshold={}, ngram_threshold={}, \
             levenshtein_threshold={}, max_length_variance={}, strip_suffix={})",
            c.char_match_threshold,
            c.ngram_threshold,
            c.levenshtein_threshold,
            c.max_length_variance,
            c.strip_suffix
        )
    }
}

// ============================================================================
// Python Module
// ============================================================================

#[pymodule]
fn fuzzyterm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add("FuzzyTermError", py.get_type::<FuzzyTermError>())?;
    m.add("InvalidTermError", py.get_type::<InvalidTermError>())?;
    m.add("InvalidInputError", py.get_type::<InvalidInputError>())?;
    m.add("InvalidConfigurationError", py.get_type::<InvalidConfigurationError>())?;
    m.add("DegenerateRatioError", py.get_type::<DegenerateRatioError>())?;

    m.add_class::<PyTermMatch>()?;
    m.add_class::<PyFuzzyMatcher>()?;
    Ok(())
}
