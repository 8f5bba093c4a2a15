//! Candidate occurrences of a term
//!
//! A candidate is either a bare string or an annotated [`TermMatch`] record.
//! The engine only ever reads the text through [`MatchString`]; every other
//! field of a record passes through filtering and ranking untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Access to the text a candidate contributes to scoring.
pub trait MatchString {
    fn match_string(&self) -> &str;
}

impl MatchString for str {
    fn match_string(&self) -> &str {
        self
    }
}

impl MatchString for String {
    fn match_string(&self) -> &str {
        self.as_str()
    }
}

impl<T: MatchString + ?Sized> MatchString for &T {
    fn match_string(&self) -> &str {
        (**self).match_string()
    }
}

/// A substring of a source text proposed as an occurrence of a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMatch {
    /// The term that was searched for
    pub matched_term: String,
    /// Text extracted at `offset`, possibly with its trailing separator stripped
    pub match_string: String,
    /// Character (not byte) index of the match start in the source text
    pub offset: usize,
    /// Caller-supplied attributes, e.g. page or line number
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl TermMatch {
    pub fn new(
        matched_term: impl Into<String>,
        match_string: impl Into<String>,
        offset: usize,
    ) -> Self {
        Self {
            matched_term: matched_term.into(),
            match_string: match_string.into(),
            offset,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata attribute
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl MatchString for TermMatch {
    fn match_string(&self) -> &str {
        &self.match_string
    }
}

/// Candidate supplied by a collaborator: a plain string or an annotated match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Candidate {
    Plain(String),
    Annotated(TermMatch),
}

impl MatchString for Candidate {
    fn match_string(&self) -> &str {
        match self {
            Candidate::Plain(s) => s,
            Candidate::Annotated(m) => &m.match_string,
        }
    }
}

impl From<String> for Candidate {
    fn from(s: String) -> Self {
        Candidate::Plain(s)
    }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Candidate::Plain(s.to_string())
    }
}

impl From<TermMatch> for Candidate {
    fn from(m: TermMatch) -> Self {
        Candidate::Annotated(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_string_extraction() {
        let plain = Candidate::from("Zwolle");
        let annotated = Candidate::from(TermMatch::new("Zwolle", "Zwol1e", 4));
        assert_eq!(plain.match_string(), "Zwolle");
        assert_eq!(annotated.match_string(), "Zwol1e");
        assert_eq!("Kampen".match_string(), "Kampen");
        assert_eq!(String::from("Kampen").match_string(), "Kampen");
    }

    #[test]
    fn test_metadata() {
        let m = TermMatch::new("1648", "1648", 0)
            .with_metadata("page", "12")
            .with_metadata("line", "3");
        assert_eq!(m.metadata.get("page").map(String::as_str), Some("12"));
        assert_eq!(m.metadata.len(), 2);
    }

    #[test]
    fn test_candidate_deserialize_untagged() {
        let items: Vec<Candidate> = serde_json::from_str(
            r#"[
                "Deventer",
                {
                    "matched_term": "Deventer",
                    "match_string": "Devemter",
                    "offset": 12,
                    "metadata": {"line": "7"}
                }
            ]"#,
        )
        .unwrap();
        assert_eq!(items[0], Candidate::Plain("Deventer".to_string()));
        match &items[1] {
            Candidate::Annotated(m) => {
                assert_eq!(m.offset, 12);
                assert_eq!(m.metadata.get("line").map(String::as_str), Some("7"));
            }
            other => panic!("expected annotated candidate, got {:?}", other),
        }
    }
}
