//! Selector declarations: a bare language shorthand, a filter, or an ordered
//! list of either.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use docmatch_document::CandidateDocument;

use crate::filter::DocumentFilter;
use crate::score::Score;

/// One clause of a selector.
///
/// The bare-string shorthand names a language id (or `"*"`) and only ever
/// matches synchronized documents; a filter spells out its constraints,
/// including whether unsynchronized documents are eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorClause {
    Language(String),
    Filter(DocumentFilter),
}

/// A document selector: a single clause or an ordered list of clauses.
///
/// The serde shapes are exactly what an editor host stores: a JSON string, a
/// filter object, or an array mixing both. A list scores as the maximum over
/// its clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentSelector {
    Single(SelectorClause),
    List(Vec<SelectorClause>),
}

impl DocumentSelector {
    /// Uniform slice view over the clauses.
    #[must_use]
    pub fn clauses(&self) -> &[SelectorClause] {
        match self {
            Self::Single(clause) => std::slice::from_ref(clause),
            Self::List(clauses) => clauses,
        }
    }

    /// Score this selector against a candidate document.
    #[must_use]
    pub fn score(&self, candidate: &CandidateDocument) -> Score {
        crate::score::score(Some(self), candidate)
    }

    /// True when the selector applies to the candidate at all.
    #[must_use]
    pub fn matches(&self, candidate: &CandidateDocument) -> bool {
        self.score(candidate).is_match()
    }

    /// Parse a selector declaration from raw bytes.
    ///
    /// JSON is tried first; on failure the bytes are reparsed as TOML (which
    /// covers the filter-table form) and bridged through the same model.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value = match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(json_err) => {
                let utf8 =
                    std::str::from_utf8(bytes).map_err(|err| anyhow!("{json_err}; {err}"))?;
                let toml_value: toml::Value = toml::from_str(utf8).map_err(|toml_err| {
                    anyhow!(
                        "Selector is not valid JSON or TOML ({json_err}); TOML parse error: {toml_err}"
                    )
                })?;
                serde_json::to_value(toml_value)
                    .map_err(|err| anyhow!("Failed to convert TOML selector to JSON: {err}"))?
            }
        };

        let selector: Self =
            serde_json::from_value(value).map_err(|err| anyhow!("Selector parse error: {err}"))?;
        log::debug!("Loaded selector with {} clause(s)", selector.clauses().len());
        Ok(selector)
    }

    /// Read and parse a selector declaration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read selector file {}", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("Invalid selector file {}", path.display()))
    }
}

impl From<&str> for SelectorClause {
    fn from(language: &str) -> Self {
        Self::Language(language.to_owned())
    }
}

impl From<String> for SelectorClause {
    fn from(language: String) -> Self {
        Self::Language(language)
    }
}

impl From<DocumentFilter> for SelectorClause {
    fn from(filter: DocumentFilter) -> Self {
        Self::Filter(filter)
    }
}

impl From<SelectorClause> for DocumentSelector {
    fn from(clause: SelectorClause) -> Self {
        Self::Single(clause)
    }
}

impl From<&str> for DocumentSelector {
    fn from(language: &str) -> Self {
        Self::Single(language.into())
    }
}

impl From<String> for DocumentSelector {
    fn from(language: String) -> Self {
        Self::Single(language.into())
    }
}

impl From<DocumentFilter> for DocumentSelector {
    fn from(filter: DocumentFilter) -> Self {
        Self::Single(filter.into())
    }
}

impl From<Vec<SelectorClause>> for DocumentSelector {
    fn from(clauses: Vec<SelectorClause>) -> Self {
        Self::List(clauses)
    }
}

impl FromIterator<SelectorClause> for DocumentSelector {
    fn from_iter<I: IntoIterator<Item = SelectorClause>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accepts_string_object_and_array_shapes() {
        let shorthand: DocumentSelector = serde_json::from_str("\"rust\"").unwrap();
        assert_eq!(shorthand, DocumentSelector::from("rust"));

        let filter: DocumentSelector =
            serde_json::from_str(r#"{"language": "rust", "scheme": "file"}"#).unwrap();
        assert_eq!(filter.clauses().len(), 1);

        let list: DocumentSelector =
            serde_json::from_str(r#"["rust", {"scheme": "untitled"}]"#).unwrap();
        assert_eq!(list.clauses().len(), 2);
        assert_eq!(list.clauses()[0], SelectorClause::from("rust"));
    }

    #[test]
    fn rejects_unknown_filter_fields_in_any_shape() {
        assert!(serde_json::from_str::<DocumentSelector>(r#"{"lang": "rust"}"#).is_err());
        assert!(
            serde_json::from_str::<DocumentSelector>(r#"["rust", {"lang": "rust"}]"#).is_err()
        );
    }

    #[test]
    fn from_bytes_accepts_json_and_toml() {
        let json = DocumentSelector::from_bytes(br#"{"language": "rust"}"#).unwrap();
        let toml = DocumentSelector::from_bytes(b"language = \"rust\"").unwrap();
        assert_eq!(json, toml);
    }

    #[test]
    fn from_bytes_reports_both_parse_failures() {
        let err = DocumentSelector::from_bytes(b"not { valid ]").unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("JSON or TOML"), "{msg}");
    }

    #[test]
    fn serialization_preserves_the_declared_shape() {
        let selector = DocumentSelector::from(vec![
            SelectorClause::from("rust"),
            SelectorClause::Filter(DocumentFilter {
                scheme: Some("file".into()),
                ..DocumentFilter::default()
            }),
        ]);
        let json = serde_json::to_string(&selector).unwrap();
        assert_eq!(json, r#"["rust",{"scheme":"file"}]"#);

        let shorthand = DocumentSelector::from("toml");
        assert_eq!(serde_json::to_string(&shorthand).unwrap(), "\"toml\"");
    }

    #[test]
    fn conversions_build_the_expected_variants() {
        assert_eq!(
            DocumentSelector::from("rust").clauses(),
            &[SelectorClause::Language("rust".to_owned())]
        );

        let collected: DocumentSelector = ["rust", "toml"]
            .into_iter()
            .map(SelectorClause::from)
            .collect();
        assert_eq!(collected.clauses().len(), 2);
    }
}
