//! Document filters: per-field constraints on a candidate document.

use serde::{Deserialize, Serialize};

use crate::pattern::PathPattern;

/// A single filter over candidate documents.
///
/// Every present field must agree with the candidate for the filter to
/// match. `language` and `scheme` accept the wildcard `"*"`; empty strings
/// are treated as if the field was never set. A filter with no constraints
/// at all never matches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentFilter {
    /// Language identifier the candidate must report, or `"*"` for any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// URI scheme the candidate must carry, or `"*"` for any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Pattern the candidate's filesystem path rendering must satisfy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PathPattern>,
    /// Advisory flag for consumers that want a single winning provider.
    /// Scoring never reads it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive: Option<bool>,
    /// Allow the filter to match documents that are not synchronized to
    /// the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_unsynchronized: Option<bool>,
}

impl DocumentFilter {
    /// The language constraint, with empty strings treated as unset.
    #[must_use]
    pub fn effective_language(&self) -> Option<&str> {
        self.language.as_deref().filter(|value| !value.is_empty())
    }

    /// The scheme constraint, with empty strings treated as unset.
    #[must_use]
    pub fn effective_scheme(&self) -> Option<&str> {
        self.scheme.as_deref().filter(|value| !value.is_empty())
    }

    /// The pattern constraint. A literal pattern with empty text counts as
    /// unset; a base-relative pattern is always a constraint.
    #[must_use]
    pub fn effective_pattern(&self) -> Option<&PathPattern> {
        self.pattern
            .as_ref()
            .filter(|p| p.base().is_some() || !p.glob_text().is_empty())
    }

    /// True when no effective constraint is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effective_language().is_none()
            && self.effective_scheme().is_none()
            && self.effective_pattern().is_none()
    }

    /// Whether the filter may match documents not synchronized to the host.
    #[must_use]
    pub fn matches_unsynchronized(&self) -> bool {
        self.match_unsynchronized.unwrap_or(false)
    }

    /// The advisory exclusivity flag.
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.exclusive.unwrap_or(false)
    }
}
