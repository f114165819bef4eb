//! Scoring: how specifically a selector applies to a candidate document.

use std::fmt;

use serde::{Deserialize, Serialize};

use docmatch_document::CandidateDocument;

use crate::filter::DocumentFilter;
use crate::selector::{DocumentSelector, SelectorClause};

/// Specificity of a selector match.
///
/// Scores compare as integers: 0 means the selector does not apply, 5 is a
/// wildcard-level match, 10 is an exact match and the maximum. Ranking
/// callers sort by `Score` directly and may stop searching once they see 10.
/// The serde form is the integer; values other than the three constants are
/// rejected on deserialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    /// The selector does not apply.
    pub const NONE: Self = Self(0);
    /// A wildcard matched where nothing more specific did.
    pub const WILDCARD: Self = Self(5);
    /// An exact match; no clause can score higher.
    pub const EXACT: Self = Self(10);

    /// The raw integer value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// True for any nonzero score.
    #[must_use]
    pub const fn is_match(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Score> for u8 {
    fn from(value: Score) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NONE),
            5 => Ok(Self::WILDCARD),
            10 => Ok(Self::EXACT),
            other => Err(format!("score must be 0, 5 or 10 (got {other})")),
        }
    }
}

/// Score a selector against a candidate document.
///
/// An absent selector scores [`Score::NONE`]. A list scores as the maximum
/// over its clauses, each evaluated independently; evaluation stops early
/// once a clause reaches [`Score::EXACT`], which no later clause could beat.
///
/// Filter clauses evaluate scheme, then language, then pattern. Any present
/// field that disagrees with the candidate vetoes the whole clause to
/// [`Score::NONE`]. An exact scheme or language match sets the running score
/// to [`Score::EXACT`] outright; a wildcard language only raises it to at
/// least [`Score::WILDCARD`], so an earlier exact scheme survives a later
/// `language: "*"`.
#[must_use]
pub fn score(selector: Option<&DocumentSelector>, candidate: &CandidateDocument) -> Score {
    let Some(selector) = selector else {
        return Score::NONE;
    };

    match selector {
        DocumentSelector::Single(clause) => score_clause(clause, candidate),
        DocumentSelector::List(clauses) => {
            let mut best = Score::NONE;
            for clause in clauses {
                let value = score_clause(clause, candidate);
                if value == Score::EXACT {
                    return value;
                }
                if value > best {
                    best = value;
                }
            }
            best
        }
    }
}

fn score_clause(clause: &SelectorClause, candidate: &CandidateDocument) -> Score {
    match clause {
        SelectorClause::Language(language) => score_shorthand(language, candidate),
        SelectorClause::Filter(filter) => score_filter(filter, candidate),
    }
}

/// The bare-string shorthand matches synchronized documents only.
fn score_shorthand(language: &str, candidate: &CandidateDocument) -> Score {
    if !candidate.is_synchronized {
        return Score::NONE;
    }

    if language == "*" {
        Score::WILDCARD
    } else if language == candidate.language_id {
        Score::EXACT
    } else {
        Score::NONE
    }
}

fn score_filter(filter: &DocumentFilter, candidate: &CandidateDocument) -> Score {
    if !candidate.is_synchronized && !filter.matches_unsynchronized() {
        return Score::NONE;
    }

    // A filter with no effective fields leaves this at NONE.
    let mut ret = Score::NONE;

    if let Some(scheme) = filter.effective_scheme() {
        if scheme == candidate.uri.scheme() {
            ret = Score::EXACT;
        } else if scheme == "*" {
            ret = Score::WILDCARD;
        } else {
            return Score::NONE;
        }
    }

    if let Some(language) = filter.effective_language() {
        if language == candidate.language_id {
            // Overwrite, not max: an exact language match is maximal even
            // after a wildcard scheme.
            ret = Score::EXACT;
        } else if language == "*" {
            ret = ret.max(Score::WILDCARD);
        } else {
            return Score::NONE;
        }
    }

    if let Some(pattern) = filter.effective_pattern() {
        if pattern.matches(candidate.uri.fs_path()) {
            ret = Score::EXACT;
        } else {
            return Score::NONE;
        }
    }

    ret
}
