//! Compiled path patterns.
//!
//! Patterns are declared either as a plain glob string or as a
//! `{base, pattern}` pair scoped to a base directory, and are compiled into a
//! [`globset`] matcher when the owning filter is built. Scoring only ever
//! calls [`PathPattern::matches`], which is infallible and allocation-free on
//! the hot path. Globs are matched in `/`-separated space: backslashes in
//! pattern text and candidate paths are treated as separators, not escapes.

use std::borrow::Cow;
use std::fmt;

use globset::{GlobBuilder, GlobMatcher};
use serde::{Deserialize, Serialize};

use docmatch_document::paths;

use crate::error::{Result, SelectorError};

/// Options controlling glob compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions {
    /// Match globs (and relative-pattern bases) case-insensitively
    pub case_insensitive: bool,
    /// When set, `*` and `?` do not match path separators; `**` still does
    pub require_literal_separator: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            require_literal_separator: true,
        }
    }
}

/// Declaration shape of a base-relative pattern: `pattern` applies to paths
/// under `base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelativePattern {
    pub base: String,
    pub pattern: String,
}

/// A path pattern compiled for matching against `DocumentUri::fs_path`
/// renderings.
///
/// The literal form matches when its text equals the candidate path exactly
/// or when its glob accepts the whole path. The relative form requires its
/// normalized base to be a segment-boundary prefix of the candidate path and
/// runs the glob against the remainder only; exact-equality never applies to
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPattern", into = "RawPattern")]
pub struct PathPattern {
    source: PatternSource,
    options: PatternOptions,
    matcher: GlobMatcher,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSource {
    Literal(String),
    Relative {
        base: String,
        normalized_base: String,
        pattern: String,
    },
}

impl PathPattern {
    /// Compile a literal pattern with default options.
    pub fn literal(pattern: impl Into<String>) -> Result<Self> {
        Self::literal_with(pattern, PatternOptions::default())
    }

    /// Compile a literal pattern.
    pub fn literal_with(pattern: impl Into<String>, options: PatternOptions) -> Result<Self> {
        let pattern = pattern.into();
        let matcher = compile(&pattern, options)?;
        Ok(Self {
            source: PatternSource::Literal(pattern),
            options,
            matcher,
        })
    }

    /// Compile a base-relative pattern with default options.
    pub fn relative(base: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        Self::relative_with(base, pattern, PatternOptions::default())
    }

    /// Compile a base-relative pattern.
    ///
    /// The base is normalized with platform separator rules here, once, so
    /// that prefix comparisons against candidate paths are
    /// separator-consistent.
    pub fn relative_with(
        base: impl Into<String>,
        pattern: impl Into<String>,
        options: PatternOptions,
    ) -> Result<Self> {
        let base = base.into();
        let pattern = pattern.into();
        let normalized_base = paths::normalize(&base);
        let matcher = compile(&pattern, options)?;
        Ok(Self {
            source: PatternSource::Relative {
                base,
                normalized_base,
                pattern,
            },
            options,
            matcher,
        })
    }

    /// Test a candidate filesystem path against this pattern.
    #[must_use]
    pub fn matches(&self, fs_path: &str) -> bool {
        match &self.source {
            PatternSource::Literal(text) => {
                text == fs_path || self.matcher.is_match(forward(fs_path).as_ref())
            }
            PatternSource::Relative {
                normalized_base,
                pattern,
                ..
            } => {
                // An empty glob matches nothing, not even the bare base.
                if pattern.is_empty() {
                    return false;
                }
                strip_base(fs_path, normalized_base, self.options.case_insensitive)
                    .is_some_and(|rest| self.matcher.is_match(forward(rest).as_ref()))
            }
        }
    }

    /// The glob text as declared
    #[must_use]
    pub fn glob_text(&self) -> &str {
        match &self.source {
            PatternSource::Literal(text) => text,
            PatternSource::Relative { pattern, .. } => pattern,
        }
    }

    /// The declared base of a relative pattern
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        match &self.source {
            PatternSource::Literal(_) => None,
            PatternSource::Relative { base, .. } => Some(base),
        }
    }

    #[must_use]
    pub const fn options(&self) -> PatternOptions {
        self.options
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.options == other.options
    }
}

impl Eq for PathPattern {}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            PatternSource::Literal(text) => f.write_str(text),
            PatternSource::Relative { base, pattern, .. } => write!(f, "{base}/{pattern}"),
        }
    }
}

impl TryFrom<RelativePattern> for PathPattern {
    type Error = SelectorError;

    fn try_from(value: RelativePattern) -> Result<Self> {
        Self::relative(value.base, value.pattern)
    }
}

fn compile(pattern: &str, options: PatternOptions) -> Result<GlobMatcher> {
    let forward = pattern.replace('\\', "/");
    let glob = GlobBuilder::new(&forward)
        .literal_separator(options.require_literal_separator)
        .case_insensitive(options.case_insensitive)
        .backslash_escape(false)
        .build()
        .map_err(|source| SelectorError::InvalidGlob {
            pattern: pattern.to_owned(),
            source,
        })?;
    Ok(glob.compile_matcher())
}

fn forward(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Strip `base` off `path` at a segment boundary: the remainder must be
/// empty or start right after a separator.
fn strip_base<'a>(path: &'a str, base: &str, case_insensitive: bool) -> Option<&'a str> {
    let rest = if case_insensitive {
        let head = path.get(..base.len())?;
        if !head.eq_ignore_ascii_case(base) {
            return None;
        }
        &path[base.len()..]
    } else {
        path.strip_prefix(base)?
    };
    if rest.is_empty() {
        return Some("");
    }
    if base.ends_with(is_separator) {
        return Some(rest);
    }
    rest.strip_prefix(is_separator)
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPattern {
    Literal(String),
    Relative(RelativePattern),
}

impl TryFrom<RawPattern> for PathPattern {
    type Error = SelectorError;

    fn try_from(value: RawPattern) -> Result<Self> {
        match value {
            RawPattern::Literal(text) => Self::literal(text),
            RawPattern::Relative(relative) => relative.try_into(),
        }
    }
}

impl From<PathPattern> for RawPattern {
    fn from(value: PathPattern) -> Self {
        match value.source {
            PatternSource::Literal(text) => Self::Literal(text),
            PatternSource::Relative { base, pattern, .. } => {
                Self::Relative(RelativePattern { base, pattern })
            }
        }
    }
}
