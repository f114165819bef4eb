//! # Docmatch Selector
//!
//! Document selectors and the scoring rules that rank them, for
//! provider-dispatch in editor-like hosts: when several registered providers
//! (formatters, completion sources, hover providers, ...) could serve a
//! document, each provider's selector is scored against the document and the
//! best score wins.
//!
//! A selector is a bare language id (`"rust"`), a filter over language, URI
//! scheme and path pattern, or an ordered list of either. Scoring returns a
//! [`Score`] in `{0, 5, 10}`: 0 means the selector does not apply, 5 is a
//! wildcard-level match, 10 is an exact match that cannot be beaten.
//!
//! ## Example
//!
//! ```rust
//! use docmatch_document::{CandidateDocument, DocumentUri};
//! use docmatch_selector::{DocumentSelector, Score};
//!
//! let selector = DocumentSelector::from_bytes(
//!     br#"["toml", {"language": "rust", "scheme": "file"}]"#,
//! )?;
//!
//! let candidate = CandidateDocument::synchronized(
//!     DocumentUri::parse("file:///proj/src/lib.rs")?,
//!     "rust",
//! );
//!
//! assert_eq!(selector.score(&candidate), Score::EXACT);
//!
//! // A catch-all selector still applies, but ranks below the exact one.
//! let generic = DocumentSelector::from("*");
//! assert!(generic.score(&candidate) < selector.score(&candidate));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Scoring is pure and synchronous; patterns are compiled once when a
//! selector is built or deserialized, so the scoring path does no I/O and no
//! allocation.

mod error;
mod filter;
mod pattern;
mod score;
mod selector;

pub use error::{Result, SelectorError};
pub use filter::DocumentFilter;
pub use pattern::{PathPattern, PatternOptions, RelativePattern};
pub use score::{score, Score};
pub use selector::{DocumentSelector, SelectorClause};
