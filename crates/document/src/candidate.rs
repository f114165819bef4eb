use serde::{Deserialize, Serialize};

use crate::uri::DocumentUri;

/// The document being evaluated against selectors.
///
/// `is_synchronized` is true when the in-memory state of the document is
/// authoritative (an open, live buffer) rather than a reference known only by
/// its on-disk location. Selectors that do not opt in never match
/// unsynchronized documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDocument {
    pub uri: DocumentUri,
    pub language_id: String,
    pub is_synchronized: bool,
}

impl CandidateDocument {
    pub fn new(uri: DocumentUri, language_id: impl Into<String>, is_synchronized: bool) -> Self {
        Self {
            uri,
            language_id: language_id.into(),
            is_synchronized,
        }
    }

    /// A live document (`is_synchronized` set), the common case.
    pub fn synchronized(uri: DocumentUri, language_id: impl Into<String>) -> Self {
        Self::new(uri, language_id, true)
    }
}
