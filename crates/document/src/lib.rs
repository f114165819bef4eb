//! Document descriptors shared across selector matching: structured URIs with
//! a filesystem-path projection, the candidate document type, and
//! separator-aware path normalization.

mod candidate;
mod error;
pub mod paths;
mod uri;

pub use candidate::CandidateDocument;
pub use error::{DocumentError, Result};
pub use uri::DocumentUri;
