use thiserror::Error;

/// Result type for selector construction
pub type Result<T> = std::result::Result<T, SelectorError>;

/// Errors raised while building selectors. Scoring itself never fails.
#[derive(Error, Debug)]
pub enum SelectorError {
    /// The glob engine rejected a pattern at compile time
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },
}
