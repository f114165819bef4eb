use thiserror::Error;

/// Result type for document descriptor operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors that can occur while constructing document descriptors
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input could not be parsed as a URI
    #[error("Invalid URI '{input}': {source}")]
    InvalidUri {
        input: String,
        source: url::ParseError,
    },

    /// The scheme is empty or contains characters outside `[A-Za-z][A-Za-z0-9+.-]*`
    #[error("Invalid URI scheme '{0}'")]
    InvalidScheme(String),

    /// A percent-escape in the path did not decode to UTF-8
    #[error("URI path '{0}' contains escapes that do not decode to UTF-8")]
    InvalidEncoding(String),
}
