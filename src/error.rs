//! Error types for the finscope service layer.

use finscope_evidence::SearchError;

/// Top-level error type for finscope.
#[derive(Debug, thiserror::Error)]
pub enum FinscopeError {
    /// Configuration file or value error.
    #[error("config error: {0}")]
    Config(String),

    /// The caller supplied an unusable question or URL.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Evidence configuration or article fetch error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report encoding error.
    #[error("serialize error: {0}")]
    Serialize(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FinscopeError>;
