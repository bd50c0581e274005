//! Error type for the evidence crate.
//!
//! The retrieval pipeline absorbs these per provider call; `run_quick` and
//! `run_deep` never return them. They surface from providers called
//! directly, from configuration checks, and from the article reader.

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Request to the provider or an article host failed, including non-2xx
    /// responses.
    #[error("request failed: {0}")]
    Http(String),

    /// Response body could not be interpreted.
    #[error("unreadable response: {0}")]
    Parse(String),

    /// A provider call outlived its time bound.
    #[error("provider timed out: {0}")]
    Timeout(String),

    #[error("invalid evidence config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
