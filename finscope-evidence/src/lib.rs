//! # finscope-evidence
//!
//! Evidence retrieval and credibility scoring for financial questions.
//!
//! Given a question, this crate issues one or more web searches, merges and
//! deduplicates the hits, scores each source against a curated credibility
//! registry, summarises overall confidence, and renders a bounded,
//! source-attributed context block for a downstream text generator.
//!
//! ## Design
//!
//! - Quick mode: one query, plus a single site-restricted fallback when it
//!   finds nothing
//! - Deep mode: three angles (as-is, analysis, outlook) queried concurrently
//!   and merged in a fixed order
//! - Provider failures and timeouts degrade to empty batches; a run always
//!   completes
//! - The credibility registry is immutable after startup and shared
//!   read-only across runs
//!
//! ## Security
//!
//! - No API keys or secrets
//! - Search queries are logged only at trace level

pub mod article;
pub mod config;
pub mod credibility;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod provider;
pub mod providers;
pub mod types;

pub use article::{extract_article, fetch_article};
pub use config::EvidenceConfig;
pub use credibility::{CredibilityRegistry, DEFAULT_SCORE};
pub use error::{Result, SearchError};
pub use pipeline::retrieval::Retriever;
pub use provider::SearchProvider;
pub use providers::DuckDuckGoProvider;
pub use types::{
    ArticleContent, ConfidenceSummary, Evidence, NormalizedResult, RetrievalMode,
    RetrievalQuery, ScoredResult, SearchHit,
};

use std::sync::Arc;

/// Build a retriever backed by DuckDuckGo and the built-in registry.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> finscope_evidence::Result<()> {
/// let retriever = finscope_evidence::default_retriever(Default::default())?;
/// let evidence = retriever.run_quick("RBI repo rate").await;
/// println!("confidence {}", evidence.confidence.aggregate_score);
/// println!("{}", evidence.context);
/// # Ok(())
/// # }
/// ```
pub fn default_retriever(config: EvidenceConfig) -> Result<Retriever<DuckDuckGoProvider>> {
    let provider = DuckDuckGoProvider::new(config.clone());
    Retriever::new(provider, Arc::new(CredibilityRegistry::builtin()), config)
}
