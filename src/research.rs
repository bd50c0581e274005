//! Research service: one configured retriever plus report rendering.
//!
//! The registry is built once when the service is constructed and shared
//! read-only by every run the service performs.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use finscope_evidence::{
    ArticleContent, ConfidenceSummary, DuckDuckGoProvider, Evidence, RetrievalMode, Retriever,
    ScoredResult, SearchProvider,
};
use serde::Serialize;

use crate::config::FinscopeConfig;
use crate::error::{FinscopeError, Result};

/// Evidence for one question, ready to print or serialise.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchReport {
    pub question: String,
    pub mode: RetrievalMode,
    pub confidence: ConfidenceSummary,
    pub results: Vec<ScoredResult>,
    pub context: String,
    pub generated_at: DateTime<Utc>,
}

impl ResearchReport {
    fn new(question: &str, mode: RetrievalMode, evidence: Evidence) -> Self {
        Self {
            question: question.to_owned(),
            mode,
            confidence: evidence.confidence,
            results: evidence.scored,
            context: evidence.context,
            generated_at: Utc::now(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FinscopeError::Serialize`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| FinscopeError::Serialize(e.to_string()))
    }

    /// Plain-text rendering: the context block followed by a source table.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Question: {}", self.question);
        let _ = writeln!(
            out,
            "Mode: {}  Confidence: {:.2} over {} source(s)",
            self.mode, self.confidence.aggregate_score, self.confidence.result_count
        );
        out.push('\n');
        out.push_str(&self.context);
        out.push('\n');

        if !self.results.is_empty() {
            out.push_str("\nSources:\n");
            for (i, scored) in self.results.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  [{}] {:.2}  {}  {}",
                    i + 1,
                    scored.score,
                    scored.result.domain,
                    scored.result.url
                );
            }
        }
        out
    }
}

/// Runs evidence retrieval for validated questions.
#[derive(Debug)]
pub struct ResearchService<P> {
    retriever: Retriever<P>,
    config: FinscopeConfig,
}

impl ResearchService<DuckDuckGoProvider> {
    /// Service backed by DuckDuckGo, configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if any section of `config` is invalid.
    pub fn from_config(config: FinscopeConfig) -> Result<Self> {
        let provider = DuckDuckGoProvider::new(config.search.clone());
        Self::with_provider(provider, config)
    }
}

impl<P: SearchProvider> ResearchService<P> {
    /// Service backed by an arbitrary provider.
    ///
    /// # Errors
    ///
    /// Returns an error if any section of `config` is invalid.
    pub fn with_provider(provider: P, config: FinscopeConfig) -> Result<Self> {
        let registry = Arc::new(config.credibility.build_registry()?);
        tracing::debug!(
            entries = registry.len(),
            default_score = registry.default_score(),
            "credibility registry built"
        );
        let retriever = Retriever::new(provider, registry, config.search.clone())?;
        Ok(Self { retriever, config })
    }

    pub fn config(&self) -> &FinscopeConfig {
        &self.config
    }

    /// Gather evidence for `question`.
    ///
    /// Provider failures never surface here; they reduce the evidence
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns [`FinscopeError::InvalidInput`] for a blank question.
    pub async fn research(&self, question: &str, mode: RetrievalMode) -> Result<ResearchReport> {
        let question = question.trim();
        if question.is_empty() {
            return Err(FinscopeError::InvalidInput(
                "question must not be empty".into(),
            ));
        }
        tracing::trace!(question, %mode, "research started");

        let evidence = self.retriever.run(question, mode).await;
        tracing::info!(
            %mode,
            results = evidence.confidence.result_count,
            confidence = evidence.confidence.aggregate_score,
            "research complete"
        );
        Ok(ResearchReport::new(question, mode, evidence))
    }

    /// Fetch one source in full.
    ///
    /// # Errors
    ///
    /// Returns [`FinscopeError::InvalidInput`] for a non-http(s) URL, or
    /// [`FinscopeError::Search`] if the page cannot be fetched or has no
    /// readable text.
    pub async fn read_article(&self, url: &str, max_chars: usize) -> Result<ArticleContent> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FinscopeError::InvalidInput(format!(
                "article URL must be http(s): {url:?}"
            )));
        }
        let article = finscope_evidence::fetch_article(url, &self.config.search, max_chars).await?;
        Ok(article)
    }
}
