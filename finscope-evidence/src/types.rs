//! Core types flowing through the evidence pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw hit returned by a search provider.
///
/// No uniqueness guarantee: the same URL may appear several times within
/// one batch or across batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The title of the result page.
    pub title: String,
    /// The URL of the result. May be empty when the provider could not
    /// resolve a link.
    pub url: String,
    /// A text snippet summarising the page content.
    pub snippet: String,
}

/// A hit with a validated URL and its extracted domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// The validated, non-empty URL. Also the deduplication key.
    pub url: String,
    /// Lowercased host with any leading `www.` removed.
    pub domain: String,
    /// The title of the result page.
    pub title: String,
    /// A text snippet summarising the page content.
    pub snippet: String,
}

/// A normalized result with its credibility score attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// The underlying normalized result.
    #[serde(flatten)]
    pub result: NormalizedResult,
    /// Credibility of `result.domain`, in `[0, 1]`.
    pub score: f64,
}

/// Aggregate credibility of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    /// Mean credibility rounded to two decimals; `0.0` for an empty set.
    pub aggregate_score: f64,
    /// Number of results the mean was taken over.
    pub result_count: usize,
}

impl ConfidenceSummary {
    /// The summary of a run that found no evidence.
    pub const EMPTY: Self = Self {
        aggregate_score: 0.0,
        result_count: 0,
    };
}

/// A single provider call: query text plus a result-count bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalQuery {
    /// The text sent to the provider.
    pub text: String,
    /// Upper bound on hits requested; the provider may return fewer.
    pub max_results: usize,
}

impl RetrievalQuery {
    pub fn new(text: impl Into<String>, max_results: usize) -> Self {
        Self {
            text: text.into(),
            max_results,
        }
    }
}

/// Retrieval depth selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// One bounded query with a single site-restricted fallback.
    #[default]
    Quick,
    /// Three concurrent queries (as-is, analysis, outlook) merged together.
    Deep,
}

impl RetrievalMode {
    /// Returns the lowercase name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Deep => "deep",
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Deduplicated results with credibility scores, in first-seen order.
    pub scored: Vec<ScoredResult>,
    /// Mean credibility over `scored`.
    pub confidence: ConfidenceSummary,
    /// Numbered context block handed to the text generator.
    pub context: String,
}

/// Readable text extracted from a fetched article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleContent {
    /// The URL that was fetched.
    pub url: String,
    /// The page title extracted from HTML.
    pub title: String,
    /// Cleaned, readable text with HTML boilerplate stripped.
    pub text: String,
    /// Number of words in the extracted text.
    pub word_count: usize,
}
