//! Credibility scoring and aggregate confidence.
//!
//! Each result is scored by a pure registry lookup on its domain. The
//! aggregate confidence of a set is the arithmetic mean of its scores,
//! rounded to two decimals.
//!
//! ```text
//! aggregate = round2(sum(score_i) / n)     n > 0
//! aggregate = 0.0                          n = 0
//! ```

use crate::credibility::CredibilityRegistry;
use crate::types::{ConfidenceSummary, NormalizedResult, ScoredResult};

/// Attach a credibility score to every result.
///
/// One output per input, same order, nothing filtered.
pub fn score_all(
    results: Vec<NormalizedResult>,
    registry: &CredibilityRegistry,
) -> Vec<ScoredResult> {
    results
        .into_iter()
        .map(|result| {
            let score = registry.score_for(&result.domain);
            ScoredResult { result, score }
        })
        .collect()
}

/// Summarise a scored set as its mean credibility.
///
/// An empty set yields exactly `0.0` with a count of zero.
pub fn summarize(scored: &[ScoredResult]) -> ConfidenceSummary {
    if scored.is_empty() {
        return ConfidenceSummary::EMPTY;
    }
    let total: f64 = scored.iter().map(|s| s.score).sum();
    let mean = total / scored.len() as f64;
    ConfidenceSummary {
        aggregate_score: round2(mean),
        result_count: scored.len(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
