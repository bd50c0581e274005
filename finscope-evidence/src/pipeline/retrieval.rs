//! Retrieval orchestrator: query planning, fan-out, fallback, and the
//! normalise → score → summarise → format sequence.
//!
//! Quick mode issues one query and, only if it produced no usable results,
//! exactly one site-restricted fallback. Deep mode issues three
//! independent queries concurrently and merges them in a fixed order.
//! Provider failures and timeouts never abort a run; they count as an
//! empty batch for that call.

use std::sync::Arc;
use std::time::Duration;

use crate::config::EvidenceConfig;
use crate::credibility::CredibilityRegistry;
use crate::error::SearchError;
use crate::provider::SearchProvider;
use crate::types::{Evidence, NormalizedResult, RetrievalMode, RetrievalQuery, SearchHit};

use super::context::{bound_context, format_context};
use super::dedup::normalize_and_dedupe;
use super::scoring::{score_all, summarize};

/// Runs evidence retrieval against one provider and a shared registry.
///
/// Holds no per-run state; a single `Retriever` can serve concurrent runs.
#[derive(Debug)]
pub struct Retriever<P> {
    provider: P,
    registry: Arc<CredibilityRegistry>,
    config: EvidenceConfig,
}

impl<P: SearchProvider> Retriever<P> {
    /// Create a retriever after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid.
    pub fn new(
        provider: P,
        registry: Arc<CredibilityRegistry>,
        config: EvidenceConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            provider,
            registry,
            config,
        })
    }

    pub fn config(&self) -> &EvidenceConfig {
        &self.config
    }

    pub fn registry(&self) -> &CredibilityRegistry {
        &self.registry
    }

    /// Run the pipeline in the given mode.
    pub async fn run(&self, question: &str, mode: RetrievalMode) -> Evidence {
        match mode {
            RetrievalMode::Quick => self.run_quick(question).await,
            RetrievalMode::Deep => self.run_deep(question).await,
        }
    }

    /// Quick mode: one bounded query, plus one fallback if it came back empty.
    ///
    /// The fallback's results replace the primary's; the (empty) primary
    /// batch is never merged in. There is no second retry.
    pub async fn run_quick(&self, question: &str) -> Evidence {
        let primary = self.quick_query(question);
        let hits = self.fetch_batch("primary", &primary).await;
        let mut results = normalize_and_dedupe(&[hits]);

        if results.is_empty() {
            let fallback = self.fallback_query(question);
            tracing::debug!("primary query produced no results, issuing fallback");
            let hits = self.fetch_batch("fallback", &fallback).await;
            results = normalize_and_dedupe(&[hits]);
        }

        self.finish(results)
    }

    /// Deep mode: three concurrent queries merged as-is, analysis, outlook.
    ///
    /// Batches are collected per query before the merge, so completion order
    /// never affects which duplicate wins. No fallback is applied; an empty
    /// merge is passed through.
    pub async fn run_deep(&self, question: &str) -> Evidence {
        let [primary, analysis, outlook] = self.deep_queries(question);

        let (a, b, c) = futures::future::join3(
            self.fetch_batch("primary", &primary),
            self.fetch_batch("analysis", &analysis),
            self.fetch_batch("outlook", &outlook),
        )
        .await;

        let results = normalize_and_dedupe(&[a, b, c]);
        self.finish(results)
    }

    /// The quick-mode query: the question verbatim.
    pub fn quick_query(&self, question: &str) -> RetrievalQuery {
        RetrievalQuery::new(question, self.config.quick_max_results)
    }

    /// The quick-mode fallback: the question plus `site:` clauses for the
    /// configured authoritative domains, joined with `OR`.
    pub fn fallback_query(&self, question: &str) -> RetrievalQuery {
        let sites = self
            .config
            .fallback_sites
            .iter()
            .map(|site| format!("site:{site}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        RetrievalQuery::new(join_terms(question, &sites), self.config.quick_max_results)
    }

    /// The three deep-mode queries: as-is, analysis, outlook.
    pub fn deep_queries(&self, question: &str) -> [RetrievalQuery; 3] {
        let [primary, analysis, outlook] = self.config.deep_max_results;
        [
            RetrievalQuery::new(question, primary),
            RetrievalQuery::new(
                join_terms(question, &self.config.analysis_qualifier),
                analysis,
            ),
            RetrievalQuery::new(join_terms(question, &self.config.outlook_qualifier), outlook),
        ]
    }

    /// Issue one provider call, absorbing failures and timeouts.
    async fn fetch_batch(&self, label: &'static str, query: &RetrievalQuery) -> Vec<SearchHit> {
        let timeout = Duration::from_secs(self.config.provider_timeout_seconds);
        let provider = self.provider.name();

        let outcome = match tokio::time::timeout(timeout, self.provider.search(query)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SearchError::Timeout(format!(
                "{provider} exceeded {}s",
                self.config.provider_timeout_seconds
            ))),
        };

        match outcome {
            Ok(hits) => {
                tracing::debug!(provider, query = label, count = hits.len(), "provider returned hits");
                hits
            }
            Err(err) => {
                tracing::warn!(provider, query = label, error = %err, "provider call failed, treating as empty batch");
                Vec::new()
            }
        }
    }

    fn finish(&self, results: Vec<NormalizedResult>) -> Evidence {
        let context = bound_context(format_context(&results), self.config.max_context_chars);
        let scored = score_all(results, &self.registry);
        let confidence = summarize(&scored);
        Evidence {
            scored,
            confidence,
            context,
        }
    }
}

/// Join a question and a suffix with one space, ignoring blank parts.
fn join_terms(question: &str, suffix: &str) -> String {
    let question = question.trim();
    let suffix = suffix.trim();
    match (question.is_empty(), suffix.is_empty()) {
        (true, _) => suffix.to_owned(),
        (false, true) => question.to_owned(),
        (false, false) => format!("{question} {suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopProvider;

    impl SearchProvider for NoopProvider {
        async fn search(&self, _query: &RetrievalQuery) -> Result<Vec<SearchHit>, SearchError> {
            Ok(Vec::new())
        }

        fn name(&self) -> &'static str {
            "noop"
        }
    }

    fn retriever() -> Retriever<NoopProvider> {
        Retriever::new(
            NoopProvider,
            Arc::new(CredibilityRegistry::builtin()),
            EvidenceConfig::default(),
        )
        .expect("default config is valid")
    }

    #[test]
    fn invalid_config_rejected() {
        let config = EvidenceConfig {
            quick_max_results: 0,
            ..Default::default()
        };
        let result = Retriever::new(NoopProvider, Arc::new(CredibilityRegistry::builtin()), config);
        assert!(result.is_err());
    }

    #[test]
    fn quick_query_is_verbatim() {
        let query = retriever().quick_query("RBI repo rate");
        assert_eq!(query.text, "RBI repo rate");
        assert_eq!(query.max_results, 6);
    }

    #[test]
    fn fallback_query_appends_site_clauses() {
        let query = retriever().fallback_query("RBI repo rate");
        assert!(query.text.starts_with("RBI repo rate site:rbi.org.in OR site:sebi.gov.in"));
        assert!(query.text.contains("site:reuters.com"));
        assert_eq!(query.max_results, 6);
    }

    #[test]
    fn deep_queries_carry_qualifiers_and_bounds() {
        let [a, b, c] = retriever().deep_queries("Nifty outlook");
        assert_eq!(a.text, "Nifty outlook");
        assert_eq!(a.max_results, 5);
        assert_eq!(b.text, "Nifty outlook analysis expert opinion");
        assert_eq!(b.max_results, 4);
        assert_eq!(c.text, "Nifty outlook future outlook implications");
        assert_eq!(c.max_results, 3);
    }

    #[test]
    fn join_terms_handles_blanks() {
        assert_eq!(join_terms("", "analysis"), "analysis");
        assert_eq!(join_terms("gold", ""), "gold");
        assert_eq!(join_terms("  gold ", " analysis "), "gold analysis");
    }

    #[tokio::test]
    async fn empty_question_does_not_crash() {
        let evidence = retriever().run_quick("").await;
        assert!(evidence.scored.is_empty());
        assert_eq!(evidence.context, "No search results found.");
    }

    #[tokio::test]
    async fn run_dispatches_by_mode() {
        let r = retriever();
        let quick = r.run("gold price", RetrievalMode::Quick).await;
        let deep = r.run("gold price", RetrievalMode::Deep).await;
        assert_eq!(quick.confidence.result_count, 0);
        assert_eq!(deep.confidence.result_count, 0);
    }
}
