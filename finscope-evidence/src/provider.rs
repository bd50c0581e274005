//! Trait definition for pluggable search providers.
//!
//! The pipeline consumes exactly one external interface: given a query and
//! a result bound, return an ordered list of raw hits. Implementations may
//! fail; the retrieval orchestrator converts every failure into an empty
//! batch.

use std::sync::Arc;

use crate::error::SearchError;
use crate::types::{RetrievalQuery, SearchHit};

/// A pluggable web search backend.
///
/// Implementors perform no deduplication. `query.max_results` bounds but
/// does not guarantee the number of hits returned, and an empty list is a
/// normal outcome.
///
/// All implementations must be `Send + Sync` so deep-mode queries can run
/// concurrently against a shared provider.
pub trait SearchProvider: Send + Sync {
    /// Run one search and return hits in provider relevance order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the response cannot be
    /// parsed, or the provider is rate-limiting/blocking requests.
    fn search(
        &self,
        query: &RetrievalQuery,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, SearchError>> + Send;

    /// Human-readable provider name, used in log fields.
    fn name(&self) -> &'static str;
}

/// A shared provider is still a provider.
impl<P: SearchProvider> SearchProvider for Arc<P> {
    async fn search(&self, query: &RetrievalQuery) -> Result<Vec<SearchHit>, SearchError> {
        self.as_ref().search(query).await
    }

    fn name(&self) -> &'static str {
        self.as_ref().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mock provider for testing trait bounds and async execution.
    struct MockProvider {
        hits: Vec<SearchHit>,
        fail: bool,
    }

    impl SearchProvider for MockProvider {
        async fn search(&self, query: &RetrievalQuery) -> Result<Vec<SearchHit>, SearchError> {
            if self.fail {
                return Err(SearchError::Http("mock provider failure".into()));
            }
            Ok(self.hits.iter().take(query.max_results).cloned().collect())
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    fn hit(n: usize) -> SearchHit {
        SearchHit {
            title: format!("Hit {n}"),
            url: format!("https://example.com/{n}"),
            snippet: String::new(),
        }
    }

    #[test]
    fn mock_provider_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockProvider>();
    }

    #[tokio::test]
    async fn max_results_bounds_hits() {
        let provider = MockProvider {
            hits: (0..10).map(hit).collect(),
            fail: false,
        };
        let hits = provider
            .search(&RetrievalQuery::new("nifty", 3))
            .await
            .expect("should succeed");
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title, "Hit 0");
    }

    #[tokio::test]
    async fn arc_provider_delegates() {
        let provider = Arc::new(MockProvider {
            hits: (0..2).map(hit).collect(),
            fail: false,
        });
        let hits = provider
            .search(&RetrievalQuery::new("nifty", 10))
            .await
            .expect("should succeed");
        assert_eq!(hits.len(), 2);
        assert_eq!(SearchProvider::name(&provider), "mock");
    }

    #[tokio::test]
    async fn errors_propagate_from_provider() {
        let provider = MockProvider {
            hits: vec![],
            fail: true,
        };
        let err = provider
            .search(&RetrievalQuery::new("nifty", 3))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("mock provider failure"));
        assert_eq!(provider.name(), "mock");
    }
}
