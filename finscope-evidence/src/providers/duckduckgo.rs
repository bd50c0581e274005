//! DuckDuckGo search provider.
//!
//! Uses the HTML-only endpoint (`https://html.duckduckgo.com/html/` by
//! default) which requires no JavaScript and no API key.

use crate::config::EvidenceConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::{RetrievalQuery, SearchHit};
use scraper::{Html, Selector};
use url::Url;

/// DuckDuckGo HTML scraper.
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    config: EvidenceConfig,
}

impl DuckDuckGoProvider {
    pub fn new(config: EvidenceConfig) -> Self {
        Self { config }
    }

    /// Extract the target URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps links as `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
    /// Direct links are returned as-is.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl Default for DuckDuckGoProvider {
    fn default() -> Self {
        Self::new(EvidenceConfig::default())
    }
}

impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &RetrievalQuery) -> Result<Vec<SearchHit>, SearchError> {
        tracing::trace!(query = %query.text, max_results = query.max_results, "DuckDuckGo search");

        let client = http::build_client(&self.config)?;

        let mut params = vec![("q", query.text.as_str()), ("kl", self.config.region.as_str())];
        if self.config.safe_search {
            params.push(("kp", "1"));
        }

        let response = client
            .post(&self.config.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("DuckDuckGo returned {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_duckduckgo_html(&html, query.max_results)
    }

    fn name(&self) -> &'static str {
        "DuckDuckGo"
    }
}

/// Parse a DuckDuckGo HTML results page into hits, skipping ads.
pub(crate) fn parse_duckduckgo_html(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchHit>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| SearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| SearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| SearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut hits = Vec::new();

    for element in document.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }

        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        // A missing or unresolvable link still yields a hit; the
        // deduplicator drops hits with empty URLs.
        let url = title_el
            .value()
            .attr("href")
            .and_then(DuckDuckGoProvider::extract_url)
            .unwrap_or_default();

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(SearchHit {
            title,
            url,
            snippet,
        });
    }

    tracing::debug!(count = hits.len(), "DuckDuckGo results parsed");
    Ok(hits)
}
