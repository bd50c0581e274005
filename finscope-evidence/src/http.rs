//! One `reqwest` client setup shared by the search provider and the article
//! reader.

use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};

use crate::config::EvidenceConfig;
use crate::error::SearchError;

/// Desktop browser identities; one is picked per client when no custom
/// User-Agent is configured.
const BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:134.0) Gecko/20100101 Firefox/134.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36 Edg/132.0.0.0",
];

const MAX_REDIRECTS: usize = 10;

/// Client for provider calls and article fetches.
///
/// Its own request timeout equals `provider_timeout_seconds`, so a stalled
/// socket is dropped even outside the orchestrator's time bound.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if TLS or the client cannot be initialised.
pub fn build_client(config: &EvidenceConfig) -> Result<reqwest::Client, SearchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-IN,en;q=0.9"));

    reqwest::Client::builder()
        .default_headers(headers)
        .user_agent(user_agent_for(config))
        .cookie_store(true)
        .timeout(Duration::from_secs(config.provider_timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| SearchError::Http(format!("cannot initialise HTTP client: {e}")))
}

/// The configured User-Agent, or a random browser identity.
pub fn user_agent_for(config: &EvidenceConfig) -> String {
    match config.user_agent.as_deref().map(str::trim) {
        Some(custom) if !custom.is_empty() => custom.to_owned(),
        _ => BROWSER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(BROWSER_AGENTS[0])
            .to_owned(),
    }
}
