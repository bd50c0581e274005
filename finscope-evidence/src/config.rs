//! Evidence retrieval configuration with sensible defaults.
//!
//! [`EvidenceConfig`] controls result bounds per mode, the quick-mode
//! fallback sites, deep-mode qualifiers, the per-call provider timeout and
//! the size of the context block.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// DuckDuckGo's JavaScript-free results endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Configuration for evidence retrieval.
///
/// Every field has a default so a partial TOML table deserialises cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Result bound for the quick-mode query and its fallback.
    pub quick_max_results: usize,
    /// Result bounds for the deep-mode queries: as-is, analysis, outlook.
    pub deep_max_results: [usize; 3],
    /// Domains appended as `site:` clauses to the quick-mode fallback query.
    pub fallback_sites: Vec<String>,
    /// Appended to the question for the deep-mode analysis query.
    pub analysis_qualifier: String,
    /// Appended to the question for the deep-mode outlook query.
    pub outlook_qualifier: String,
    /// Time bound on each provider call, in seconds.
    pub provider_timeout_seconds: u64,
    /// Maximum size of the context block, in bytes.
    pub max_context_chars: usize,
    /// Whether to request safe search filtering from the provider.
    pub safe_search: bool,
    /// Provider region code (DuckDuckGo `kl` parameter).
    pub region: String,
    /// Custom User-Agent string. If `None`, rotates through a built-in list.
    pub user_agent: Option<String>,
    /// Provider endpoint. Overridable for mirrors and tests.
    pub endpoint: String,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            quick_max_results: 6,
            deep_max_results: [5, 4, 3],
            fallback_sites: vec![
                "rbi.org.in".into(),
                "sebi.gov.in".into(),
                "reuters.com".into(),
                "economictimes.indiatimes.com".into(),
                "moneycontrol.com".into(),
            ],
            analysis_qualifier: "analysis expert opinion".into(),
            outlook_qualifier: "future outlook implications".into(),
            provider_timeout_seconds: 8,
            max_context_chars: 12_000,
            safe_search: true,
            region: "wt-wt".into(),
            user_agent: None,
            endpoint: DEFAULT_ENDPOINT.into(),
        }
    }
}

impl EvidenceConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `quick_max_results` and every `deep_max_results` entry must be > 0
    /// - `provider_timeout_seconds` must be > 0
    /// - `max_context_chars` must be > 0
    /// - qualifiers must not be blank
    /// - `endpoint` must parse as an absolute URL
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.quick_max_results == 0 {
            return Err(SearchError::Config(
                "quick_max_results must be greater than 0".into(),
            ));
        }
        if self.deep_max_results.contains(&0) {
            return Err(SearchError::Config(
                "deep_max_results entries must be greater than 0".into(),
            ));
        }
        if self.provider_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "provider_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_context_chars == 0 {
            return Err(SearchError::Config(
                "max_context_chars must be greater than 0".into(),
            ));
        }
        if self.analysis_qualifier.trim().is_empty() || self.outlook_qualifier.trim().is_empty() {
            return Err(SearchError::Config(
                "deep-mode qualifiers must not be blank".into(),
            ));
        }
        if url::Url::parse(&self.endpoint).is_err() {
            return Err(SearchError::Config(format!(
                "endpoint is not a valid URL: {}",
                self.endpoint
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = EvidenceConfig::default();
        assert_eq!(config.quick_max_results, 6);
        assert_eq!(config.deep_max_results, [5, 4, 3]);
        assert_eq!(config.provider_timeout_seconds, 8);
        assert_eq!(config.max_context_chars, 12_000);
        assert!(config.safe_search);
        assert!(config.user_agent.is_none());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn default_fallback_sites_cover_regulators_and_press() {
        let config = EvidenceConfig::default();
        for site in ["rbi.org.in", "sebi.gov.in", "reuters.com"] {
            assert!(config.fallback_sites.iter().any(|s| s == site), "{site}");
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(EvidenceConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_quick_bound_rejected() {
        let config = EvidenceConfig {
            quick_max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quick_max_results"));
    }

    #[test]
    fn zero_deep_bound_rejected() {
        let config = EvidenceConfig {
            deep_max_results: [5, 0, 3],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("deep_max_results"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = EvidenceConfig {
            provider_timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("provider_timeout_seconds"));
    }

    #[test]
    fn zero_context_bound_rejected() {
        let config = EvidenceConfig {
            max_context_chars: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_qualifier_rejected() {
        let config = EvidenceConfig {
            outlook_qualifier: "   ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("qualifiers"));
    }

    #[test]
    fn invalid_endpoint_rejected() {
        let config = EvidenceConfig {
            endpoint: "not a url".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }

    #[test]
    fn empty_fallback_sites_allowed() {
        let config = EvidenceConfig {
            fallback_sites: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EvidenceConfig =
            serde_json::from_str(r#"{"quick_max_results": 3}"#).expect("deserialize");
        assert_eq!(config.quick_max_results, 3);
        assert_eq!(config.deep_max_results, [5, 4, 3]);
    }
}
