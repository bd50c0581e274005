//! Configuration for finscope, loaded from TOML.
//!
//! ```toml
//! [search]
//! quick_max_results = 6
//! deep_max_results = [5, 4, 3]
//! provider_timeout_seconds = 8
//!
//! [credibility]
//! default_score = 0.5
//!
//! [credibility.overrides]
//! "valueresearchonline.com" = 0.7
//! ```
//!
//! Every field is optional; a missing file at the default location means
//! all defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use finscope_evidence::{CredibilityRegistry, DEFAULT_SCORE, EvidenceConfig};
use serde::{Deserialize, Serialize};

use crate::error::{FinscopeError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinscopeConfig {
    /// Retrieval bounds, fallback sites, timeouts and provider settings.
    pub search: EvidenceConfig,
    /// Registry adjustments applied once at startup.
    pub credibility: CredibilityConfig,
}

/// Credibility registry adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredibilityConfig {
    /// Score for domains absent from the registry.
    pub default_score: f64,
    /// Extra or replacement domain scores, merged over the built-in table.
    pub overrides: BTreeMap<String, f64>,
}

impl Default for CredibilityConfig {
    fn default() -> Self {
        Self {
            default_score: DEFAULT_SCORE,
            overrides: BTreeMap::new(),
        }
    }
}

impl CredibilityConfig {
    /// Build the immutable registry for this process.
    ///
    /// # Errors
    ///
    /// Returns [`FinscopeError::Config`] if any score is outside `[0, 1]`.
    pub fn build_registry(&self) -> Result<CredibilityRegistry> {
        CredibilityRegistry::with_overrides(self.default_score, self.overrides.clone())
            .map_err(|e| FinscopeError::Config(e.to_string()))
    }
}

impl FinscopeConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| FinscopeError::Config(e.to_string()))
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields [`FinscopeConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed, or
    /// an explicit path does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => Self::from_file(explicit),
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FinscopeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check every section, including registry scores.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.credibility.build_registry()?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/finscope/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("finscope").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("finscope")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/finscope-config/config.toml")
        }
    }
}
