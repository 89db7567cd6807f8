//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file
//! and convert into the typed settings the layers consume.

use coach_application::OrchestrationConfig;
use coach_domain::{DEFAULT_DELIMITER, Provider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Service endpoint settings
    pub service: FileServiceConfig,
    /// Recommendation provider and timing settings
    pub recommendation: FileRecommendationConfig,
    /// Word input settings
    pub puzzle: FilePuzzleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServiceConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for FileServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecommendationConfig {
    /// Provider kind: `rule-based`, `local`, or `cloud`.
    pub provider: String,
    /// Model name for local/cloud providers.
    pub model: Option<String>,
    /// Client-side timeout for recommendation calls. Longer than the
    /// ordinary request timeout to tolerate slow model inference.
    pub timeout_secs: u64,
    /// Grace delay before a displayed recommendation fades after a
    /// recorded response.
    pub fade_delay_ms: u64,
}

impl Default for FileRecommendationConfig {
    fn default() -> Self {
        Self {
            provider: "rule-based".to_string(),
            model: None,
            timeout_secs: 120,
            fade_delay_ms: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePuzzleConfig {
    /// Single-character token delimiter for pasted word lists.
    pub delimiter: String,
}

impl Default for FilePuzzleConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl FileConfig {
    /// Timing knobs for the recommendation coordinator.
    pub fn orchestration(&self) -> OrchestrationConfig {
        OrchestrationConfig::default()
            .with_timeout(Duration::from_secs(self.recommendation.timeout_secs))
            .with_fade_delay(Duration::from_millis(self.recommendation.fade_delay_ms))
    }

    /// The configured default provider, if the kind parses.
    pub fn default_provider(&self) -> Result<Provider, String> {
        Provider::from_kind(
            &self.recommendation.provider,
            self.recommendation.model.as_deref(),
        )
    }

    /// The configured delimiter, defaulting to a comma for anything that
    /// is not a single character.
    pub fn delimiter(&self) -> char {
        let mut chars = self.puzzle.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => DEFAULT_DELIMITER,
        }
    }
}
