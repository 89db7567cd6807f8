//! Provider value object
//!
//! The backend strategy generating recommendations: a deterministic
//! rule-based heuristic, a locally hosted model, or a cloud model.

use serde::{Deserialize, Serialize};

/// Recommendation provider selection (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Provider {
    RuleBased,
    LocalModel { model: String },
    CloudModel { model: String },
}

impl Provider {
    /// Build a provider from a CLI/config kind plus an optional model name.
    pub fn from_kind(kind: &str, model: Option<&str>) -> Result<Self, String> {
        match kind.trim().to_lowercase().as_str() {
            "rule-based" | "rule" | "rules" => Ok(Provider::RuleBased),
            "local" | "local-model" => Ok(Provider::LocalModel {
                model: model.unwrap_or("llama3").to_string(),
            }),
            "cloud" | "cloud-model" => Ok(Provider::CloudModel {
                model: model.unwrap_or("gpt-4o").to_string(),
            }),
            other => Err(format!("Unknown provider kind: {other}")),
        }
    }

    /// Short provider name for display and game-result records.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::RuleBased => "rule-based",
            Provider::LocalModel { .. } => "local-model",
            Provider::CloudModel { .. } => "cloud-model",
        }
    }

    /// The model identifier, if this provider uses one.
    pub fn model(&self) -> Option<&str> {
        match self {
            Provider::RuleBased => None,
            Provider::LocalModel { model } | Provider::CloudModel { model } => Some(model),
        }
    }

    /// Whether requests for this provider go over the network.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Provider::RuleBased)
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::RuleBased
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.model() {
            Some(model) => write!(f, "{} ({model})", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}
