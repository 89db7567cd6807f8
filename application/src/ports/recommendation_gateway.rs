//! Recommendation gateway port
//!
//! Defines the interface for obtaining suggestions from a recommendation
//! provider. Implementations (rule-based heuristic, HTTP model clients)
//! live in the infrastructure layer.

use async_trait::async_trait;
use coach_domain::{RecommendationRequest, RecommendationResult};
use thiserror::Error;

/// Classified provider failures.
///
/// Raw provider error strings are matched against known patterns by the
/// infrastructure layer; the raw message is carried only when no pattern
/// matches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFault {
    #[error("The puzzle image is too large for this provider")]
    ImageTooLarge,

    #[error("No 4x4 word grid could be found")]
    GridNotFound,

    #[error("The selected model does not support image input")]
    NoVisionSupport,

    #[error("The model endpoint is unreachable")]
    ModelUnreachable,

    #[error("{0}")]
    Other(String),
}

impl ProviderFault {
    /// Short user-facing hint shown next to the retry affordance.
    pub fn hint(&self) -> &'static str {
        match self {
            ProviderFault::ImageTooLarge => "Try a smaller screenshot or the rule-based provider",
            ProviderFault::GridNotFound => "Check that the words were entered correctly",
            ProviderFault::NoVisionSupport => "Pick a vision-capable model or paste the words",
            ProviderFault::ModelUnreachable => "Check the model endpoint and try again",
            ProviderFault::Other(_) => "Try again or switch providers",
        }
    }
}

/// Errors that can occur during recommendation gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider error: {0}")]
    Provider(ProviderFault),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Gateway failures are transport or provider faults and are always
    /// worth a retry.
    pub fn is_retryable(&self) -> bool {
        true
    }
}

/// Gateway for recommendation providers
#[async_trait]
pub trait RecommendationGateway: Send + Sync {
    /// Produce one suggestion for the given snapshot of the session.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_display_uses_category_text() {
        assert_eq!(
            ProviderFault::GridNotFound.to_string(),
            "No 4x4 word grid could be found"
        );
        assert_eq!(
            ProviderFault::Other("raw upstream text".to_string()).to_string(),
            "raw upstream text"
        );
    }

    #[test]
    fn gateway_errors_are_retryable() {
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::Provider(ProviderFault::ModelUnreachable).is_retryable());
    }
}
