//! HTTP adapter for model-backed recommendation providers
//!
//! Sends the full session snapshot (provider selection, remaining words,
//! guess history, context) and classifies raw provider failures into the
//! user-facing fault categories.

use super::classify::classify_provider_error;
use super::client::{HttpConfig, read_api_error};
use async_trait::async_trait;
use coach_application::{GatewayError, RecommendationGateway};
use coach_domain::{RecommendationRequest, RecommendationResult};
use tracing::debug;

/// Recommendation service client (`POST /api/recommendation`)
pub struct RecommendationClient {
    http: reqwest::Client,
    config: HttpConfig,
}

impl RecommendationClient {
    pub fn new(http: reqwest::Client, config: HttpConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl RecommendationGateway for RecommendationClient {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, GatewayError> {
        let url = self.config.url("/api/recommendation");
        debug!(%url, provider = %request.provider, "Requesting model recommendation");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    GatewayError::Network(e.to_string())
                } else {
                    GatewayError::Provider(classify_provider_error(&e.to_string()))
                }
            })?;

        if response.status().is_success() {
            return response
                .json::<RecommendationResult>()
                .await
                .map_err(|e| GatewayError::InvalidResponse(e.to_string()));
        }

        let (_code, message) = read_api_error(response).await;
        Err(GatewayError::Provider(classify_provider_error(&message)))
    }
}
