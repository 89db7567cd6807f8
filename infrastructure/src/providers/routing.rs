//! Provider routing
//!
//! Dispatches each recommendation request to the adapter matching its
//! provider selection: the in-process rule-based heuristic stays local,
//! model providers go through the HTTP client.

use async_trait::async_trait;
use coach_application::{GatewayError, RecommendationGateway};
use coach_domain::{Provider, RecommendationRequest, RecommendationResult};
use std::sync::Arc;

pub struct RoutingGateway {
    rule_based: Arc<dyn RecommendationGateway>,
    remote: Arc<dyn RecommendationGateway>,
}

impl RoutingGateway {
    pub fn new(
        rule_based: Arc<dyn RecommendationGateway>,
        remote: Arc<dyn RecommendationGateway>,
    ) -> Self {
        Self { rule_based, remote }
    }

    fn resolve(&self, provider: &Provider) -> &dyn RecommendationGateway {
        if provider.is_remote() {
            self.remote.as_ref()
        } else {
            self.rule_based.as_ref()
        }
    }
}

#[async_trait]
impl RecommendationGateway for RoutingGateway {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, GatewayError> {
        self.resolve(&request.provider).recommend(request).await
    }
}
