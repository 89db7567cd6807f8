//! HTTP adapter for the response recording service

use super::client::{HttpConfig, read_api_error};
use async_trait::async_trait;
use coach_application::{ResponseAck, ResponseService, ResponseServiceError, ResponseSubmission};
use tracing::debug;

/// Response recording client (`POST /api/response`)
pub struct ResponseClient {
    http: reqwest::Client,
    config: HttpConfig,
}

impl ResponseClient {
    pub fn new(http: reqwest::Client, config: HttpConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl ResponseService for ResponseClient {
    async fn submit(
        &self,
        submission: &ResponseSubmission,
    ) -> Result<ResponseAck, ResponseServiceError> {
        let url = self.config.url("/api/response");
        debug!(%url, outcome = %submission.outcome, "Submitting response");

        let response = self
            .http
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| ResponseServiceError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<ResponseAck>()
                .await
                .map_err(|e| ResponseServiceError::Server(format!("invalid ack: {e}")));
        }

        let (_code, message) = read_api_error(response).await;
        if status.is_client_error() {
            Err(ResponseServiceError::Rejected(message))
        } else {
            Err(ResponseServiceError::Server(message))
        }
    }
}
