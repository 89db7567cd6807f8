//! HTTP adapter for the setup service

use super::client::{HttpConfig, read_api_error};
use async_trait::async_trait;
use coach_application::{SetupError, SetupResponse, SetupService};
use coach_domain::WordSet;
use serde_json::json;
use tracing::debug;

/// Setup service client (`POST /api/puzzle/setup`)
pub struct SetupClient {
    http: reqwest::Client,
    config: HttpConfig,
}

impl SetupClient {
    pub fn new(http: reqwest::Client, config: HttpConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl SetupService for SetupClient {
    async fn setup(&self, words: &WordSet) -> Result<SetupResponse, SetupError> {
        let url = self.config.url("/api/puzzle/setup");
        debug!(%url, "Submitting puzzle setup");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "words": words.words() }))
            .send()
            .await
            .map_err(|e| SetupError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SetupResponse>()
                .await
                .map_err(|e| SetupError::Malformed(format!("invalid setup response: {e}")));
        }

        let (code, message) = read_api_error(response).await;
        match code.as_str() {
            "EMPTY_CONTENT" => Err(SetupError::EmptyContent),
            "MALFORMED" => Err(SetupError::Malformed(message)),
            _ if status.is_server_error() => Err(SetupError::Server(message)),
            _ => Err(SetupError::Malformed(message)),
        }
    }
}
