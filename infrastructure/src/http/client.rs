//! Shared pieces of the HTTP service adapters

use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout for ordinary service calls. Recommendation
/// calls get their own, longer timeout from the coordinator.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings shared by all service clients
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build the shared reqwest client.
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
    }
}

/// Error body convention used by the coach services:
/// `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Extract `(code, message)` from an error response body, falling back to
/// the raw text when the body doesn't follow the convention.
pub async fn read_api_error(response: reqwest::Response) -> (String, String) {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => (body.error.code, body.error.message),
        Err(_) => (String::new(), text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining_normalizes_slashes() {
        let config = HttpConfig::new("http://localhost:8080/");
        assert_eq!(
            config.url("/api/puzzle/setup"),
            "http://localhost:8080/api/puzzle/setup"
        );
        assert_eq!(config.url("api/response"), "http://localhost:8080/api/response");
    }

    #[test]
    fn error_body_parses_convention() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error": {"code": "MALFORMED", "message": "bad words"}}"#,
        )
        .unwrap();
        assert_eq!(body.error.code, "MALFORMED");
        assert_eq!(body.error.message, "bad words");
    }
}
