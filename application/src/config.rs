//! Orchestration timing knobs

use std::time::Duration;

/// Timing configuration for the recommendation coordinator.
///
/// The request timeout is deliberately longer than an ordinary network
/// timeout to tolerate slow model inference. The fade delay is the grace
/// period before a displayed recommendation is cleared after a response
/// is recorded.
#[derive(Debug, Clone)]
pub struct OrchestrationConfig {
    pub recommendation_timeout: Duration,
    pub fade_delay: Duration,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            recommendation_timeout: Duration::from_secs(120),
            fade_delay: Duration::from_millis(600),
        }
    }
}

impl OrchestrationConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.recommendation_timeout = timeout;
        self
    }

    pub fn with_fade_delay(mut self, delay: Duration) -> Self {
        self.fade_delay = delay;
        self
    }
}
