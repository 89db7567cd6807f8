//! Response recording service port

use async_trait::async_trait;
use coach_domain::{GuessOutcome, SessionStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One guess outcome submitted for recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSubmission {
    pub session_id: String,
    pub outcome: GuessOutcome,
    pub attempt_words: Vec<String>,
}

/// Server acknowledgment of a recorded response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseAck {
    pub remaining_words: Vec<String>,
    pub correct_count: usize,
    pub mistake_count: u8,
    pub status: SessionStatus,
}

/// Errors from the response recording service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// Service that records guess outcomes
#[async_trait]
pub trait ResponseService: Send + Sync {
    async fn submit(
        &self,
        submission: &ResponseSubmission,
    ) -> Result<ResponseAck, ResponseServiceError>;
}
