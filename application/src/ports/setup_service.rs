//! Setup service port
//!
//! Accepts canonical 16-word content and returns the initial board.

use async_trait::async_trait;
use coach_domain::{SessionStatus, WordSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Initial board returned by the setup service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupResponse {
    pub puzzle_id: String,
    /// The 16 words in board order (possibly shuffled server-side).
    pub remaining_words: Vec<String>,
    pub status: SessionStatus,
}

/// Errors from the setup service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Setup rejected empty content")]
    EmptyContent,

    #[error("Setup rejected malformed content: {0}")]
    Malformed(String),

    #[error("Setup server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Service that initializes a puzzle from validated words
#[async_trait]
pub trait SetupService: Send + Sync {
    async fn setup(&self, words: &WordSet) -> Result<SetupResponse, SetupError>;
}
