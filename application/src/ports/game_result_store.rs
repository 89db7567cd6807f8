//! Game result store port
//!
//! Persists one record per finished session, keyed server-side on
//! `(puzzle_id, calendar-day(game_date))`.

use async_trait::async_trait;
use coach_domain::GameResultRecord;
use thiserror::Error;

/// Errors from the game result store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameResultStoreError {
    /// A record for this puzzle and day already exists. Terminal, never
    /// retried.
    #[error("Game already recorded for this puzzle and day")]
    Duplicate,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl GameResultStoreError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GameResultStoreError::Duplicate)
    }
}

/// Store for finished-game records
#[async_trait]
pub trait GameResultStore: Send + Sync {
    /// Persist a record. A duplicate `(puzzle_id, day)` pair must surface
    /// [`GameResultStoreError::Duplicate`], distinct from transient errors.
    async fn insert(&self, record: &GameResultRecord)
    -> Result<GameResultRecord, GameResultStoreError>;

    /// List all stored records.
    async fn list(&self) -> Result<Vec<GameResultRecord>, GameResultStoreError>;
}
