//! HTTP adapter for the game result store
//!
//! `POST` creates a record keyed by `(puzzle_id, day(game_date))`; the
//! server answers 409 for a duplicate, which maps to the dedicated
//! `Duplicate` error so callers can distinguish it from transient faults.

use super::client::{HttpConfig, read_api_error};
use async_trait::async_trait;
use coach_application::{GameResultStore, GameResultStoreError};
use coach_domain::GameResultRecord;
use reqwest::StatusCode;
use tracing::debug;

/// Game result store client (`POST`/`GET /api/game-results`)
pub struct GameResultClient {
    http: reqwest::Client,
    config: HttpConfig,
}

impl GameResultClient {
    pub fn new(http: reqwest::Client, config: HttpConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl GameResultStore for GameResultClient {
    async fn insert(
        &self,
        record: &GameResultRecord,
    ) -> Result<GameResultRecord, GameResultStoreError> {
        let url = self.config.url("/api/game-results");
        debug!(%url, puzzle = record.puzzle_id, "Recording game result");

        let response = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| GameResultStoreError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<GameResultRecord>()
                .await
                .map_err(|e| GameResultStoreError::Server(format!("invalid record: {e}")));
        }
        if status == StatusCode::CONFLICT {
            return Err(GameResultStoreError::Duplicate);
        }

        let (_code, message) = read_api_error(response).await;
        Err(GameResultStoreError::Server(message))
    }

    async fn list(&self) -> Result<Vec<GameResultRecord>, GameResultStoreError> {
        let url = self.config.url("/api/game-results");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GameResultStoreError::Network(e.to_string()))?;

        if response.status().is_success() {
            return response
                .json::<Vec<GameResultRecord>>()
                .await
                .map_err(|e| GameResultStoreError::Server(format!("invalid listing: {e}")));
        }

        let (_code, message) = read_api_error(response).await;
        Err(GameResultStoreError::Server(message))
    }
}
