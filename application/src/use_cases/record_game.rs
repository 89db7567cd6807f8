//! Game result recording use case
//!
//! Persists a finished session exactly once. Server-side dedup is keyed
//! on `(puzzle_id, day)`; on top of that the recorder enforces a client
//! invariant: after the first success for a session the trigger is
//! permanently disabled for that session.

use crate::ports::event_sink::{SessionEvent, SessionEventSink};
use crate::ports::game_result_store::{GameResultStore, GameResultStoreError};
use coach_domain::{GameResultRecord, Provider, PuzzleSession};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from game result recording
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordGameError {
    /// Recording attempted before the session reached a terminal state.
    #[error("Session has not finished yet")]
    IncompleteSession,

    /// This session was already recorded successfully in this client.
    /// Enforced locally, regardless of server-side dedup.
    #[error("This session's result was already recorded")]
    AlreadyRecorded,

    /// The server already holds a record for this puzzle and day.
    /// Terminal; the trigger stays disabled.
    #[error("A game result already exists for this puzzle and day")]
    Duplicate,

    #[error(transparent)]
    Store(#[from] GameResultStoreError),
}

impl RecordGameError {
    pub fn is_retryable(&self) -> bool {
        match self {
            RecordGameError::Store(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Use case that records finished games
pub struct GameRecorder {
    store: Arc<dyn GameResultStore>,
    events: Arc<dyn SessionEventSink>,
    recorded_sessions: Mutex<HashSet<String>>,
}

impl GameRecorder {
    pub fn new(store: Arc<dyn GameResultStore>, events: Arc<dyn SessionEventSink>) -> Self {
        Self {
            store,
            events,
            recorded_sessions: Mutex::new(HashSet::new()),
        }
    }

    /// Whether the record trigger is still enabled for this session.
    pub fn can_record(&self, session_id: &str) -> bool {
        !self
            .recorded_sessions
            .lock()
            .map(|set| set.contains(session_id))
            .unwrap_or(false)
    }

    /// Record the finished session. `game_date` defaults to now.
    pub async fn record(
        &self,
        session: &PuzzleSession,
        provider: Option<&Provider>,
        game_date: Option<DateTime<Utc>>,
    ) -> Result<GameResultRecord, RecordGameError> {
        if !session.status().is_terminal() {
            return Err(RecordGameError::IncompleteSession);
        }
        if !self.can_record(session.id()) {
            return Err(RecordGameError::AlreadyRecorded);
        }

        let mut record = GameResultRecord::from_session(
            session,
            game_date.unwrap_or_else(Utc::now),
        )
        .map_err(|_| RecordGameError::IncompleteSession)?;
        if let Some(provider) = provider {
            record = record.with_provider(provider.name(), provider.model().map(String::from));
        }

        match self.store.insert(&record).await {
            Ok(stored) => {
                if let Ok(mut set) = self.recorded_sessions.lock() {
                    set.insert(session.id().to_string());
                }
                info!(puzzle = stored.puzzle_id, solved = stored.solved, "Game result recorded");
                self.events.emit(SessionEvent::GameRecorded {
                    record: stored.clone(),
                });
                Ok(stored)
            }
            Err(GameResultStoreError::Duplicate) => {
                warn!(puzzle = record.puzzle_id, "Game result already recorded server-side");
                // Treat the server-side duplicate as final for this
                // session as well.
                if let Ok(mut set) = self.recorded_sessions.lock() {
                    set.insert(session.id().to_string());
                }
                Err(RecordGameError::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List stored records.
    pub async fn list(&self) -> Result<Vec<GameResultRecord>, RecordGameError> {
        Ok(self.store.list().await?)
    }
}
