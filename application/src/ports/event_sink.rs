//! Session event sink port
//!
//! Side actions (audit logging, UI refresh) subscribe to explicit events
//! emitted at well-defined points, rather than watching state changes.

use coach_domain::{GameResultRecord, GuessRecord};

/// Events emitted by the use cases
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A guess outcome was applied to the session.
    GuessRecorded {
        session_id: String,
        record: GuessRecord,
    },
    /// The session just reached a terminal state. Triggers game-result
    /// recording eligibility.
    GameFinished { session_id: String, solved: bool },
    /// A finished game was persisted.
    GameRecorded { record: GameResultRecord },
    /// A recommendation is now displayed.
    RecommendationShown {
        provider_used: String,
        words: Vec<String>,
    },
    /// The displayed recommendation faded out after a recorded response.
    RecommendationCleared,
    /// The session was discarded for a new puzzle.
    SessionReset { session_id: String },
}

/// Sink for session events
pub trait SessionEventSink: Send + Sync {
    fn emit(&self, event: SessionEvent);
}

/// Sink that drops all events
pub struct NoopEventSink;

impl SessionEventSink for NoopEventSink {
    fn emit(&self, _event: SessionEvent) {}
}
