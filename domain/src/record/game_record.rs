//! Finished-game result record

use crate::session::{PuzzleSession, SessionError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The record persisted once per finished session.
///
/// Server-side uniqueness is keyed on `(puzzle_id, calendar-day(game_date))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResultRecord {
    pub session_id: String,
    pub puzzle_id: String,
    /// ISO-8601 with timezone when serialized.
    pub game_date: DateTime<Utc>,
    pub solved: bool,
    pub groups_found: usize,
    pub mistakes: u8,
    pub total_guesses: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl GameResultRecord {
    /// Build a record from a terminal session.
    ///
    /// Fails with `InvalidState` if the session has not finished; the
    /// recorder maps that into its `IncompleteSession` error.
    pub fn from_session(
        session: &PuzzleSession,
        game_date: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if !session.status().is_terminal() {
            return Err(SessionError::InvalidState(session.status()));
        }
        Ok(Self {
            session_id: session.id().to_string(),
            puzzle_id: session.puzzle_id().to_string(),
            game_date,
            solved: session.solved(),
            groups_found: session.groups_found(),
            mistakes: session.mistake_count(),
            total_guesses: session.total_guesses(),
            provider_name: None,
            model_name: None,
        })
    }

    pub fn with_provider(
        mut self,
        provider_name: impl Into<String>,
        model_name: Option<String>,
    ) -> Self {
        self.provider_name = Some(provider_name.into());
        self.model_name = model_name;
        self
    }

    /// The calendar day the dedup key is built from.
    pub fn game_day(&self) -> chrono::NaiveDate {
        self.game_date.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GroupColor, GuessAttempt, GuessOutcome, SessionStatus};
    use crate::words::WordSetValidator;

    fn finished_session() -> PuzzleSession {
        let set = WordSetValidator::validate("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p").unwrap();
        let initial = set.words().to_vec();
        let mut session = PuzzleSession::new("s-9", "puzzle-9", set)
            .activate(initial)
            .unwrap();
        for _ in 0..4 {
            session = session
                .apply_guess(&GuessAttempt::new(vec!["a".into()], GuessOutcome::Incorrect))
                .unwrap()
                .session;
        }
        session
    }

    #[test]
    fn record_from_lost_session() {
        let session = finished_session();
        let record = GameResultRecord::from_session(&session, Utc::now()).unwrap();
        assert_eq!(record.puzzle_id, "puzzle-9");
        assert!(!record.solved);
        assert_eq!(record.mistakes, 4);
        assert_eq!(record.total_guesses, 4);
        assert_eq!(record.groups_found, 0);
    }

    #[test]
    fn record_rejects_unfinished_session() {
        let set = WordSetValidator::validate("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p").unwrap();
        let initial = set.words().to_vec();
        let session = PuzzleSession::new("s-9", "puzzle-9", set)
            .activate(initial)
            .unwrap();
        let err = GameResultRecord::from_session(&session, Utc::now()).unwrap_err();
        assert_eq!(err, SessionError::InvalidState(SessionStatus::Active));
    }

    #[test]
    fn provider_attribution_is_optional() {
        let session = finished_session();
        let record = GameResultRecord::from_session(&session, Utc::now())
            .unwrap()
            .with_provider("cloud-model", Some("gpt-4o".to_string()));
        assert_eq!(record.provider_name.as_deref(), Some("cloud-model"));
        assert_eq!(record.model_name.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn game_date_serializes_with_timezone() {
        let session = finished_session();
        let record = GameResultRecord::from_session(&session, Utc::now()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        let date = json["game_date"].as_str().unwrap();
        assert!(date.ends_with('Z') || date.contains('+'));
    }
}
