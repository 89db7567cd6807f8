//! Session startup use case
//!
//! Validation runs first and short-circuits locally; only a canonical
//! word set ever reaches the setup service. The session is created in
//! `Waiting` state and activated with the initial word list the service
//! returns.

use crate::ports::setup_service::{SetupError, SetupService};
use coach_domain::{
    PuzzleSession, SessionError, ValidationError, WordSetValidator,
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors from session startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartSessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Use case that validates raw input and starts a puzzle session
pub struct SessionStarter {
    setup: Arc<dyn SetupService>,
}

impl SessionStarter {
    pub fn new(setup: Arc<dyn SetupService>) -> Self {
        Self { setup }
    }

    /// Validate `raw` (split on `delimiter`) and start a session.
    pub async fn start(
        &self,
        raw: &str,
        delimiter: char,
    ) -> Result<PuzzleSession, StartSessionError> {
        let words = WordSetValidator::validate_with(raw, delimiter)?;

        let response = self.setup.setup(&words).await?;
        info!(puzzle = response.puzzle_id, "Puzzle setup complete");

        let id = format!("session-{}", Utc::now().timestamp_millis());
        let session = PuzzleSession::new(id, response.puzzle_id, words)
            .activate(response.remaining_words)?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::setup_service::SetupResponse;
    use async_trait::async_trait;
    use coach_domain::SessionStatus;
    use std::sync::Mutex;

    struct MockSetup {
        calls: Mutex<usize>,
        shuffle: bool,
        fail_with: Option<SetupError>,
    }

    impl MockSetup {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(0),
                shuffle: true,
                fail_with: None,
            })
        }

        fn failing(err: SetupError) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(0),
                shuffle: false,
                fail_with: Some(err),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl SetupService for MockSetup {
        async fn setup(&self, words: &coach_domain::WordSet) -> Result<SetupResponse, SetupError> {
            *self.calls.lock().unwrap() += 1;
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let mut board = words.words().to_vec();
            if self.shuffle {
                board.reverse();
            }
            Ok(SetupResponse {
                puzzle_id: "puzzle-7".to_string(),
                remaining_words: board,
                status: SessionStatus::Active,
            })
        }
    }

    #[tokio::test]
    async fn valid_input_starts_an_active_session() {
        let setup = MockSetup::ok();
        let starter = SessionStarter::new(setup.clone());

        let session = starter
            .start("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p", ',')
            .await
            .unwrap();
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.puzzle_id(), "puzzle-7");
        assert_eq!(session.remaining_words().len(), 16);
        // Board order comes from the service, not the input
        assert_eq!(session.remaining_words()[0], "p");
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_service() {
        let setup = MockSetup::ok();
        let starter = SessionStarter::new(setup.clone());

        let err = starter.start("a,b,c", ',').await.unwrap_err();
        assert_eq!(
            err,
            StartSessionError::Validation(ValidationError::WrongCount { found: 3 })
        );
        assert_eq!(setup.calls(), 0);
    }

    #[tokio::test]
    async fn setup_failure_is_propagated() {
        let setup = MockSetup::failing(SetupError::Server("boom".into()));
        let starter = SessionStarter::new(setup);

        let err = starter
            .start("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p", ',')
            .await
            .unwrap_err();
        assert!(matches!(err, StartSessionError::Setup(SetupError::Server(_))));
    }
}
