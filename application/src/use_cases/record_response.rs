//! Response recording use case
//!
//! The single serialized entry point that submits a guess outcome and
//! transitions the session. Attempt words are always supplied explicitly
//! by the caller from whichever recommendation source is displayed; the
//! recorder never infers them.

use crate::ports::event_sink::{SessionEvent, SessionEventSink};
use crate::ports::response_service::{
    ResponseService, ResponseServiceError, ResponseSubmission,
};
use crate::use_cases::request_recommendation::RecommendationCoordinator;
use coach_domain::{GuessAttempt, GuessOutcome, PuzzleSession, SessionError};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from response recording
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordResponseError {
    /// A recording call is already outstanding; the second call is
    /// rejected at the boundary so a guess is never double-counted.
    #[error("A response is already being recorded")]
    InFlight,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Service(#[from] ResponseServiceError),
}

/// The committed result of a recorded response
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    pub session: PuzzleSession,
    /// Whether this recording caused the terminal transition.
    pub just_finished: bool,
}

/// Releases the single-flight guard on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Use case that records one guess outcome against the session.
pub struct ResponseRecorder {
    service: Arc<dyn ResponseService>,
    coordinator: Arc<RecommendationCoordinator>,
    events: Arc<dyn SessionEventSink>,
    in_flight: AtomicBool,
}

impl ResponseRecorder {
    pub fn new(
        service: Arc<dyn ResponseService>,
        coordinator: Arc<RecommendationCoordinator>,
        events: Arc<dyn SessionEventSink>,
    ) -> Self {
        Self {
            service,
            coordinator,
            events,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Record one guess outcome.
    ///
    /// The session transition is computed up front but committed only
    /// after the service acknowledges the submission; on any failure the
    /// caller's session stays untouched and a recommendation fade
    /// scheduled by the coordinator is rolled back.
    pub async fn record(
        &self,
        session: &PuzzleSession,
        outcome: GuessOutcome,
        attempt_words: Vec<String>,
        explanation: Option<String>,
    ) -> Result<RecordedResponse, RecordResponseError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Rejected concurrent response recording");
            return Err(RecordResponseError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        // Validation and state errors are local and short-circuit before
        // any network call.
        let mut attempt = GuessAttempt::new(attempt_words, outcome);
        if let Some(explanation) = explanation {
            attempt = attempt.with_explanation(explanation);
        }
        let applied = session.apply_guess(&attempt)?;

        // Free the recommendation slot and start the fade; rolled back
        // below if the submission fails.
        let had_recommendation = self.coordinator.on_response_recorded().await;

        let submission = ResponseSubmission {
            session_id: session.id().to_string(),
            outcome,
            attempt_words: attempt.words.clone(),
        };

        match self.service.submit(&submission).await {
            Ok(ack) => {
                if ack.mistake_count != applied.session.mistake_count()
                    || ack.correct_count != applied.session.groups_found()
                {
                    warn!(
                        ack_mistakes = ack.mistake_count,
                        local_mistakes = applied.session.mistake_count(),
                        "Server acknowledgment diverges from local session state"
                    );
                }

                if let Some(record) = applied.session.guess_history().last() {
                    self.events.emit(SessionEvent::GuessRecorded {
                        session_id: session.id().to_string(),
                        record: record.clone(),
                    });
                }

                if applied.just_finished {
                    info!(solved = applied.session.solved(), "Session finished");
                    self.events.emit(SessionEvent::GameFinished {
                        session_id: session.id().to_string(),
                        solved: applied.session.solved(),
                    });
                }

                Ok(RecordedResponse {
                    session: applied.session,
                    just_finished: applied.just_finished,
                })
            }
            Err(e) => {
                warn!("Response submission failed, rolling back: {e}");
                if had_recommendation {
                    self.coordinator.on_response_failed().await;
                }
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestrationConfig;
    use crate::ports::event_sink::NoopEventSink;
    use crate::ports::recommendation_gateway::{GatewayError, RecommendationGateway};
    use crate::ports::response_service::ResponseAck;
    use crate::use_cases::request_recommendation::Slot;
    use async_trait::async_trait;
    use coach_domain::{
        GroupColor, Provider, RecommendationRequest, RecommendationResult, SessionStatus,
        WordSetValidator,
    };
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    struct OkGateway;

    #[async_trait]
    impl RecommendationGateway for OkGateway {
        async fn recommend(
            &self,
            request: &RecommendationRequest,
        ) -> Result<RecommendationResult, GatewayError> {
            Ok(RecommendationResult {
                recommended_words: request.remaining_words[..4].to_vec(),
                explanation: "first four".to_string(),
                provider_used: "rule-based".to_string(),
                generation_time_ms: None,
                alternatives: None,
            })
        }
    }

    enum ServiceMode {
        Ok,
        Fail,
        /// Wait for the notify before acknowledging (for the
        /// single-flight test).
        Gated(Arc<Notify>),
    }

    struct MockService {
        mode: StdMutex<ServiceMode>,
        calls: StdMutex<usize>,
    }

    impl MockService {
        fn new(mode: ServiceMode) -> Arc<Self> {
            Arc::new(Self {
                mode: StdMutex::new(mode),
                calls: StdMutex::new(0),
            })
        }

        fn set_mode(&self, mode: ServiceMode) {
            *self.mode.lock().unwrap() = mode;
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ResponseService for MockService {
        async fn submit(
            &self,
            submission: &ResponseSubmission,
        ) -> Result<ResponseAck, ResponseServiceError> {
            *self.calls.lock().unwrap() += 1;
            let gate = match &*self.mode.lock().unwrap() {
                ServiceMode::Ok => None,
                ServiceMode::Fail => {
                    return Err(ResponseServiceError::Network("connection reset".into()));
                }
                ServiceMode::Gated(notify) => Some(Arc::clone(notify)),
            };
            if let Some(notify) = gate {
                notify.notified().await;
            }
            Ok(ResponseAck {
                remaining_words: vec![],
                correct_count: if submission.outcome.is_correct() { 1 } else { 0 },
                mistake_count: if submission.outcome.is_correct() { 0 } else { 1 },
                status: SessionStatus::Active,
            })
        }
    }

    fn active_session() -> PuzzleSession {
        let set = WordSetValidator::validate("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p").unwrap();
        let initial = set.words().to_vec();
        PuzzleSession::new("s-1", "puzzle-1", set)
            .activate(initial)
            .unwrap()
    }

    fn coordinator() -> Arc<RecommendationCoordinator> {
        Arc::new(RecommendationCoordinator::new(
            Arc::new(OkGateway),
            Arc::new(NoopEventSink),
            &OrchestrationConfig::default(),
        ))
    }

    fn words(list: [&str; 4]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn correct_guess_commits_after_ack() {
        let service = MockService::new(ServiceMode::Ok);
        let recorder = ResponseRecorder::new(
            service.clone(),
            coordinator(),
            Arc::new(NoopEventSink),
        );
        let session = active_session();

        let recorded = recorder
            .record(
                &session,
                GuessOutcome::Correct {
                    color: GroupColor::Yellow,
                },
                words(["a", "b", "c", "d"]),
                None,
            )
            .await
            .unwrap();

        assert_eq!(recorded.session.remaining_words().len(), 12);
        assert_eq!(recorded.session.completed_groups().len(), 1);
        assert!(!recorded.just_finished);
        assert_eq!(service.calls(), 1);
        // The used color is permanently locked
        assert!(recorded.session.color_used(GroupColor::Yellow));
    }

    #[tokio::test]
    async fn service_failure_leaves_session_unchanged() {
        let service = MockService::new(ServiceMode::Fail);
        let recorder = ResponseRecorder::new(
            service.clone(),
            coordinator(),
            Arc::new(NoopEventSink),
        );
        let session = active_session();
        let before = session.clone();

        let err = recorder
            .record(&session, GuessOutcome::Incorrect, words(["a", "b", "c", "d"]), None)
            .await
            .unwrap_err();

        assert!(matches!(err, RecordResponseError::Service(_)));
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn engine_rejection_short_circuits_before_network() {
        let service = MockService::new(ServiceMode::Ok);
        let recorder = ResponseRecorder::new(
            service.clone(),
            coordinator(),
            Arc::new(NoopEventSink),
        );

        // Lock yellow, then try to reuse it
        let session = active_session();
        let session = recorder
            .record(
                &session,
                GuessOutcome::Correct { color: GroupColor::Yellow },
                words(["a", "b", "c", "d"]),
                None,
            )
            .await
            .unwrap()
            .session;

        let err = recorder
            .record(
                &session,
                GuessOutcome::Correct { color: GroupColor::Yellow },
                words(["e", "f", "g", "h"]),
                None,
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RecordResponseError::Session(SessionError::DuplicateColor(GroupColor::Yellow))
        );
        // No second network call was made
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn second_concurrent_recording_is_rejected() {
        let notify = Arc::new(Notify::new());
        let service = MockService::new(ServiceMode::Gated(Arc::clone(&notify)));
        let recorder = Arc::new(ResponseRecorder::new(
            service.clone(),
            coordinator(),
            Arc::new(NoopEventSink),
        ));
        let session = active_session();

        let first = {
            let recorder = Arc::clone(&recorder);
            let session = session.clone();
            tokio::spawn(async move {
                recorder
                    .record(&session, GuessOutcome::Incorrect, words(["a", "b", "c", "d"]), None)
                    .await
            })
        };
        tokio::task::yield_now().await;

        let err = recorder
            .record(&session, GuessOutcome::Incorrect, words(["e", "f", "g", "h"]), None)
            .await
            .unwrap_err();
        assert_eq!(err, RecordResponseError::InFlight);

        notify.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert_eq!(service.calls(), 1);

        // Guard released: a follow-up recording succeeds
        service.set_mode(ServiceMode::Ok);
        assert!(
            recorder
                .record(&session, GuessOutcome::Incorrect, words(["e", "f", "g", "h"]), None)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn failed_recording_restores_displayed_recommendation() {
        let coord = coordinator();
        let service = MockService::new(ServiceMode::Fail);
        let recorder =
            ResponseRecorder::new(service.clone(), Arc::clone(&coord), Arc::new(NoopEventSink));
        let session = active_session();

        // Put a recommendation on display
        let request = RecommendationRequest::new(
            Provider::RuleBased,
            session.remaining_words().to_vec(),
        );
        let displayed = coord.request(request).await.unwrap();

        let err = recorder
            .record(
                &session,
                GuessOutcome::Incorrect,
                displayed.recommended_words.clone(),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RecordResponseError::Service(_)));

        // Recommendation restored unchanged, slot back under review
        assert_eq!(coord.displayed().await.unwrap(), displayed);
        assert_eq!(coord.slot().await, Slot::Reviewing);

        // Retry the recording only, without re-issuing the recommendation
        service.set_mode(ServiceMode::Ok);
        let recorded = recorder
            .record(
                &session,
                GuessOutcome::Incorrect,
                displayed.recommended_words.clone(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(recorded.session.mistake_count(), 1);
        assert_eq!(coord.slot().await, Slot::Idle);
    }

    #[tokio::test]
    async fn losing_guess_reports_terminal_transition() {
        let service = MockService::new(ServiceMode::Ok);
        let recorder = ResponseRecorder::new(
            service,
            coordinator(),
            Arc::new(NoopEventSink),
        );
        let mut session = active_session();

        for i in 0..4 {
            let recorded = recorder
                .record(&session, GuessOutcome::Incorrect, words(["a", "b", "c", "d"]), None)
                .await
                .unwrap();
            session = recorded.session;
            assert_eq!(recorded.just_finished, i == 3);
        }
        assert_eq!(session.status(), SessionStatus::Lost);
    }
}
