//! Recommendation request orchestration
//!
//! Holds the single concurrency slot that guarantees at most one
//! outstanding recommendation call per session, the client-side timeout,
//! and the timed fade lifecycle of a displayed recommendation.
//!
//! The slot does not return to idle on success: the trigger re-arms only
//! when the user records a response on the displayed recommendation or the
//! session resets. This is preserved observed behavior, not an oversight
//! fix; it prevents issuing a new recommendation while one is still under
//! review.

use crate::config::OrchestrationConfig;
use crate::ports::event_sink::{SessionEvent, SessionEventSink};
use crate::ports::recommendation_gateway::{GatewayError, RecommendationGateway};
use coach_domain::{Provider, RecommendationRequest, RecommendationResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors from the recommendation coordinator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// A request is already outstanding or a recommendation is under
    /// review; the new request is a no-op.
    #[error("A recommendation is already in progress")]
    Busy,

    /// The client-side timeout elapsed. The slot has been freed.
    #[error("Recommendation request timed out")]
    Timeout,

    /// The response arrived after a local cancel or a session reset and
    /// was discarded.
    #[error("Recommendation response arrived after cancellation")]
    Stale,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl RecommendError {
    /// Whether an immediately retried request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RecommendError::Timeout => true,
            RecommendError::Gateway(e) => e.is_retryable(),
            RecommendError::Busy | RecommendError::Stale => false,
        }
    }
}

/// The concurrency slot of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The "get recommendation" trigger is armed.
    Idle,
    /// A gateway call is outstanding.
    Requesting,
    /// A recommendation is displayed and awaiting a response action.
    Reviewing,
}

#[derive(Debug, Clone)]
struct Displayed {
    cycle: u64,
    result: RecommendationResult,
    provider: Provider,
}

struct ScheduledFade {
    cycle: u64,
    cancel: CancellationToken,
}

struct CoordinatorState {
    slot: Slot,
    displayed: Option<Displayed>,
    fade: Option<ScheduledFade>,
    /// Provider of the most recent successful recommendation, kept for
    /// game-result attribution even after the recommendation fades.
    last_provider: Option<Provider>,
}

/// Orchestrates at-most-one in-flight recommendation request and the
/// loading/error/fade lifecycle around it.
pub struct RecommendationCoordinator {
    gateway: Arc<dyn RecommendationGateway>,
    events: Arc<dyn SessionEventSink>,
    timeout: Duration,
    fade_delay: Duration,
    state: Mutex<CoordinatorState>,
    /// Identity of the current recommendation cycle. Bumped on issue,
    /// local cancel, and reset so late responses and stale fades are
    /// discarded instead of applied.
    cycle: AtomicU64,
}

impl RecommendationCoordinator {
    pub fn new(
        gateway: Arc<dyn RecommendationGateway>,
        events: Arc<dyn SessionEventSink>,
        config: &OrchestrationConfig,
    ) -> Self {
        Self {
            gateway,
            events,
            timeout: config.recommendation_timeout,
            fade_delay: config.fade_delay,
            state: Mutex::new(CoordinatorState {
                slot: Slot::Idle,
                displayed: None,
                fade: None,
                last_provider: None,
            }),
            cycle: AtomicU64::new(0),
        }
    }

    /// Issue a recommendation request.
    ///
    /// Rejected as [`RecommendError::Busy`] while the slot is occupied.
    /// On failure or timeout the slot is freed immediately; on success it
    /// stays occupied until a response is recorded or the session resets.
    pub async fn request(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResult, RecommendError> {
        let cycle = {
            let mut state = self.state.lock().await;
            if state.slot != Slot::Idle {
                debug!("Recommendation request rejected: slot {:?}", state.slot);
                return Err(RecommendError::Busy);
            }
            state.slot = Slot::Requesting;
            // A new recommendation cycle cancels any fade still pending
            // from the previous one and removes that recommendation; it
            // was already responded to and must not be recorded against
            // again while this request is in flight.
            if let Some(fade) = state.fade.take() {
                fade.cancel.cancel();
            }
            if state.displayed.take().is_some() {
                self.events.emit(SessionEvent::RecommendationCleared);
            }
            self.cycle.fetch_add(1, Ordering::SeqCst) + 1
        };

        let provider = request.provider.clone();
        info!(provider = %provider, words = request.remaining_words.len(),
            "Requesting recommendation");

        let outcome = tokio::time::timeout(self.timeout, self.gateway.recommend(&request)).await;

        let mut state = self.state.lock().await;
        if self.cycle.load(Ordering::SeqCst) != cycle {
            // Cancelled or reset while in flight; the slot belongs to the
            // new cycle now and must not be touched.
            debug!("Discarding stale recommendation response (cycle {cycle})");
            return Err(RecommendError::Stale);
        }

        match outcome {
            Err(_elapsed) => {
                state.slot = Slot::Idle;
                warn!("Recommendation request timed out after {:?}", self.timeout);
                Err(RecommendError::Timeout)
            }
            Ok(Err(e)) => {
                state.slot = Slot::Idle;
                warn!("Recommendation request failed: {e}");
                Err(e.into())
            }
            Ok(Ok(result)) => {
                state.slot = Slot::Reviewing;
                state.displayed = Some(Displayed {
                    cycle,
                    result: result.clone(),
                    provider: provider.clone(),
                });
                state.last_provider = Some(provider);
                self.events.emit(SessionEvent::RecommendationShown {
                    provider_used: result.provider_used.clone(),
                    words: result.recommended_words.clone(),
                });
                Ok(result)
            }
        }
    }

    /// The user recorded a response while a recommendation was visible.
    ///
    /// Re-arms the trigger and schedules the displayed recommendation for
    /// removal after the fade grace delay, keyed to the recommendation's
    /// cycle so a stale fade never clears a newer one. The slot is freed
    /// only from `Reviewing`: an in-flight request keeps it, otherwise a
    /// second gateway call could be issued alongside the outstanding one.
    ///
    /// Returns whether a recommendation was visible (and a fade scheduled).
    pub async fn on_response_recorded(self: &Arc<Self>) -> bool {
        let mut state = self.state.lock().await;
        if state.slot == Slot::Reviewing {
            state.slot = Slot::Idle;
        }

        let Some(displayed) = state.displayed.as_ref() else {
            return false;
        };
        let cycle = displayed.cycle;

        if let Some(fade) = state.fade.take() {
            fade.cancel.cancel();
        }
        let cancel = CancellationToken::new();
        state.fade = Some(ScheduledFade {
            cycle,
            cancel: cancel.clone(),
        });

        let this = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(this.fade_delay) => {
                    let mut state = this.state.lock().await;
                    if state.fade.as_ref().is_some_and(|f| f.cycle == cycle) {
                        state.fade = None;
                    }
                    if state.displayed.as_ref().is_some_and(|d| d.cycle == cycle) {
                        state.displayed = None;
                        this.events.emit(SessionEvent::RecommendationCleared);
                    }
                }
            }
        });

        true
    }

    /// The paired recording action failed: cancel the scheduled removal
    /// and restore the prior recommendation unchanged, so the user can
    /// retry the recording without re-issuing the recommendation call.
    pub async fn on_response_failed(&self) {
        let mut state = self.state.lock().await;
        if let Some(fade) = state.fade.take() {
            fade.cancel.cancel();
        }
        if state.displayed.is_some() {
            state.slot = Slot::Reviewing;
        }
    }

    /// Local cancel of an in-flight request.
    ///
    /// There is no server-side cancellation; this only stops the local
    /// loading state and marks the cycle so the eventual response is
    /// discarded rather than applied.
    pub async fn cancel_local(&self) {
        let mut state = self.state.lock().await;
        if state.slot == Slot::Requesting {
            self.cycle.fetch_add(1, Ordering::SeqCst);
            state.slot = Slot::Idle;
            info!("Recommendation request cancelled locally");
        }
    }

    /// Discard all coordinator state for a session reset.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        self.cycle.fetch_add(1, Ordering::SeqCst);
        if let Some(fade) = state.fade.take() {
            fade.cancel.cancel();
        }
        state.slot = Slot::Idle;
        state.displayed = None;
        state.last_provider = None;
    }

    /// Current slot state (the trigger is disabled unless `Idle`).
    pub async fn slot(&self) -> Slot {
        self.state.lock().await.slot
    }

    /// The recommendation currently displayed, if any.
    pub async fn displayed(&self) -> Option<RecommendationResult> {
        self.state.lock().await.displayed.as_ref().map(|d| d.result.clone())
    }

    /// Provider of the most recent successful recommendation, for
    /// game-result attribution.
    pub async fn provider_attribution(&self) -> Option<Provider> {
        self.state.lock().await.last_provider.clone()
    }
}
