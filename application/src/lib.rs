//! Application layer for connections-coach
//!
//! This crate contains use cases, port definitions, and orchestration
//! configuration. It depends only on the domain layer.
//!
//! All session mutation is funneled through two serialized entry points:
//! the [`ResponseRecorder`] (guess outcomes) and the
//! [`RecommendationCoordinator`]'s single request slot.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestrationConfig;
pub use ports::{
    event_sink::{NoopEventSink, SessionEvent, SessionEventSink},
    game_result_store::{GameResultStore, GameResultStoreError},
    recommendation_gateway::{GatewayError, ProviderFault, RecommendationGateway},
    response_service::{ResponseAck, ResponseService, ResponseServiceError, ResponseSubmission},
    setup_service::{SetupError, SetupResponse, SetupService},
};
pub use use_cases::{
    GameRecorder, RecommendError, RecommendationCoordinator, RecordGameError,
    RecordResponseError, RecordedResponse, ResponseRecorder, SessionStarter, Slot,
    StartSessionError,
};
