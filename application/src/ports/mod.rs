//! Ports: interfaces the application layer expects adapters to implement

pub mod event_sink;
pub mod game_result_store;
pub mod recommendation_gateway;
pub mod response_service;
pub mod setup_service;

pub use event_sink::{NoopEventSink, SessionEvent, SessionEventSink};
pub use game_result_store::{GameResultStore, GameResultStoreError};
pub use recommendation_gateway::{GatewayError, ProviderFault, RecommendationGateway};
pub use response_service::{ResponseAck, ResponseService, ResponseServiceError, ResponseSubmission};
pub use setup_service::{SetupError, SetupResponse, SetupService};
