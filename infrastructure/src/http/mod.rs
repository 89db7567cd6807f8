//! HTTP adapters for the external coach services

pub mod classify;
pub mod client;
pub mod game_result;
pub mod recommendation;
pub mod response;
pub mod setup;

pub use classify::classify_provider_error;
pub use client::{DEFAULT_REQUEST_TIMEOUT, HttpConfig};
pub use game_result::GameResultClient;
pub use recommendation::RecommendationClient;
pub use response::ResponseClient;
pub use setup::SetupClient;
