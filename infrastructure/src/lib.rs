//! Infrastructure layer for connections-coach
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FilePuzzleConfig, FileRecommendationConfig, FileServiceConfig,
};
pub use http::{
    GameResultClient, HttpConfig, RecommendationClient, ResponseClient, SetupClient,
    classify_provider_error,
};
pub use logging::JsonlEventLogger;
pub use providers::{RoutingGateway, RuleBasedProvider};
