//! Recommendation provider selection and request/result types

pub mod entities;
pub mod provider;

pub use entities::{RecommendationRequest, RecommendationResult};
pub use provider::Provider;
