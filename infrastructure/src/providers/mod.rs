//! Recommendation provider adapters and routing

pub mod routing;
pub mod rule_based;

pub use routing::RoutingGateway;
pub use rule_based::RuleBasedProvider;
