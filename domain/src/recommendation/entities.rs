//! Recommendation request/result entities

use super::provider::Provider;
use crate::session::GuessRecord;
use serde::{Deserialize, Serialize};

/// Snapshot sent to a recommendation provider.
///
/// Carries the prior guesses (words, outcome, timestamp) so a provider can
/// avoid naively repeating already-tried groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub provider: Provider,
    pub remaining_words: Vec<String>,
    pub guess_history: Vec<GuessRecord>,
    /// Optional free-form hint from the user (e.g. a theme they suspect).
    pub context: Option<String>,
}

impl RecommendationRequest {
    pub fn new(provider: Provider, remaining_words: Vec<String>) -> Self {
        Self {
            provider,
            remaining_words,
            guess_history: Vec::new(),
            context: None,
        }
    }

    pub fn with_history(mut self, guess_history: Vec<GuessRecord>) -> Self {
        self.guess_history = guess_history;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Whether a candidate group of words matches a previously attempted
    /// guess, ignoring order.
    pub fn already_tried(&self, candidate: &[String]) -> bool {
        let mut candidate: Vec<&str> = candidate.iter().map(String::as_str).collect();
        candidate.sort_unstable();
        self.guess_history.iter().any(|record| {
            let mut tried: Vec<&str> = record.attempted_words.iter().map(String::as_str).collect();
            tried.sort_unstable();
            tried == candidate
        })
    }
}

/// A suggested group of words plus explanation, from a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommended_words: Vec<String>,
    pub explanation: String,
    /// Name of the provider that actually produced the suggestion.
    pub provider_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_time_ms: Option<u64>,
    /// Runner-up groupings, most promising first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<Vec<String>>>,
}
