//! Rule-based recommendation provider
//!
//! A deterministic, in-process fallback that needs no network: it walks
//! candidate groupings of the remaining words in board order and suggests
//! the first one that has not been tried yet. The guess history carried in
//! the request is what keeps it from repeating rejected groups.

use async_trait::async_trait;
use coach_application::{GatewayError, RecommendationGateway};
use coach_domain::{GROUP_SIZE, RecommendationRequest, RecommendationResult};
use std::time::Instant;
use tracing::debug;

/// How many runner-up groupings to attach as alternatives.
const ALTERNATIVE_COUNT: usize = 2;

/// Deterministic local provider
pub struct RuleBasedProvider;

impl RuleBasedProvider {
    pub fn new() -> Self {
        Self
    }

    /// Candidate groups, first the four leftmost remaining words, then
    /// every other index combination in lexicographic order.
    fn candidates(remaining: &[String]) -> impl Iterator<Item = Vec<String>> + '_ {
        let n = remaining.len();
        let mut indices: Vec<[usize; GROUP_SIZE]> = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                for c in (b + 1)..n {
                    for d in (c + 1)..n {
                        indices.push([a, b, c, d]);
                    }
                }
            }
        }
        indices
            .into_iter()
            .map(move |idx| idx.iter().map(|&i| remaining[i].clone()).collect())
    }
}

impl Default for RuleBasedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecommendationGateway for RuleBasedProvider {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult, GatewayError> {
        let started = Instant::now();

        if request.remaining_words.len() < GROUP_SIZE {
            return Err(GatewayError::InvalidResponse(format!(
                "need at least {GROUP_SIZE} remaining words, got {}",
                request.remaining_words.len()
            )));
        }

        let mut untried =
            Self::candidates(&request.remaining_words).filter(|c| !request.already_tried(c));

        let Some(recommended) = untried.next() else {
            return Err(GatewayError::InvalidResponse(
                "every grouping of the remaining words was already tried".to_string(),
            ));
        };
        let alternatives: Vec<Vec<String>> = untried.take(ALTERNATIVE_COUNT).collect();

        debug!(
            tried = request.guess_history.len(),
            "Rule-based provider picked a grouping"
        );

        Ok(RecommendationResult {
            recommended_words: recommended.clone(),
            explanation: format!(
                "Untried grouping of remaining words: {}",
                recommended.join(", ")
            ),
            provider_used: "rule-based".to_string(),
            generation_time_ms: Some(started.elapsed().as_millis() as u64),
            alternatives: (!alternatives.is_empty()).then_some(alternatives),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use coach_domain::{GuessOutcome, GuessRecord, Provider};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn tried(list: &[&str]) -> GuessRecord {
        GuessRecord {
            attempted_words: words(list),
            outcome: GuessOutcome::Incorrect,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn suggests_leftmost_grouping_first() {
        let provider = RuleBasedProvider::new();
        let request = RecommendationRequest::new(
            Provider::RuleBased,
            words(&["a", "b", "c", "d", "e", "f", "g", "h"]),
        );

        let result = provider.recommend(&request).await.unwrap();
        assert_eq!(result.recommended_words, words(&["a", "b", "c", "d"]));
        assert_eq!(result.provider_used, "rule-based");
        assert!(result.alternatives.is_some());
    }

    #[tokio::test]
    async fn skips_already_tried_groupings() {
        let provider = RuleBasedProvider::new();
        let request = RecommendationRequest::new(
            Provider::RuleBased,
            words(&["a", "b", "c", "d", "e", "f", "g", "h"]),
        )
        // Tried in a different order: still recognized
        .with_history(vec![tried(&["d", "c", "b", "a"])]);

        let result = provider.recommend(&request).await.unwrap();
        assert_eq!(result.recommended_words, words(&["a", "b", "c", "e"]));
    }

    #[tokio::test]
    async fn exhausted_candidates_is_an_error() {
        let provider = RuleBasedProvider::new();
        let request =
            RecommendationRequest::new(Provider::RuleBased, words(&["a", "b", "c", "d"]))
                .with_history(vec![tried(&["a", "b", "c", "d"])]);

        let err = provider.recommend(&request).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn too_few_words_is_an_error() {
        let provider = RuleBasedProvider::new();
        let request = RecommendationRequest::new(Provider::RuleBased, words(&["a", "b"]));
        assert!(provider.recommend(&request).await.is_err());
    }

    #[tokio::test]
    async fn deterministic_for_identical_input() {
        let provider = RuleBasedProvider::new();
        let request = RecommendationRequest::new(
            Provider::RuleBased,
            words(&["a", "b", "c", "d", "e", "f", "g", "h"]),
        );
        let first = provider.recommend(&request).await.unwrap();
        let second = provider.recommend(&request).await.unwrap();
        assert_eq!(first.recommended_words, second.recommended_words);
        assert_eq!(first.alternatives, second.alternatives);
    }
}
