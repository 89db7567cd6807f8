//! Domain layer for connections-coach
//!
//! This crate contains the core business logic for assisting a 4x4
//! word-grouping puzzle: the word-set validator, the puzzle session state
//! machine, recommendation value objects, and the finished-game record.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! - **Puzzle Session**: the mutable record of one in-progress or finished
//!   game. Mutated exclusively through `apply_guess`, which is functional
//!   and never leaves a partial transition observable.
//! - **Recommendation**: a suggested group of four words plus explanation,
//!   produced by a rule-based, local-model, or cloud-model provider.
//! - **Color**: one of four difficulty tiers; each appears in at most one
//!   completed group.

pub mod record;
pub mod recommendation;
pub mod session;
pub mod words;

// Re-export commonly used types
pub use record::GameResultRecord;
pub use recommendation::{Provider, RecommendationRequest, RecommendationResult};
pub use session::{
    CompletedGroup, GroupColor, GuessApplied, GuessAttempt, GuessOutcome, GuessRecord,
    MAX_MISTAKES, PuzzleSession, SessionError, SessionStatus,
};
pub use words::{DEFAULT_DELIMITER, GROUP_SIZE, ValidationError, WORD_COUNT, WordSet,
    WordSetValidator};
