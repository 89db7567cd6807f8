//! Puzzle session state machine

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{GuessApplied, MAX_MISTAKES, PuzzleSession};
pub use error::SessionError;
pub use value_objects::{
    CompletedGroup, GroupColor, GuessAttempt, GuessOutcome, GuessRecord, SessionStatus,
};
