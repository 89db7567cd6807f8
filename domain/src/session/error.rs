//! Session state machine errors

use super::value_objects::{GroupColor, SessionStatus};
use thiserror::Error;

/// Errors from puzzle session transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Guess applied while the session is not active. Terminal states are
    /// absorbing; callers treat this as an ignorable rejection, not a fault.
    #[error("Session is {0}, guesses are only accepted while active")]
    InvalidState(SessionStatus),

    /// The color is already used by a completed group. Reaching this
    /// indicates a caller/UI bug; the engine rejects it regardless of any
    /// UI-level disabling.
    #[error("Color {0} is already used by a completed group")]
    DuplicateColor(GroupColor),

    /// A correct guess referenced a word that is not among the remaining
    /// words.
    #[error("Word is not among the remaining words: {0}")]
    UnknownWord(String),

    /// A correct guess must name exactly four words.
    #[error("A group has exactly 4 words, got {0}")]
    WrongGroupSize(usize),

    /// Activation received an initial word list inconsistent with the
    /// canonical set.
    #[error("Initial word list does not match the canonical set: {0}")]
    MalformedWordList(String),
}

impl SessionError {
    /// Invalid-state rejections are expected around terminal transitions
    /// and are silently ignored rather than surfaced to the user.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, SessionError::InvalidState(_))
    }
}
