//! Word-set validation and the canonical 16-word set

pub mod validator;
pub mod word_set;

pub use validator::{DEFAULT_DELIMITER, ValidationError, WordSetValidator};
pub use word_set::{GROUP_SIZE, WORD_COUNT, WordSet};
