//! Canonical word set value object

use serde::{Deserialize, Serialize};

/// Number of words in a complete puzzle.
pub const WORD_COUNT: usize = 16;

/// Number of words in one group.
pub const GROUP_SIZE: usize = 4;

/// The canonical 16-word set of a puzzle (Value Object).
///
/// Words are lowercase-normalized and guaranteed unique. The input order is
/// preserved. Construction goes through [`WordSetValidator`], which is the
/// only place the 16-word / distinctness rules are enforced.
///
/// [`WordSetValidator`]: super::validator::WordSetValidator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSet {
    words: Vec<String>,
}

impl WordSet {
    /// Build a word set from already-validated words.
    pub(crate) fn from_validated(words: Vec<String>) -> Self {
        debug_assert_eq!(words.len(), WORD_COUNT);
        Self { words }
    }

    /// All 16 words, in input order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Check membership (words are stored lowercase).
    pub fn contains(&self, word: &str) -> bool {
        let needle = word.trim().to_lowercase();
        self.words.iter().any(|w| *w == needle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.words.iter()
    }
}

impl std::fmt::Display for WordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.words.join(", "))
    }
}
