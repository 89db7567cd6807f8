//! Word-set validation
//!
//! Turns raw delimited text into a canonical 16-word set or a validation
//! failure. Pure and deterministic: identical input always yields identical
//! output or the identical failure kind. Performs no I/O, so failures
//! short-circuit before any network call is made.

use super::word_set::{WORD_COUNT, WordSet};
use std::collections::HashSet;
use thiserror::Error;

/// Default token delimiter for pasted word lists.
pub const DEFAULT_DELIMITER: char = ',';

/// Validation failures for raw word input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No words found in input")]
    Empty,

    #[error("Expected {WORD_COUNT} words, found {found}")]
    WrongCount { found: usize },

    #[error("Duplicate word: {0}")]
    DuplicateWord(String),
}

/// Validator for raw delimited word lists
pub struct WordSetValidator;

impl WordSetValidator {
    /// Validate comma-delimited input into a canonical [`WordSet`].
    pub fn validate(raw: &str) -> Result<WordSet, ValidationError> {
        Self::validate_with(raw, DEFAULT_DELIMITER)
    }

    /// Validate input split on an explicit delimiter.
    ///
    /// Tokens are trimmed and empty tokens are discarded before counting,
    /// so trailing delimiters or doubled separators don't affect the count.
    pub fn validate_with(raw: &str, delimiter: char) -> Result<WordSet, ValidationError> {
        let words: Vec<String> = raw
            .split(delimiter)
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect();

        if words.is_empty() {
            return Err(ValidationError::Empty);
        }
        if words.len() != WORD_COUNT {
            return Err(ValidationError::WrongCount { found: words.len() });
        }

        let mut seen = HashSet::new();
        for word in &words {
            if !seen.insert(word.as_str()) {
                return Err(ValidationError::DuplicateWord(word.clone()));
            }
        }

        Ok(WordSet::from_validated(words))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_words_pass_in_order() {
        let raw = "a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p";
        let set = WordSetValidator::validate(raw).unwrap();
        let expected: Vec<String> = raw.split(',').map(String::from).collect();
        assert_eq!(set.words(), expected.as_slice());
    }

    #[test]
    fn fifteen_words_is_wrong_count() {
        let raw = "a,b,c,d,e,f,g,h,i,j,k,l,m,n,o";
        assert_eq!(
            WordSetValidator::validate(raw),
            Err(ValidationError::WrongCount { found: 15 })
        );
    }

    #[test]
    fn empty_input_is_empty_error() {
        assert_eq!(WordSetValidator::validate(""), Err(ValidationError::Empty));
        assert_eq!(
            WordSetValidator::validate(" , ,, "),
            Err(ValidationError::Empty)
        );
    }

    #[test]
    fn duplicate_word_is_rejected() {
        let raw = "a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,A";
        assert_eq!(
            WordSetValidator::validate(raw),
            Err(ValidationError::DuplicateWord("a".to_string()))
        );
    }

    #[test]
    fn tokens_are_trimmed_and_lowercased() {
        let raw = " Apple , BANANA ,c,d,e,f,g,h,i,j,k,l,m,n,o,p ";
        let set = WordSetValidator::validate(raw).unwrap();
        assert_eq!(set.words()[0], "apple");
        assert_eq!(set.words()[1], "banana");
        assert!(set.contains("Apple"));
    }

    #[test]
    fn empty_tokens_are_discarded_before_counting() {
        // 16 real tokens plus a trailing delimiter and a doubled comma
        let raw = "a,b,c,d,e,f,g,h,,i,j,k,l,m,n,o,p,";
        assert!(WordSetValidator::validate(raw).is_ok());
    }

    #[test]
    fn custom_delimiter() {
        let raw = "a;b;c;d;e;f;g;h;i;j;k;l;m;n;o;p";
        assert!(WordSetValidator::validate_with(raw, ';').is_ok());
        assert_eq!(
            WordSetValidator::validate(raw),
            Err(ValidationError::WrongCount { found: 1 })
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let raw = "a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p";
        assert_eq!(WordSetValidator::validate(raw), WordSetValidator::validate(raw));
        let bad = "a,b";
        assert_eq!(WordSetValidator::validate(bad), WordSetValidator::validate(bad));
    }
}
