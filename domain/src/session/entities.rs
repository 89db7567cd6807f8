//! Puzzle session entity and its state machine
//!
//! A session is created only after word-set validation succeeds and the
//! setup service has returned an initial word list. It is mutated
//! exclusively through [`PuzzleSession::apply_guess`], which is functional:
//! it returns a new session and never leaves a half-applied transition
//! observable.

use super::error::SessionError;
use super::value_objects::{
    CompletedGroup, GroupColor, GuessAttempt, GuessOutcome, GuessRecord, SessionStatus,
};
use crate::words::{GROUP_SIZE, WORD_COUNT, WordSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mistakes that force a loss.
pub const MAX_MISTAKES: u8 = 4;

/// Result of a successfully applied guess
#[derive(Debug, Clone)]
pub struct GuessApplied {
    /// The session after the transition.
    pub session: PuzzleSession,
    /// Whether this guess just caused the terminal transition. Used to
    /// trigger game-result recording eligibility.
    pub just_finished: bool,
}

/// The mutable record of one in-progress or finished game (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSession {
    id: String,
    puzzle_id: String,
    words: WordSet,
    remaining_words: Vec<String>,
    completed_groups: Vec<CompletedGroup>,
    mistake_count: u8,
    status: SessionStatus,
    guess_history: Vec<GuessRecord>,
}

impl PuzzleSession {
    /// Create a session in `Waiting` state from a validated word set.
    pub fn new(id: impl Into<String>, puzzle_id: impl Into<String>, words: WordSet) -> Self {
        let remaining_words = words.words().to_vec();
        Self {
            id: id.into(),
            puzzle_id: puzzle_id.into(),
            words,
            remaining_words,
            completed_groups: Vec::new(),
            mistake_count: 0,
            status: SessionStatus::Waiting,
            guess_history: Vec::new(),
        }
    }

    /// Activate the session with the initial word list returned by setup.
    ///
    /// The list may be reordered (the board is shuffled server-side) but
    /// must contain exactly the canonical 16 words.
    pub fn activate(mut self, initial_words: Vec<String>) -> Result<Self, SessionError> {
        if self.status != SessionStatus::Waiting {
            return Err(SessionError::InvalidState(self.status));
        }
        if initial_words.len() != WORD_COUNT {
            return Err(SessionError::MalformedWordList(format!(
                "expected {WORD_COUNT} words, got {}",
                initial_words.len()
            )));
        }
        let normalized: Vec<String> = initial_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .collect();
        for word in &normalized {
            if !self.words.contains(word) {
                return Err(SessionError::MalformedWordList(format!(
                    "unexpected word: {word}"
                )));
            }
        }
        if normalized.iter().collect::<HashSet<_>>().len() != WORD_COUNT {
            return Err(SessionError::MalformedWordList(
                "duplicate words in initial list".to_string(),
            ));
        }

        self.remaining_words = normalized;
        self.status = SessionStatus::Active;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn puzzle_id(&self) -> &str {
        &self.puzzle_id
    }

    pub fn words(&self) -> &WordSet {
        &self.words
    }

    pub fn remaining_words(&self) -> &[String] {
        &self.remaining_words
    }

    pub fn completed_groups(&self) -> &[CompletedGroup] {
        &self.completed_groups
    }

    pub fn mistake_count(&self) -> u8 {
        self.mistake_count
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn guess_history(&self) -> &[GuessRecord] {
        &self.guess_history
    }

    pub fn total_guesses(&self) -> usize {
        self.guess_history.len()
    }

    pub fn groups_found(&self) -> usize {
        self.completed_groups.len()
    }

    /// Whether all four groups were found before the mistake limit.
    pub fn solved(&self) -> bool {
        self.status == SessionStatus::Won
    }

    /// Whether a color is already locked by a completed group.
    pub fn color_used(&self, color: GroupColor) -> bool {
        self.completed_groups.iter().any(|g| g.color == color)
    }

    /// Colors still available for a correct guess.
    pub fn available_colors(&self) -> Vec<GroupColor> {
        GroupColor::all()
            .into_iter()
            .filter(|c| !self.color_used(*c))
            .collect()
    }

    /// Apply one guess and return the new session plus a flag for whether
    /// this call caused the terminal transition.
    ///
    /// Every applied guess, correct or not, appends exactly one
    /// [`GuessRecord`] with a capture-time timestamp. Error returns leave
    /// the session untouched (the caller keeps the old value).
    pub fn apply_guess(&self, attempt: &GuessAttempt) -> Result<GuessApplied, SessionError> {
        self.apply_guess_at(attempt, Utc::now())
    }

    /// [`Self::apply_guess`] with an explicit timestamp.
    pub fn apply_guess_at(
        &self,
        attempt: &GuessAttempt,
        timestamp: DateTime<Utc>,
    ) -> Result<GuessApplied, SessionError> {
        if self.status != SessionStatus::Active {
            return Err(SessionError::InvalidState(self.status));
        }

        let attempted: Vec<String> = attempt
            .words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .collect();

        let mut next = self.clone();

        match attempt.outcome {
            GuessOutcome::Correct { color } => {
                if attempted.len() != GROUP_SIZE
                    || attempted.iter().collect::<HashSet<_>>().len() != GROUP_SIZE
                {
                    return Err(SessionError::WrongGroupSize(attempted.len()));
                }
                if self.color_used(color) {
                    return Err(SessionError::DuplicateColor(color));
                }
                for word in &attempted {
                    if !self.remaining_words.contains(word) {
                        return Err(SessionError::UnknownWord(word.clone()));
                    }
                }

                next.remaining_words.retain(|w| !attempted.contains(w));
                next.completed_groups.push(CompletedGroup {
                    words: attempted.clone(),
                    color,
                    explanation: attempt.explanation.clone(),
                });
                if next.remaining_words.is_empty() && next.mistake_count < MAX_MISTAKES {
                    next.status = SessionStatus::Won;
                }
            }
            GuessOutcome::Incorrect | GuessOutcome::OneAway => {
                next.mistake_count += 1;
                if next.mistake_count >= MAX_MISTAKES {
                    next.status = SessionStatus::Lost;
                }
            }
        }

        next.guess_history.push(GuessRecord {
            attempted_words: attempted,
            outcome: attempt.outcome,
            timestamp,
        });

        debug_assert!(next.invariants_hold());

        let just_finished = next.status.is_terminal();
        Ok(GuessApplied {
            session: next,
            just_finished,
        })
    }

    /// Structural invariants from the data model. Checked by a debug
    /// assertion after every transition and exercised directly by tests.
    pub fn invariants_hold(&self) -> bool {
        let count_ok =
            self.remaining_words.len() + GROUP_SIZE * self.completed_groups.len() == WORD_COUNT;
        let disjoint = self
            .completed_groups
            .iter()
            .flat_map(|g| g.words.iter())
            .all(|w| !self.remaining_words.contains(w));
        let mistakes_ok = self.mistake_count <= MAX_MISTAKES
            && (self.mistake_count < MAX_MISTAKES || self.status == SessionStatus::Lost);
        let colors: HashSet<GroupColor> =
            self.completed_groups.iter().map(|g| g.color).collect();
        let colors_ok = colors.len() == self.completed_groups.len();
        let won_ok = self.completed_groups.len() < 4
            || self.mistake_count >= MAX_MISTAKES
            || self.status == SessionStatus::Won;

        count_ok && disjoint && mistakes_ok && colors_ok && won_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::WordSetValidator;

    fn active_session() -> PuzzleSession {
        let set = WordSetValidator::validate("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p").unwrap();
        let initial = set.words().to_vec();
        PuzzleSession::new("s-1", "puzzle-1", set)
            .activate(initial)
            .unwrap()
    }

    fn correct(words: [&str; 4], color: GroupColor) -> GuessAttempt {
        GuessAttempt::new(
            words.iter().map(|w| w.to_string()).collect(),
            GuessOutcome::Correct { color },
        )
    }

    #[test]
    fn fresh_correct_guess_completes_one_group() {
        let session = active_session();
        assert_eq!(session.remaining_words().len(), 16);

        let applied = session
            .apply_guess(&correct(["a", "b", "c", "d"], GroupColor::Yellow))
            .unwrap();

        let next = applied.session;
        assert!(!applied.just_finished);
        assert_eq!(next.remaining_words().len(), 12);
        assert_eq!(next.completed_groups().len(), 1);
        assert_eq!(next.status(), SessionStatus::Active);
        assert!(next.color_used(GroupColor::Yellow));
        assert_eq!(next.guess_history().len(), 1);
    }

    #[test]
    fn fourth_mistake_loses_and_absorbs() {
        let mut session = active_session();
        for _ in 0..3 {
            session = session
                .apply_guess(&GuessAttempt::new(vec!["a".into()], GuessOutcome::Incorrect))
                .unwrap()
                .session;
        }
        assert_eq!(session.mistake_count(), 3);

        let applied = session
            .apply_guess(&GuessAttempt::new(vec!["a".into()], GuessOutcome::OneAway))
            .unwrap();
        assert!(applied.just_finished);
        let lost = applied.session;
        assert_eq!(lost.mistake_count(), 4);
        assert_eq!(lost.status(), SessionStatus::Lost);

        // Absorbing: no further guess succeeds
        let err = lost
            .apply_guess(&correct(["a", "b", "c", "d"], GroupColor::Yellow))
            .unwrap_err();
        assert_eq!(err, SessionError::InvalidState(SessionStatus::Lost));
        assert!(err.is_ignorable());
    }

    #[test]
    fn four_groups_win() {
        let mut session = active_session();
        let groups = [
            (["a", "b", "c", "d"], GroupColor::Yellow),
            (["e", "f", "g", "h"], GroupColor::Green),
            (["i", "j", "k", "l"], GroupColor::Blue),
        ];
        for (words, color) in groups {
            session = session.apply_guess(&correct(words, color)).unwrap().session;
        }
        assert_eq!(session.status(), SessionStatus::Active);

        let applied = session
            .apply_guess(&correct(["m", "n", "o", "p"], GroupColor::Purple))
            .unwrap();
        assert!(applied.just_finished);
        assert_eq!(applied.session.status(), SessionStatus::Won);
        assert!(applied.session.solved());
        assert_eq!(applied.session.remaining_words().len(), 0);
    }

    #[test]
    fn duplicate_color_rejected_without_mutation() {
        let session = active_session()
            .apply_guess(&correct(["a", "b", "c", "d"], GroupColor::Yellow))
            .unwrap()
            .session;

        let err = session
            .apply_guess(&correct(["e", "f", "g", "h"], GroupColor::Yellow))
            .unwrap_err();
        assert_eq!(err, SessionError::DuplicateColor(GroupColor::Yellow));
        // No record appended on the failure path
        assert_eq!(session.guess_history().len(), 1);
        assert_eq!(session.remaining_words().len(), 12);
    }

    #[test]
    fn unknown_word_rejected() {
        let session = active_session();
        let err = session
            .apply_guess(&correct(["a", "b", "c", "zebra"], GroupColor::Blue))
            .unwrap_err();
        assert_eq!(err, SessionError::UnknownWord("zebra".to_string()));
    }

    #[test]
    fn duplicate_words_in_attempt_rejected() {
        let session = active_session();
        let err = session
            .apply_guess(&correct(["a", "a", "b", "c"], GroupColor::Blue))
            .unwrap_err();
        assert_eq!(err, SessionError::WrongGroupSize(4));
    }

    #[test]
    fn guesses_before_activation_rejected() {
        let set = WordSetValidator::validate("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p").unwrap();
        let session = PuzzleSession::new("s-1", "puzzle-1", set);
        let err = session
            .apply_guess(&correct(["a", "b", "c", "d"], GroupColor::Yellow))
            .unwrap_err();
        assert_eq!(err, SessionError::InvalidState(SessionStatus::Waiting));
    }

    #[test]
    fn activation_rejects_foreign_words() {
        let set = WordSetValidator::validate("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p").unwrap();
        let mut initial = set.words().to_vec();
        initial[0] = "zebra".to_string();
        let err = PuzzleSession::new("s-1", "puzzle-1", set)
            .activate(initial)
            .unwrap_err();
        assert!(matches!(err, SessionError::MalformedWordList(_)));
    }

    #[test]
    fn activation_accepts_shuffled_board() {
        let set = WordSetValidator::validate("a,b,c,d,e,f,g,h,i,j,k,l,m,n,o,p").unwrap();
        let mut initial = set.words().to_vec();
        initial.reverse();
        let session = PuzzleSession::new("s-1", "puzzle-1", set)
            .activate(initial.clone())
            .unwrap();
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.remaining_words(), initial.as_slice());
    }

    #[test]
    fn invariants_hold_across_a_mixed_game() {
        let mut session = active_session();
        assert!(session.invariants_hold());

        let plays = [
            GuessAttempt::new(vec!["a".into()], GuessOutcome::Incorrect),
            correct(["a", "b", "c", "d"], GroupColor::Yellow),
            GuessAttempt::new(vec!["e".into()], GuessOutcome::OneAway),
            correct(["e", "f", "g", "h"], GroupColor::Purple),
            GuessAttempt::new(vec!["i".into()], GuessOutcome::Incorrect),
        ];
        for attempt in plays {
            session = session.apply_guess(&attempt).unwrap().session;
            assert!(session.invariants_hold());
            assert_eq!(
                session.remaining_words().len() + 4 * session.completed_groups().len(),
                16
            );
        }
        assert_eq!(session.total_guesses(), 5);
        assert_eq!(session.mistake_count(), 3);
    }

    #[test]
    fn every_applied_guess_appends_exactly_one_record() {
        let session = active_session();
        let miss = session
            .apply_guess(&GuessAttempt::new(vec!["a".into()], GuessOutcome::Incorrect))
            .unwrap()
            .session;
        assert_eq!(miss.guess_history().len(), 1);
        let hit = miss
            .apply_guess(&correct(["a", "b", "c", "d"], GroupColor::Green))
            .unwrap()
            .session;
        assert_eq!(hit.guess_history().len(), 2);
        assert_eq!(hit.guess_history()[1].attempted_words, vec!["a", "b", "c", "d"]);
    }
}
