//! Session value objects: colors, status, guesses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four difficulty tiers a completed group can carry (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Yellow,
    Green,
    Blue,
    Purple,
}

impl GroupColor {
    /// All colors, easiest tier first.
    pub fn all() -> [GroupColor; 4] {
        [
            GroupColor::Yellow,
            GroupColor::Green,
            GroupColor::Blue,
            GroupColor::Purple,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Blue => "blue",
            GroupColor::Purple => "purple",
        }
    }
}

impl std::fmt::Display for GroupColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GroupColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yellow" | "y" => Ok(GroupColor::Yellow),
            "green" | "g" => Ok(GroupColor::Green),
            "blue" | "b" => Ok(GroupColor::Blue),
            "purple" | "p" => Ok(GroupColor::Purple),
            other => Err(format!("Unknown color: {other}")),
        }
    }
}

/// Lifecycle of a puzzle session.
///
/// `Won` and `Lost` are terminal and absorbing: once reached, no further
/// guess is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Waiting,
    Active,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Won | SessionStatus::Lost)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Waiting => "waiting",
            SessionStatus::Active => "active",
            SessionStatus::Won => "won",
            SessionStatus::Lost => "lost",
        };
        write!(f, "{s}")
    }
}

/// Outcome of a single grouping attempt.
///
/// A correct outcome carries its color in the variant, so "correct requires
/// a color" is enforced by the type rather than by a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GuessOutcome {
    Correct { color: GroupColor },
    Incorrect,
    OneAway,
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessOutcome::Correct { .. })
    }

    /// The color of a correct outcome, if any.
    pub fn color(&self) -> Option<GroupColor> {
        match self {
            GuessOutcome::Correct { color } => Some(*color),
            _ => None,
        }
    }
}

impl std::fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuessOutcome::Correct { color } => write!(f, "correct ({color})"),
            GuessOutcome::Incorrect => write!(f, "incorrect"),
            GuessOutcome::OneAway => write!(f, "one-away"),
        }
    }
}

/// One grouping attempt as submitted by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessAttempt {
    pub words: Vec<String>,
    pub outcome: GuessOutcome,
    /// Explanation carried over from the recommendation that produced the
    /// attempt, if any.
    pub explanation: Option<String>,
}

impl GuessAttempt {
    pub fn new(words: Vec<String>, outcome: GuessOutcome) -> Self {
        Self {
            words,
            outcome,
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

/// One entry of the append-only guess history (audit record)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub attempted_words: Vec<String>,
    pub outcome: GuessOutcome,
    pub timestamp: DateTime<Utc>,
}

/// A solved group of four words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGroup {
    pub words: Vec<String>,
    pub color: GroupColor,
    pub explanation: Option<String>,
}
