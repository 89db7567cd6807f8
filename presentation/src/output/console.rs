//! Console output formatting for the coach session

use coach_domain::{
    GameResultRecord, GroupColor, GuessOutcome, PuzzleSession, RecommendationResult,
    SessionStatus,
};
use colored::{ColoredString, Colorize};

/// Formats session state and recommendations for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the current board: remaining words in a 4-wide grid plus the
    /// completed groups found so far.
    pub fn format_board(session: &PuzzleSession) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} ({} mistakes)\n",
            "Puzzle:".cyan().bold(),
            session.puzzle_id(),
            session.mistake_count()
        ));

        for group in session.completed_groups() {
            output.push_str(&format!(
                "  {} {}\n",
                Self::colorize(group.color, &format!("[{}]", group.color)),
                group.words.join(", ")
            ));
        }

        if !session.remaining_words().is_empty() {
            output.push('\n');
            for row in session.remaining_words().chunks(4) {
                let cells: Vec<String> = row.iter().map(|w| format!("{:<14}", w)).collect();
                output.push_str(&format!("  {}\n", cells.join(" ")));
            }
        }

        match session.status() {
            SessionStatus::Won => {
                output.push_str(&format!("\n{}\n", "Solved!".green().bold()));
            }
            SessionStatus::Lost => {
                output.push_str(&format!("\n{}\n", "Out of mistakes.".red().bold()));
            }
            _ => {}
        }

        output
    }

    /// Format a recommendation with its explanation and alternatives.
    pub fn format_recommendation(result: &RecommendationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            "Try:".cyan().bold(),
            result.recommended_words.join(", ").bold()
        ));
        output.push_str(&format!("  {}\n", result.explanation));

        if let Some(alternatives) = &result.alternatives {
            for alt in alternatives {
                output.push_str(&format!("  {} {}\n", "alt:".dimmed(), alt.join(", ")));
            }
        }

        let mut attribution = result.provider_used.clone();
        if let Some(ms) = result.generation_time_ms {
            attribution.push_str(&format!(", {}ms", ms));
        }
        output.push_str(&format!("  {}\n", format!("({attribution})").dimmed()));

        output
    }

    /// Format the guess history, oldest first.
    pub fn format_history(session: &PuzzleSession) -> String {
        if session.guess_history().is_empty() {
            return "No guesses yet.\n".to_string();
        }

        let mut output = String::new();
        for (i, record) in session.guess_history().iter().enumerate() {
            let marker = match record.outcome {
                GuessOutcome::Correct { color } => {
                    Self::colorize(color, &format!("correct ({color})"))
                }
                GuessOutcome::Incorrect => "incorrect".red(),
                GuessOutcome::OneAway => "one away".yellow(),
            };
            output.push_str(&format!(
                "  {:>2}. {} - {}\n",
                i + 1,
                record.attempted_words.join(", "),
                marker
            ));
        }
        output
    }

    /// Format stored game results, one line per record.
    pub fn format_records(records: &[GameResultRecord]) -> String {
        if records.is_empty() {
            return "No recorded games.\n".to_string();
        }

        let mut output = String::new();
        for record in records {
            let result = if record.solved {
                "solved".green()
            } else {
                "lost".red()
            };
            let provider = record
                .provider_name
                .as_deref()
                .map(|name| match record.model_name.as_deref() {
                    Some(model) => format!(" [{name}: {model}]"),
                    None => format!(" [{name}]"),
                })
                .unwrap_or_default();
            output.push_str(&format!(
                "  {} {} {} ({} groups, {} mistakes, {} guesses){}\n",
                record.game_day(),
                record.puzzle_id,
                result,
                record.groups_found,
                record.mistakes,
                record.total_guesses,
                provider
            ));
        }
        output
    }

    fn colorize(color: GroupColor, text: &str) -> ColoredString {
        match color {
            GroupColor::Yellow => text.yellow(),
            GroupColor::Green => text.green(),
            GroupColor::Blue => text.blue(),
            GroupColor::Purple => text.magenta(),
        }
    }
}
