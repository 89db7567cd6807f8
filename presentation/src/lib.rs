//! Presentation layer for connections-coach
//!
//! This crate contains CLI definitions, output formatters,
//! progress indicators, and the interactive coach session.

pub mod cli;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::RecommendationSpinner;
pub use repl::CoachRepl;
