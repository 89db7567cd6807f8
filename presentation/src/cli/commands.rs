//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for connections-coach
#[derive(Parser, Debug)]
#[command(name = "connections-coach")]
#[command(author, version, about = "Interactive assistant for 4x4 word-grouping puzzles")]
#[command(long_about = r#"
Connections Coach assists you through a 4x4 word-grouping puzzle: paste the
sixteen words, ask a provider for a recommended group, then record whether
the attempt was correct, incorrect, or one away. Finished games can be
recorded once per puzzle and day.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./coach.toml        Project-level config
3. ~/.config/connections-coach/config.toml   Global config

Example:
  connections-coach
  connections-coach "apple,banana,cherry,...(16 words)"
  connections-coach --provider cloud --model gpt-4o-mini
  connections-coach --records
"#)]
pub struct Cli {
    /// Comma-separated word list to start with (otherwise paste it in the
    /// interactive session)
    pub words: Option<String>,

    /// Recommendation provider: rule-based, local, or cloud
    #[arg(short, long, value_name = "KIND")]
    pub provider: Option<String>,

    /// Model name for local/cloud providers
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Delimiter for the pasted word list (single character)
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// List recorded game results and exit
    #[arg(long)]
    pub records: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress loading indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
