//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **browse**: Interactive search over your bookmarks (default)
//! - **search**: One-shot search, printed as text or JSON
//! - **config**: Read and write configuration values
//! - **completions**: Generate shell completion scripts
//!
//! A global `--quiet` flag suppresses informational output for scripting.
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use dropsearch::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["dropsearch", "s", "rust", "async"]);
//! match cli.get_command() {
//!     Commands::Search { query, .. } => assert_eq!(query.join(" "), "rust async"),
//!     _ => unreachable!(),
//! }
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::Write;

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., debounce_ms=300)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., app_url)
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Print the configuration file location
    Path,
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "dropsearch")]
#[command(about = "Search your Raindrop.io bookmarks from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Search interactively (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Initial search text
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Run one search and print the results
    #[command(visible_alias = "s")]
    Search {
        /// Search text; multiple words are joined with spaces
        #[arg(value_name = "QUERY", num_args = 0..)]
        query: Vec<String>,

        /// Print results as a JSON array
        #[arg(long = "json")]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Browse { query: None })
    }
}

/// Split `key=value`, trimming both sides
///
/// Returns `None` when there is no `=` or the key is empty.
#[must_use]
pub fn parse_setting(setting: &str) -> Option<(&str, &str)> {
    let (key, value) = setting.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Write the completion script for `shell`
pub fn write_completions<W: Write>(shell: Shell, buf: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}
