//! Dropsearch - search-as-you-type over your Raindrop.io bookmarks
//!
//! Typing feeds a debounced [`search::SearchSession`], which asks the
//! Raindrop.io API for matching bookmarks and keeps only the freshest result
//! list. The terminal front-end in [`ui`] renders that list and offers quick
//! actions from [`browse`].

use thiserror::Error;

pub mod api;
pub mod browse;
pub mod cli;
pub mod config;
pub mod logging;
pub mod search;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Search request could not be built or sent
    #[error("Search error: {0}")]
    FetchError(#[from] api::FetchError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
