//! UI abstraction layer
//!
//! This module holds everything between the search pipeline and the
//! terminal: the notification surface, the row model, and the ratatui
//! front-end.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      RatatuiBrowser (event loop)        │
//! └───────┬───────────────────┬─────────────┘
//!         │ keystrokes        │ renders
//!         ▼                   ▼
//! ┌───────────────┐   ┌───────────────────┐
//! │ SearchSession │──▶│ ArticleRow list   │
//! └───────┬───────┘   └───────────────────┘
//!         │ failures
//!         ▼
//! ┌───────────────┐
//! │ ToastWriter   │──▶ status bar
//! └───────────────┘
//! ```
//!
//! Non-interactive commands use [`StdoutWriter`] in place of the toast buffer.

mod error;
mod types;

pub mod output;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StdoutWriter, Toast, ToastWriter};
pub use ratatui_adapter::RatatuiBrowser;
pub use types::{ArticleRow, tag_subtitle};
