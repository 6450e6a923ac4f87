//! Ratatui front-end for interactive search
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              RatatuiBrowser                 │
//! │   (terminal setup, tick loop, actions)      │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │  AppState  │ │  Ratatui  │ │ Crossterm │
//! │  (query,   │ │ (widgets) │ │  (events) │
//! │   rows)    │ │           │ │           │
//! └────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! - **Search bar** with placeholder text
//! - **Result list** with tag subtitles and domains
//! - **Status bar** for toasts and the loading indicator
//! - **Action menu** (Tab) and **help overlay** (F1)

mod browser;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use browser::RatatuiBrowser;
pub use events::{EventResult, handle_key, key_to_string};
pub use state::{ActionMenu, AppState, Mode};
pub use theme::Theme;
