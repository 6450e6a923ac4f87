//! Browse module - quick actions on a selected article
//!
//! UI-agnostic: the terminal front-end and any other front-end share the
//! same action list and execution logic.
//!
//! - `models`: `ArticleAction` and `ActionOutcome`
//! - `actions`: action list construction and execution through a `Launcher`

pub mod actions;
pub mod models;

pub use actions::{Launcher, SystemLauncher, actions_for, execute_action, tag_url};
pub use models::{ActionOutcome, ArticleAction};
