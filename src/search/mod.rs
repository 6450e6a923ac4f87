//! Search-as-you-type pipeline
//!
//! Keystrokes feed a [`SearchSession`], which debounces them through a
//! [`DebouncedEffect`] and issues one request per settled query:
//!
//! 1. The user edits the query; any pending request is cancelled
//! 2. After the quiet period the latest query is sent to the API
//! 3. The completed result list replaces the displayed one

mod debounce;
mod session;

pub use debounce::{DebouncedEffect, Debouncer};
pub use session::{Phase, SearchSession};
