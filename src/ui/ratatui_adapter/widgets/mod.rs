//! Ratatui widgets for the article browser

mod action_menu;
mod article_list;
mod help_bar;
mod help_overlay;
mod search_bar;
mod status_bar;

pub use action_menu::ActionMenuDialog;
pub use article_list::ArticleList;
pub use help_bar::{HelpBar, KeyHint};
pub use help_overlay::HelpOverlay;
pub use search_bar::{PLACEHOLDER, SearchBar};
pub use status_bar::StatusBar;
