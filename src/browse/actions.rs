//! Quick action business logic
//!
//! Builds the action list for an article and executes actions through a
//! [`Launcher`], so the side effects (browser, clipboard) can be swapped out
//! in tests. Functions here return `ActionOutcome` instead of printing.

use super::models::{ActionOutcome, ArticleAction};
use crate::ui::ArticleRow;

/// Side-effect seam for actions
pub trait Launcher {
    /// Open a URL in the default browser
    ///
    /// # Errors
    ///
    /// Returns a description of the failure.
    fn open_url(&self, url: &str) -> Result<(), String>;

    /// Replace the clipboard contents with `text`
    ///
    /// # Errors
    ///
    /// Returns a description of the failure.
    fn copy_text(&self, text: &str) -> Result<(), String>;
}

/// `Launcher` backed by the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &str) -> Result<(), String> {
        open::that(url).map_err(|e| e.to_string())
    }

    fn copy_text(&self, text: &str) -> Result<(), String> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| format!("Clipboard unavailable: {e}"))?;
        clipboard
            .set_text(text)
            .map_err(|e| format!("Clipboard error: {e}"))
    }
}

/// Web app page listing every bookmark with `tag`
#[must_use]
pub fn tag_url(app_url: &str, tag: &str) -> String {
    format!("{}/my/0/%23{tag}", app_url.trim_end_matches('/'))
}

/// Actions offered for one article, in menu order
///
/// Open link first, then one entry per tag in API order, then copy.
#[must_use]
pub fn actions_for(row: &ArticleRow) -> Vec<ArticleAction> {
    let mut actions = Vec::with_capacity(row.tags.len() + 2);
    actions.push(ArticleAction::OpenLink);
    actions.extend(row.tags.iter().cloned().map(ArticleAction::OpenTag));
    actions.push(ArticleAction::CopyLink);
    actions
}

/// Execute an action on one article
#[must_use]
pub fn execute_action(
    launcher: &dyn Launcher,
    action: &ArticleAction,
    row: &ArticleRow,
    app_url: &str,
) -> ActionOutcome {
    match action {
        ArticleAction::OpenLink => match launcher.open_url(&row.link) {
            Ok(()) => ActionOutcome::Success(format!("Opened {}", row.link)),
            Err(e) => ActionOutcome::Failed(format!("Failed to open {}: {e}", row.link)),
        },
        ArticleAction::OpenTag(tag) => {
            let url = tag_url(app_url, tag);
            match launcher.open_url(&url) {
                Ok(()) => ActionOutcome::Success(format!("Opened #{tag}")),
                Err(e) => ActionOutcome::Failed(format!("Failed to open #{tag}: {e}")),
            }
        }
        ArticleAction::CopyLink => match launcher.copy_text(&row.link) {
            Ok(()) => ActionOutcome::Success("Copied URL to clipboard".to_string()),
            Err(e) => ActionOutcome::Failed(e),
        },
    }
}
