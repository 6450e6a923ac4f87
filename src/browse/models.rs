//! Data types for article quick actions

use std::fmt;

/// Something the user can do with one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleAction {
    /// Open the bookmarked URL in the browser
    OpenLink,
    /// Open the web app page listing everything with this tag
    OpenTag(String),
    /// Put the bookmarked URL on the clipboard
    CopyLink,
}

impl ArticleAction {
    /// Fixed keyboard shortcut for copying the link
    pub const COPY_SHORTCUT: &'static str = "alt-c";

    /// Menu label
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::OpenLink => "Open in Browser".to_string(),
            Self::OpenTag(tag) => format!("Open #{tag} in raindrop"),
            Self::CopyLink => "Copy URL".to_string(),
        }
    }

    /// Keyboard shortcut shown next to the menu label, if any
    #[must_use]
    pub const fn shortcut(&self) -> Option<&'static str> {
        match self {
            Self::OpenLink => Some("enter"),
            Self::OpenTag(_) => None,
            Self::CopyLink => Some(Self::COPY_SHORTCUT),
        }
    }
}

impl fmt::Display for ArticleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// Result of executing an action
///
/// Pure data with no presentation concerns; the UI turns it into a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Action completed
    Success(String),
    /// Action could not be completed
    Failed(String),
}

impl ActionOutcome {
    /// Whether the action completed
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Message describing the outcome
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Failed(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_titles() {
        assert_eq!(ArticleAction::OpenLink.title(), "Open in Browser");
        assert_eq!(
            ArticleAction::OpenTag("rust".into()).title(),
            "Open #rust in raindrop"
        );
        assert_eq!(ArticleAction::CopyLink.to_string(), "Copy URL");
    }

    #[test]
    fn test_copy_has_fixed_shortcut() {
        assert_eq!(ArticleAction::CopyLink.shortcut(), Some("alt-c"));
        assert_eq!(ArticleAction::OpenTag("x".into()).shortcut(), None);
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = ActionOutcome::Success("Copied".into());
        let failed = ActionOutcome::Failed("Clipboard unavailable".into());

        assert!(ok.is_success());
        assert!(!failed.is_success());
        assert_eq!(failed.message(), "Clipboard unavailable");
    }
}
