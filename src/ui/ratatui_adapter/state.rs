//! Application state for the ratatui TUI
//!
//! Holds the editable query, the rows on screen, list navigation, and the
//! action menu. Fetching lives in `SearchSession`; this state only mirrors
//! what the session last produced.

use crate::browse::{ArticleAction, actions_for};
use crate::ui::ArticleRow;

/// Current mode of the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Typing and list navigation
    #[default]
    Normal,
    /// Action menu for the highlighted article is open
    Actions,
    /// Help overlay is visible
    Help,
}

/// Action menu for one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    /// Title of the article the menu belongs to
    pub title: String,
    pub actions: Vec<ArticleAction>,
    pub cursor: usize,
}

impl ActionMenu {
    /// Build the menu for a row
    #[must_use]
    pub fn for_row(row: &ArticleRow) -> Self {
        Self {
            title: row.title.clone(),
            actions: actions_for(row),
            cursor: 0,
        }
    }

    pub const fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub const fn down(&mut self) {
        if self.cursor + 1 < self.actions.len() {
            self.cursor += 1;
        }
    }

    /// Action under the menu cursor
    #[must_use]
    pub fn selected(&self) -> Option<&ArticleAction> {
        self.actions.get(self.cursor)
    }
}

/// Application state for the browser
#[derive(Debug, Default)]
pub struct AppState {
    /// Search text as typed
    pub query: String,
    /// Byte offset of the cursor within `query`
    pub query_cursor: usize,
    /// Rows for the latest applied result list
    pub rows: Vec<ArticleRow>,
    /// Highlighted row
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Rows that fit in the list area (set before each render)
    pub visible_height: usize,
    pub mode: Mode,
    /// Open action menu, when `mode` is `Actions`
    pub menu: Option<ActionMenu>,
}

impl AppState {
    /// Create state with an initial query, cursor at its end
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query_cursor: query.len(),
            query,
            visible_height: 20,
            ..Self::default()
        }
    }

    /// Replace the rows with a new result list
    ///
    /// Returns `false` and keeps the cursor when the rows did not change.
    pub fn set_rows(&mut self, rows: Vec<ArticleRow>) -> bool {
        if rows == self.rows {
            return false;
        }
        self.rows = rows;
        self.cursor = 0;
        self.scroll_offset = 0;
        if self.mode == Mode::Actions {
            self.close_menu();
        }
        true
    }

    /// Highlighted row, if any
    #[must_use]
    pub fn current_row(&self) -> Option<&ArticleRow> {
        self.rows.get(self.cursor)
    }

    pub const fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    pub const fn cursor_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    pub const fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height);
        self.adjust_scroll();
    }

    pub fn page_down(&mut self) {
        let max_cursor = self.rows.len().saturating_sub(1);
        self.cursor = (self.cursor + self.visible_height).min(max_cursor);
        self.adjust_scroll();
    }

    pub const fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    pub const fn jump_to_end(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
        self.adjust_scroll();
    }

    /// Keep the cursor inside the viewport
    const fn adjust_scroll(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.visible_height > 0 && self.cursor >= self.scroll_offset + self.visible_height
        {
            self.scroll_offset = self.cursor + 1 - self.visible_height;
        }
    }

    /// Insert a character at the query cursor
    pub fn query_push(&mut self, c: char) {
        self.query.insert(self.query_cursor, c);
        self.query_cursor += c.len_utf8();
    }

    /// Remove the character before the query cursor
    ///
    /// Returns whether the query changed.
    pub fn query_backspace(&mut self) -> bool {
        if self.query_cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.query.remove(prev);
        self.query_cursor = prev;
        true
    }

    /// Remove the character under the query cursor
    ///
    /// Returns whether the query changed.
    pub fn query_delete(&mut self) -> bool {
        if self.query_cursor >= self.query.len() {
            return false;
        }
        self.query.remove(self.query_cursor);
        true
    }

    pub fn query_cursor_left(&mut self) {
        self.query_cursor = self.prev_boundary();
    }

    pub fn query_cursor_right(&mut self) {
        if self.query_cursor < self.query.len() {
            self.query_cursor = self.query[self.query_cursor..]
                .char_indices()
                .nth(1)
                .map_or(self.query.len(), |(i, _)| self.query_cursor + i);
        }
    }

    /// Clear the query; returns whether it was non-empty
    pub fn query_clear(&mut self) -> bool {
        let changed = !self.query.is_empty();
        self.query.clear();
        self.query_cursor = 0;
        changed
    }

    /// Delete the word before the query cursor
    ///
    /// Returns whether the query changed.
    pub fn query_delete_word(&mut self) -> bool {
        if self.query_cursor == 0 {
            return false;
        }
        let start = self.query[..self.query_cursor]
            .trim_end()
            .rfind(' ')
            .map_or(0, |space| space + 1);
        self.query.drain(start..self.query_cursor);
        self.query_cursor = start;
        true
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.query_cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    /// Open the action menu for the highlighted row
    ///
    /// Returns `false` when the list is empty.
    pub fn open_menu(&mut self) -> bool {
        let Some(row) = self.current_row() else {
            return false;
        };
        self.menu = Some(ActionMenu::for_row(row));
        self.mode = Mode::Actions;
        true
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
        self.mode = Mode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::article;

    fn make_state(count: usize) -> AppState {
        let articles: Vec<_> = (0..count)
            .map(|i| article(&i.to_string(), &format!("Article {i}"), &["tag"]))
            .collect();
        let mut state = AppState::new("");
        state.set_rows(ArticleRow::from_articles(&articles));
        state
    }

    #[test]
    fn test_cursor_navigation() {
        let mut state = make_state(10);
        state.visible_height = 4;

        state.cursor_down();
        state.cursor_down();
        assert_eq!(state.cursor, 2);

        state.cursor_up();
        assert_eq!(state.cursor, 1);

        state.jump_to_end();
        assert_eq!(state.cursor, 9);
        assert_eq!(state.scroll_offset, 6);

        state.page_up();
        assert_eq!(state.cursor, 5);
        assert_eq!(state.scroll_offset, 5);

        state.jump_to_start();
        assert_eq!((state.cursor, state.scroll_offset), (0, 0));

        state.cursor_up();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_page_down_clamps() {
        let mut state = make_state(3);
        state.visible_height = 10;
        state.page_down();
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut state = make_state(0);
        state.cursor_down();
        state.jump_to_end();
        assert_eq!(state.cursor, 0);
        assert!(state.current_row().is_none());
        assert!(!state.open_menu());
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_set_rows_resets_cursor_only_on_change() {
        let mut state = make_state(5);
        state.cursor_down();
        state.cursor_down();

        let same = state.rows.clone();
        assert!(!state.set_rows(same));
        assert_eq!(state.cursor, 2);

        assert!(state.set_rows(Vec::new()));
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_query_editing() {
        let mut state = AppState::new("rust");
        assert_eq!(state.query_cursor, 4);

        state.query_push('!');
        assert_eq!(state.query, "rust!");

        assert!(state.query_backspace());
        assert_eq!(state.query, "rust");

        state.query_cursor_left();
        state.query_cursor_left();
        assert!(state.query_delete());
        assert_eq!(state.query, "rut");

        state.query_cursor_right();
        state.query_cursor_right();
        assert_eq!(state.query_cursor, 3);
        assert!(!state.query_delete());

        assert!(state.query_clear());
        assert!(!state.query_clear());
    }

    #[test]
    fn test_query_editing_multibyte() {
        let mut state = AppState::new("");
        state.query_push('é');
        state.query_push('t');
        state.query_cursor_left();
        state.query_cursor_left();
        assert_eq!(state.query_cursor, 0);
        state.query_cursor_right();
        assert_eq!(state.query_cursor, 'é'.len_utf8());
        assert!(state.query_backspace());
        assert_eq!(state.query, "t");
    }

    #[test]
    fn test_delete_word() {
        let mut state = AppState::new("async rust  ");
        assert!(state.query_delete_word());
        assert_eq!(state.query, "async ");
        assert!(state.query_delete_word());
        assert_eq!(state.query, "");
        assert!(!state.query_delete_word());
    }

    #[test]
    fn test_action_menu() {
        let mut state = make_state(2);
        assert!(state.open_menu());
        assert_eq!(state.mode, Mode::Actions);

        let menu = state.menu.as_mut().unwrap();
        assert_eq!(menu.title, "Article 0");
        assert_eq!(menu.actions.len(), 3);
        menu.down();
        menu.down();
        menu.down();
        assert_eq!(menu.selected(), Some(&ArticleAction::CopyLink));
        menu.up();
        assert_eq!(menu.selected(), Some(&ArticleAction::OpenTag("tag".into())));

        state.close_menu();
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.menu.is_none());
    }

    #[test]
    fn test_new_results_close_menu() {
        let mut state = make_state(2);
        state.open_menu();
        state.set_rows(Vec::new());
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.menu.is_none());
    }
}
