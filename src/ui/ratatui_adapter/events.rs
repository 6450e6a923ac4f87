//! Event handling for the ratatui TUI
//!
//! Maps key and mouse events onto `AppState` edits and tells the loop what
//! happened, so it can feed the search session or run an action.

use super::state::{AppState, Mode};
use crate::browse::ArticleAction;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Keep running, repaint
    Continue,
    /// Query text changed
    QueryChanged,
    /// Run an action on the highlighted article
    Run(ArticleAction),
    /// Quit the browser
    Abort,
    /// No action taken
    Ignored,
}

/// Convert a key event to its string form, e.g. `ctrl-w` or `alt-c`
#[must_use]
pub fn key_to_string(key: &KeyEvent) -> Option<String> {
    let base = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Backspace => "bspace".to_string(),
        KeyCode::Delete => "del".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdn".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };

    let mut result = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str("ctrl-");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        result.push_str("alt-");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key.code, KeyCode::Char(_)) {
        result.push_str("shift-");
    }
    result.push_str(&base);

    Some(result)
}

fn is_copy_shortcut(key: &KeyEvent) -> bool {
    key_to_string(key).as_deref() == Some(ArticleAction::COPY_SHORTCUT)
}

fn changed(edited: bool) -> EventResult {
    if edited {
        EventResult::QueryChanged
    } else {
        EventResult::Ignored
    }
}

/// Handle a key press in normal mode
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    if is_copy_shortcut(&key) {
        return if state.current_row().is_some() {
            EventResult::Run(ArticleAction::CopyLink)
        } else {
            EventResult::Ignored
        };
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Abort,
        (KeyCode::Enter, _) => {
            if state.current_row().is_some() {
                EventResult::Run(ArticleAction::OpenLink)
            } else {
                EventResult::Ignored
            }
        }
        (KeyCode::Tab, _) => {
            if state.open_menu() {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }
        (KeyCode::F(1), _) => {
            state.mode = Mode::Help;
            EventResult::Continue
        }

        // Navigation
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
            state.cursor_down();
            EventResult::Continue
        }
        (KeyCode::PageUp, _) => {
            state.page_up();
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            state.page_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            state.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            state.jump_to_end();
            EventResult::Continue
        }

        // Query editing
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query_push(c);
            EventResult::QueryChanged
        }
        (KeyCode::Backspace, _) => changed(state.query_backspace()),
        (KeyCode::Delete, _) => changed(state.query_delete()),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => changed(state.query_clear()),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => changed(state.query_delete_word()),
        (KeyCode::Left, _) => {
            state.query_cursor_left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query_cursor_right();
            EventResult::Continue
        }

        _ => EventResult::Ignored,
    }
}

/// Handle a key press while the action menu is open
fn handle_actions_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    if is_copy_shortcut(&key) {
        state.close_menu();
        return EventResult::Run(ArticleAction::CopyLink);
    }

    let Some(menu) = state.menu.as_mut() else {
        state.close_menu();
        return EventResult::Continue;
    };

    match key.code {
        KeyCode::Up => {
            menu.up();
            EventResult::Continue
        }
        KeyCode::Down | KeyCode::Tab => {
            menu.down();
            EventResult::Continue
        }
        KeyCode::Enter => {
            let action = menu.selected().cloned();
            state.close_menu();
            action.map_or(EventResult::Continue, EventResult::Run)
        }
        KeyCode::Esc => {
            state.close_menu();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Any key closes help
fn handle_help_mode(state: &mut AppState) -> EventResult {
    state.mode = Mode::Normal;
    EventResult::Continue
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> EventResult {
    if state.mode != Mode::Normal {
        return EventResult::Ignored;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.cursor_down();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Dispatch one key press according to the current mode
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> EventResult {
    match state.mode {
        Mode::Normal => handle_normal_mode(state, key),
        Mode::Actions => handle_actions_mode(state, key),
        Mode::Help => handle_help_mode(state),
    }
}

/// Wait up to `timeout` for one event and handle it
///
/// A timeout yields `Continue`, so the caller can do periodic work.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut AppState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        Event::Mouse(mouse) => handle_mouse(state, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
