//! Interactive article browser
//!
//! Owns the terminal for the duration of [`RatatuiBrowser::run`]. Keystrokes
//! edit [`AppState`] and are forwarded to the [`SearchSession`]; every tick
//! the session is pumped so finished fetches repaint without user input.

use super::events::{EventResult, poll_and_handle};
use super::state::{AppState, Mode};
use super::theme::Theme;
use super::widgets::{
    ActionMenuDialog, ArticleList, HelpBar, HelpOverlay, KeyHint, SearchBar, StatusBar,
};
use crate::browse::{ActionOutcome, ArticleAction, Launcher, SystemLauncher, execute_action};
use crate::search::SearchSession;
use crate::ui::ArticleRow;
use crate::ui::error::Result;
use crate::ui::output::{OutputWriter, ToastWriter};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::{Constraint, Layout, Rect}};
use std::io::{self, Stdout};
use std::time::Duration;

/// How long to wait for input before pumping the session again
const TICK: Duration = Duration::from_millis(50);

/// Rows taken by everything except the list body
const CHROME_HEIGHT: u16 = 3 + 3 + 1 + 2;

/// Ratatui-based browser for search results
pub struct RatatuiBrowser {
    app_url: String,
    theme: Theme,
    launcher: Box<dyn Launcher>,
}

impl RatatuiBrowser {
    /// Create a browser whose tag actions link into `app_url`
    #[must_use]
    pub fn new(app_url: impl Into<String>) -> Self {
        Self {
            app_url: app_url.into(),
            theme: Theme::default(),
            launcher: Box::new(SystemLauncher),
        }
    }

    /// Replace the browser/clipboard backend
    #[must_use]
    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    fn hints() -> Vec<KeyHint> {
        vec![
            KeyHint::new("↑/↓", "navigate"),
            KeyHint::new("Enter", "open"),
            KeyHint::new("Tab", "actions"),
            KeyHint::new(ArticleAction::COPY_SHORTCUT, "copy"),
            KeyHint::new("ESC", "quit"),
            KeyHint::new("F1", "help"),
        ]
    }

    /// Run the browser until the user quits
    ///
    /// The session should already be started; the initial query is taken
    /// from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or drawn.
    pub fn run(&self, session: &mut SearchSession, toasts: &ToastWriter) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, session, toasts);

        if let Err(e) = Self::cleanup_terminal() {
            tracing::warn!(error = %e, "terminal cleanup failed");
        }

        result
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut SearchSession,
        toasts: &ToastWriter,
    ) -> Result<()> {
        let hints = Self::hints();
        let mut state = AppState::new(session.query());
        state.set_rows(ArticleRow::from_articles(session.articles()));

        loop {
            if session.pump() {
                state.set_rows(ArticleRow::from_articles(session.articles()));
            }

            let toast = toasts.latest();
            let view = View {
                hints: &hints,
                loading: session.phase().is_loading(),
                status: StatusBar::new(
                    toast.as_ref(),
                    session.phase(),
                    state.rows.len(),
                    &self.theme,
                ),
            };

            terminal.draw(|frame| render(frame, &mut state, &self.theme, view))?;

            match poll_and_handle(&mut state, TICK)? {
                EventResult::QueryChanged => session.set_query(state.query.clone()),
                EventResult::Run(action) => self.run_action(&state, &action, toasts),
                EventResult::Abort => break,
                EventResult::Continue | EventResult::Ignored => {}
            }
        }

        Ok(())
    }

    fn run_action(&self, state: &AppState, action: &ArticleAction, toasts: &ToastWriter) {
        let Some(row) = state.current_row() else {
            return;
        };

        tracing::info!(action = %action, article = %row.id, "running action");
        match execute_action(self.launcher.as_ref(), action, row, &self.app_url) {
            ActionOutcome::Success(msg) => toasts.success(&msg),
            ActionOutcome::Failed(msg) => {
                tracing::warn!(action = %action, error = %msg, "action failed");
                toasts.error(&msg);
            }
        }
    }
}

/// Per-frame inputs that do not live in `AppState`
struct View<'a> {
    hints: &'a [KeyHint],
    loading: bool,
    status: StatusBar<'a>,
}

fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme, view: View<'_>) {
    let area = frame.area();
    state.visible_height = area.height.saturating_sub(CHROME_HEIGHT) as usize;

    let [search_area, list_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(3), // Search bar
        Constraint::Min(3),    // Results
        Constraint::Length(3), // Status bar
        Constraint::Length(1), // Help bar
    ])
    .areas(area);

    let search_bar =
        SearchBar::new(&state.query, state.query_cursor, theme).focused(state.mode == Mode::Normal);
    frame.render_widget(search_bar, search_area);

    frame.render_widget(
        ArticleList::new(state, theme).loading(view.loading),
        list_area,
    );
    frame.render_widget(view.status, status_area);
    frame.render_widget(HelpBar::new(view.hints, theme), help_area);

    render_overlays(frame, state, theme, area);
}

fn render_overlays(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    match state.mode {
        Mode::Help => frame.render_widget(HelpOverlay::new(theme), area),
        Mode::Actions => {
            if let Some(menu) = &state.menu {
                frame.render_widget(ActionMenuDialog::new(menu, theme), area);
            }
        }
        Mode::Normal => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Phase;
    use crate::testing::article;
    use crate::ui::output::MessageLevel;
    use ratatui::backend::TestBackend;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedLauncher {
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl Launcher for SharedLauncher {
        fn open_url(&self, url: &str) -> std::result::Result<(), String> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }

        fn copy_text(&self, _text: &str) -> std::result::Result<(), String> {
            Err("Clipboard unavailable: headless".to_string())
        }
    }

    fn state_with_rows() -> AppState {
        let mut state = AppState::new("rust");
        state.set_rows(ArticleRow::from_articles(&[
            article("1", "The Rust Book", &["rust", "docs"]),
            article("2", "Rustlings", &[]),
        ]));
        state
    }

    fn draw(state: &mut AppState, phase: Phase, mode: Mode) -> String {
        let theme = Theme::default();
        let hints = RatatuiBrowser::hints();
        state.mode = mode;
        if mode == Mode::Actions {
            state.open_menu();
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let count = state.rows.len();
        terminal
            .draw(|frame| {
                let view = View {
                    hints: &hints,
                    loading: phase.is_loading(),
                    status: StatusBar::new(None, phase, count, &theme),
                };
                render(frame, state, &theme, view);
            })
            .unwrap();

        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_layout() {
        let mut state = state_with_rows();
        let screen = draw(&mut state, Phase::Displaying, Mode::Normal);

        assert!(screen.contains("rust│"));
        assert!(screen.contains("> The Rust Book"));
        assert!(screen.contains("#docs, #rust, "));
        assert!(screen.contains("Rustlings"));
        assert!(screen.contains("2 results"));
        assert!(screen.contains("alt-c:copy"));
        assert_eq!(state.visible_height, 24 - CHROME_HEIGHT as usize);
    }

    #[test]
    fn test_render_loading() {
        let mut state = AppState::new("");
        let screen = draw(&mut state, Phase::Fetching, Mode::Normal);

        assert!(screen.contains("Loading..."));
        assert!(screen.contains("Filter articles by name..."));
        assert!(!screen.contains("No articles found"));
    }

    #[test]
    fn test_render_overlays() {
        let mut state = state_with_rows();
        let help = draw(&mut state, Phase::Displaying, Mode::Help);
        assert!(help.contains(" Help "));
        assert!(help.contains("Search your bookmarks"));

        let mut state = state_with_rows();
        let menu = draw(&mut state, Phase::Displaying, Mode::Actions);
        assert!(menu.contains("Open #docs in raindrop"));
    }

    #[test]
    fn test_run_action_reports_outcome() {
        let launcher = SharedLauncher::default();
        let browser = RatatuiBrowser::new("https://app.raindrop.io").with_launcher(launcher.clone());
        let toasts = ToastWriter::new();
        let state = state_with_rows();

        browser.run_action(&state, &ArticleAction::OpenTag("rust".into()), &toasts);
        assert_eq!(
            *launcher.opened.lock().unwrap(),
            vec!["https://app.raindrop.io/my/0/%23rust".to_string()]
        );
        assert_eq!(toasts.latest().unwrap().level, MessageLevel::Success);

        browser.run_action(&state, &ArticleAction::CopyLink, &toasts);
        let latest = toasts.latest().unwrap();
        assert_eq!(latest.level, MessageLevel::Error);
        assert_eq!(latest.text, "Clipboard unavailable: headless");
    }

    #[test]
    fn test_run_action_without_rows_does_nothing() {
        let launcher = SharedLauncher::default();
        let browser = RatatuiBrowser::new("https://app.raindrop.io").with_launcher(launcher.clone());
        let toasts = ToastWriter::new();

        browser.run_action(&AppState::new(""), &ArticleAction::OpenLink, &toasts);

        assert!(launcher.opened.lock().unwrap().is_empty());
        assert!(toasts.latest().is_none());
    }
}
