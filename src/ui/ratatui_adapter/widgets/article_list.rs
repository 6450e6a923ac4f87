//! Result list widget
//!
//! One line per article: cursor indicator, title, tag subtitle, and the
//! source domain right-aligned.

use crate::ui::ArticleRow;
use crate::ui::ratatui_adapter::state::AppState;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct ArticleList<'a> {
    state: &'a AppState,
    theme: &'a Theme,
    loading: bool,
}

impl<'a> ArticleList<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            loading: false,
        }
    }

    /// Suppress the empty-list message while a request is outstanding
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn render_row(&self, row: &ArticleRow, is_cursor: bool, area: Rect, buf: &mut Buffer) {
        let base = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };
        buf.set_style(area, base);

        let accessory_width = u16::try_from(row.accessory.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(1)
            .min(area.width / 3);
        let [main, accessory] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(accessory_width)])
                .areas(area);

        let indicator = if is_cursor { "> " } else { "  " };
        let line = Line::from(vec![
            Span::styled(indicator, self.theme.cursor_style()),
            Span::styled(row.title.as_str(), base),
            Span::raw("  "),
            Span::styled(row.subtitle.as_str(), self.theme.tag_style()),
        ]);
        Paragraph::new(line).render(main, buf);

        Paragraph::new(Span::styled(row.accessory.as_str(), self.theme.accessory_style()))
            .alignment(Alignment::Right)
            .render(accessory, buf);
    }
}

impl Widget for ArticleList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Articles ({}) ", self.state.rows.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.state.rows.is_empty() {
            if !self.loading {
                Paragraph::new("No articles found")
                    .style(self.theme.dimmed_style())
                    .alignment(Alignment::Center)
                    .render(inner, buf);
            }
            return;
        }

        let start = self.state.scroll_offset;
        let visible = self
            .state
            .rows
            .iter()
            .enumerate()
            .skip(start)
            .take(inner.height as usize);

        for (offset, (idx, row)) in visible.enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let row_area = Rect::new(inner.x, inner.y + offset as u16, inner.width, 1);
            self.render_row(row, idx == self.state.cursor, row_area, buf);
        }
    }
}
