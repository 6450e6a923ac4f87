//! Modal list of quick actions for the highlighted article

use crate::ui::ratatui_adapter::state::ActionMenu;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct ActionMenuDialog<'a> {
    menu: &'a ActionMenu,
    theme: &'a Theme,
}

impl<'a> ActionMenuDialog<'a> {
    #[must_use]
    pub const fn new(menu: &'a ActionMenu, theme: &'a Theme) -> Self {
        Self { menu, theme }
    }

    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width.min(area.width), height.min(area.height))
    }

    fn action_line(&self, idx: usize, width: usize) -> Line<'a> {
        let action = &self.menu.actions[idx];
        let is_cursor = idx == self.menu.cursor;
        let style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        let title = action.title();
        let shortcut = action.shortcut().unwrap_or_default();
        let gap = width.saturating_sub(title.chars().count() + shortcut.len() + 2);

        Line::from(vec![
            Span::styled(if is_cursor { "> " } else { "  " }, self.theme.cursor_style()),
            Span::styled(title, style),
            Span::styled(" ".repeat(gap), style),
            Span::styled(shortcut, self.theme.dimmed_style()),
        ])
    }
}

impl Widget for ActionMenuDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let longest = self
            .menu
            .actions
            .iter()
            .map(|a| a.title().chars().count())
            .max()
            .unwrap_or_default();
        let width = u16::try_from(longest)
            .unwrap_or(u16::MAX)
            .saturating_add(16)
            .clamp(36, 70)
            .min(area.width);
        let action_rows = u16::try_from(self.menu.actions.len()).unwrap_or(u16::MAX);
        // Border, actions, spacing, hint, border
        let height = action_rows.saturating_add(4);

        let modal_area = Self::centered_rect(width, height, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.cursor_style())
            .title(format!(" {} ", self.menu.title))
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let [list_area, _, hint_area] = Layout::vertical([
            Constraint::Length(action_rows),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let lines: Vec<Line> = (0..self.menu.actions.len())
            .map(|idx| self.action_line(idx, inner.width as usize))
            .collect();
        Paragraph::new(lines).render(list_area, buf);

        Paragraph::new("↑/↓: move | Enter: run | ESC: close")
            .style(self.theme.dimmed_style())
            .alignment(Alignment::Center)
            .render(hint_area, buf);
    }
}
