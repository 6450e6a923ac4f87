//! Status bar widget: latest toast on the left, search phase on the right

use crate::search::Phase;
use crate::ui::output::{MessageLevel, Toast};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct StatusBar<'a> {
    toast: Option<&'a Toast>,
    phase: Phase,
    result_count: usize,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    #[must_use]
    pub const fn new(
        toast: Option<&'a Toast>,
        phase: Phase,
        result_count: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            toast,
            phase,
            result_count,
            theme,
        }
    }

    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Warning => self.theme.warning_style(),
            MessageLevel::Info => self.theme.info_style(),
            MessageLevel::Normal => self.theme.normal_style(),
        }
    }

    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Warning => "⚠ ",
            MessageLevel::Info => "ℹ ",
            MessageLevel::Normal => "",
        }
    }

    /// Right-hand indicator text
    #[must_use]
    pub fn indicator(phase: Phase, result_count: usize) -> String {
        if phase.is_loading() {
            "Loading...".to_string()
        } else if result_count == 1 {
            "1 result".to_string()
        } else {
            format!("{result_count} results")
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let inner = block.inner(area);
        block.render(area, buf);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(75), Constraint::Percentage(25)])
                .areas(inner);

        if let Some(toast) = self.toast {
            let style = self.style_for_level(toast.level);
            let line = Line::from(vec![
                Span::styled(Self::prefix_for_level(toast.level), style),
                Span::styled(toast.text.as_str(), style),
            ]);
            Paragraph::new(line).render(left, buf);
        }

        let indicator_style = if self.phase.is_loading() {
            self.theme.warning_style()
        } else {
            self.theme.info_style().add_modifier(Modifier::DIM)
        };
        Paragraph::new(Line::styled(
            Self::indicator(self.phase, self.result_count),
            indicator_style,
        ))
        .alignment(Alignment::Right)
        .render(right, buf);
    }
}
