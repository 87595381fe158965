/// SelectorWidget - a bordered, single-value picker (team or year)
///
/// Shows the current choice between step arrows. The arrows are dimmed
/// when there is nothing further in that direction.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::tui::widgets::RenderableWidget;

#[derive(Debug, Clone)]
pub struct SelectorWidget {
    pub label: String,
    pub value: String,
    pub focused: bool,
    pub has_previous: bool,
    pub has_next: bool,
}

impl SelectorWidget {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            focused: false,
            has_previous: false,
            has_next: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Position of the value among `len` options
    pub fn position(mut self, index: Option<usize>, len: usize) -> Self {
        self.has_previous = matches!(index, Some(i) if i > 0);
        self.has_next = matches!(index, Some(i) if i + 1 < len);
        self
    }
}

impl RenderableWidget for SelectorWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let border_style = if self.focused {
            Style::default().fg(theme.selection_fg)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.label));
        let inner = block.inner(area);
        block.render(area, buf);

        let arrow = |enabled: bool| {
            if enabled {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::DIM)
            }
        };
        let value_style = if self.focused {
            Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.unfocused_selection_fg())
        };

        let y = inner.y;
        buf.set_string(inner.x, y, "◀", arrow(self.has_previous));
        if inner.width > 2 {
            let right = inner.right() - 1;
            buf.set_string(right, y, "▶", arrow(self.has_next));

            let room = inner.width.saturating_sub(4) as usize;
            let width = self.value.width().min(room) as u16;
            let x = inner.x + 2 + (room as u16).saturating_sub(width) / 2;
            buf.set_stringn(x, y, &self.value, room, value_style);
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(3)
    }
}
