/// ListModalWidget - popup list for picking a selector value
///
/// Features:
/// - Anchored below the selector it belongs to
/// - Clear background behind modal
/// - Scrolls to keep the highlighted option visible
/// - Selection indicator for current option
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::tui::widgets::RenderableWidget;

const SELECTOR: &str = "▶";

/// Widget for rendering a list selection modal
#[derive(Clone)]
pub struct ListModalWidget {
    pub options: Vec<String>,
    pub selected_index: usize,
    pub position_x: u16,
    pub position_y: u16,
}

impl ListModalWidget {
    pub fn new(options: Vec<String>, selected_index: usize, position_x: u16, position_y: u16) -> Self {
        Self {
            options,
            selected_index,
            position_x,
            position_y,
        }
    }
}

impl RenderableWidget for ListModalWidget {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        render_list_modal(
            &self.options,
            self.selected_index,
            self.position_x,
            self.position_y,
            area,
            buf,
            theme,
        );
    }
}

/// First visible option so that `selected` fits in `visible` rows
fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        0
    } else {
        (selected + 1).saturating_sub(visible)
    }
}

/// Renders a list selection modal at the specified position
///
/// Returns the modal area that was rendered
pub fn render_list_modal(
    options: &[String],
    selected_index: usize,
    position_x: u16,
    position_y: u16,
    area: Rect,
    buf: &mut Buffer,
    theme: &ThemeConfig,
) -> Rect {
    // Shrink to the space below the anchor; long lists scroll
    let available = area.bottom().saturating_sub(position_y);
    let modal_height = (options.len() as u16 + 2).min(available.max(3)).min(area.height);
    let max_option_len = options.iter().map(|s| s.width()).max().unwrap_or(20);
    let modal_width = (max_option_len as u16 + 6).min(area.width);

    let modal_area = Rect {
        x: position_x.min(area.right().saturating_sub(modal_width)),
        y: position_y.min(area.bottom().saturating_sub(modal_height)),
        width: modal_width,
        height: modal_height,
    };

    Clear.render(modal_area, buf);

    let border_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.selection_fg));
    let inner = border_block.inner(modal_area);
    border_block.render(modal_area, buf);

    let visible = inner.height as usize;
    let offset = scroll_offset(selected_index, visible);
    let highlight = Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD);
    let text_width = inner.width.saturating_sub(3) as usize;

    for (row, (idx, option)) in options.iter().enumerate().skip(offset).take(visible).enumerate() {
        let y = inner.y + row as u16;
        if idx == selected_index {
            buf.set_string(inner.x, y, format!(" {} ", SELECTOR), highlight);
            buf.set_stringn(inner.x + 3, y, option, text_width, highlight);
        } else {
            buf.set_string(inner.x, y, "   ", Style::default());
            buf.set_stringn(inner.x + 3, y, option, text_width, Style::default());
        }
    }

    modal_area
}
