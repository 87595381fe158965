/// StatsTableWidget - the weekly stats grid
///
/// Renders a header row of column labels and one line per player-week,
/// starting at the cursor's scroll offset. The row label (team) comes first.
/// Columns wider than the area are clipped at the right border.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::table_model::TableViewModel;
use crate::tui::state::TableCursor;
use crate::tui::widgets::RenderableWidget;

/// Widest a single column is allowed to grow
const MAX_COLUMN_WIDTH: usize = 24;

/// Gap between columns
const COLUMN_GAP: u16 = 1;

/// Numeric columns are right-aligned
fn is_numeric(col: usize) -> bool {
    col >= 3 && col != 5
}

pub struct StatsTableWidget<'a> {
    pub view: Option<&'a TableViewModel>,
    pub title: String,
    pub cursor: TableCursor,
    pub focused: bool,
    /// Shown when there is no table to draw
    pub placeholder: String,
}

impl<'a> StatsTableWidget<'a> {
    pub fn new(view: Option<&'a TableViewModel>, title: impl Into<String>) -> Self {
        Self {
            view,
            title: title.into(),
            cursor: TableCursor::default(),
            focused: false,
            placeholder: "No data".to_string(),
        }
    }

    pub fn cursor(mut self, cursor: TableCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    fn render_row(
        buf: &mut Buffer,
        inner: Rect,
        y: u16,
        cells: impl Iterator<Item = (usize, String)>,
        widths: &[usize],
        style: Style,
    ) {
        let mut x = inner.x;
        for (col, text) in cells {
            if x >= inner.right() {
                break;
            }
            let width = widths[col];
            let room = (inner.right() - x) as usize;
            let shown = width.min(room);
            let text_width = text.width().min(shown);
            // col 0 is the row label; data columns are shifted by one
            let pad = if col > 0 && is_numeric(col - 1) { shown - text_width } else { 0 };
            buf.set_stringn(x + pad as u16, y, &text, shown - pad, style);
            x = x.saturating_add(width as u16 + COLUMN_GAP);
        }
    }
}

impl RenderableWidget for StatsTableWidget<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        if area.width < 3 || area.height < 3 {
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
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(view) = self.view else {
            let x = inner.x + inner.width.saturating_sub(self.placeholder.width() as u16) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_stringn(x, y, &self.placeholder, inner.width as usize, Style::default().add_modifier(Modifier::DIM));
            return;
        };

        let label_width = (0..view.row_count())
            .filter_map(|r| view.row_label(r))
            .map(|l| l.width())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = std::iter::once(label_width)
            .chain(view.column_widths().into_iter().map(|w| w.min(MAX_COLUMN_WIDTH)))
            .collect();

        let header = (0..view.column_count())
            .filter_map(|c| view.column_label(c).map(|l| (c + 1, l.to_string())));
        let header = std::iter::once((0, String::new())).chain(header);
        Self::render_row(buf, inner, inner.y, header, &widths, Style::default().add_modifier(Modifier::BOLD));

        let selected_style = if self.focused {
            Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.unfocused_selection_fg())
        };

        let visible = inner.height.saturating_sub(1) as usize;
        for (line, row) in (self.cursor.offset..view.row_count()).take(visible).enumerate() {
            let label = view.row_label(row).unwrap_or_default().to_string();
            let cells = view.row_cells(row).unwrap_or_default();
            let cells = std::iter::once((0, label)).chain(cells.into_iter().enumerate().map(|(c, v)| (c + 1, v)));
            let style = if row == self.cursor.selected {
                selected_style
            } else {
                Style::default()
            };
            Self::render_row(buf, inner, inner.y + 1 + line as u16, cells, &widths, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::stat_row;
    use crate::stats::StatTable;
    use crate::tui::widgets::testing::*;

    fn create_view(rows: usize) -> TableViewModel {
        let rows = (1..=rows as u8)
            .map(|week| {
                let mut row = stat_row("P.Mahomes", "QB", "KC", 2023, week, "DET");
                row.passing_yards = 300.0 + week as f64;
                row
            })
            .collect();
        TableViewModel::new(StatTable::new("KC", 2023, rows).unwrap())
    }

    #[test]
    fn test_renders_header_and_rows() {
        let view = create_view(2);
        let widget = StatsTableWidget::new(Some(&view), "Kansas City Chiefs 2023");
        let buf = render_widget(&widget, 200, 6);

        assert!(buffer_line(&buf, 0).contains(" Kansas City Chiefs 2023 "));
        let header = buffer_line(&buf, 1);
        assert!(header.contains("player_name"));
        assert!(header.contains("sacks"));
        let first = buffer_line(&buf, 2);
        assert!(first.starts_with("│KC P.Mahomes"));
        assert!(first.contains("301"));
        assert!(buffer_line(&buf, 3).contains("302"));
    }

    #[test]
    fn test_numeric_columns_are_right_aligned() {
        let view = create_view(1);
        let widget = StatsTableWidget::new(Some(&view), "t");
        let buf = render_widget(&widget, 200, 4);

        // "week" header is 4 wide, value "1" sits under its last character
        let week_x = find_in_line(&buf, 1, "week").unwrap();
        assert_eq!(buf[(week_x + 3, 2)].symbol(), "1");
        assert_eq!(buf[(week_x, 2)].symbol(), " ");
    }

    #[test]
    fn test_selected_row_is_highlighted() {
        let theme = test_theme();
        let view = create_view(3);
        let cursor = TableCursor { selected: 1, offset: 0, viewport: 3 };
        let widget = StatsTableWidget::new(Some(&view), "t").cursor(cursor).focused(true);
        let buf = render_widget(&widget, 200, 6);

        assert_eq!(buf[(1, 3)].fg, theme.selection_fg);
        assert_ne!(buf[(1, 2)].fg, theme.selection_fg);
    }

    #[test]
    fn test_unfocused_selection_is_dimmer() {
        let theme = test_theme();
        let view = create_view(2);
        let widget = StatsTableWidget::new(Some(&view), "t");
        let buf = render_widget(&widget, 200, 5);
        assert_eq!(buf[(1, 2)].fg, theme.unfocused_selection_fg());
    }

    #[test]
    fn test_offset_skips_rows() {
        let view = create_view(5);
        let cursor = TableCursor { selected: 3, offset: 3, viewport: 2 };
        let widget = StatsTableWidget::new(Some(&view), "t").cursor(cursor);
        let buf = render_widget(&widget, 200, 5);

        assert!(buffer_line(&buf, 2).contains("304"));
        assert!(buffer_line(&buf, 3).contains("305"));
    }

    #[test]
    fn test_clipped_at_right_border() {
        let view = create_view(1);
        let widget = StatsTableWidget::new(Some(&view), "t");
        let buf = render_widget(&widget, 30, 4);
        assert!(buffer_line(&buf, 2).ends_with('│'));
    }

    #[test]
    fn test_placeholder_without_table() {
        let widget = StatsTableWidget::new(None, "Stats").placeholder("Loading...");
        let buf = render_widget(&widget, 30, 5);
        assert!(buffer_line(&buf, 2).contains("Loading..."));
    }
}
