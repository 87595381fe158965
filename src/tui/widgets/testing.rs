/// Testing utilities for widget rendering
///
/// Helpers for rendering widgets in isolation.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use super::RenderableWidget;
use crate::config::ThemeConfig;

/// Theme with fixed colors so style assertions stay stable
pub fn test_theme() -> ThemeConfig {
    ThemeConfig {
        selection_fg: Color::Rgb(255, 200, 0), // Gold
        unfocused_selection_fg: None,
        error_fg: Color::Red,
    }
}

/// Render a widget to a buffer and return it for testing
pub fn render_widget(widget: &impl RenderableWidget, width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    let theme = test_theme();
    widget.render(buf.area, &mut buf, &theme);
    buf
}

/// Get the text content of a specific line in the buffer
pub fn buffer_line(buf: &Buffer, line: u16) -> String {
    let area = buf.area();
    (0..area.width).map(|x| buf[(x, line)].symbol()).collect()
}

/// Column where `needle` starts on `line`, counted in cells
pub fn find_in_line(buf: &Buffer, line: u16, needle: &str) -> Option<u16> {
    let area = buf.area();
    let first = needle.chars().next()?.to_string();
    (0..area.width).find(|&x| {
        buf[(x, line)].symbol() == first
            && needle
                .chars()
                .enumerate()
                .all(|(i, c)| x + (i as u16) < area.width && buf[(x + i as u16, line)].symbol() == c.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    struct TestWidget {
        text: String,
    }

    impl RenderableWidget for TestWidget {
        fn render(&self, area: Rect, buf: &mut Buffer, _theme: &ThemeConfig) {
            buf.set_string(area.x, area.y, &self.text, Style::default());
        }
    }

    #[test]
    fn test_render_widget() {
        let widget = TestWidget { text: "Hello".to_string() };
        let buf = render_widget(&widget, 10, 1);
        assert_eq!(buf[(0, 0)].symbol(), "H");
        assert_eq!(buf[(4, 0)].symbol(), "o");
    }

    #[test]
    fn test_buffer_line() {
        let widget = TestWidget { text: "Test".to_string() };
        let buf = render_widget(&widget, 10, 1);
        assert_eq!(buffer_line(&buf, 0), "Test      ");
    }

    #[test]
    fn test_find_in_line() {
        let widget = TestWidget { text: "ab KC".to_string() };
        let buf = render_widget(&widget, 10, 1);
        assert_eq!(find_in_line(&buf, 0, "KC"), Some(3));
        assert_eq!(find_in_line(&buf, 0, "BUF"), None);
    }
}
