/// StatusBar widget - status message and keyboard hints at the bottom of the screen
///
/// This widget renders a two-line status bar with:
/// - Top line: horizontal separator with connector aligned to the vertical bar
/// - Bottom line: left status message (or error) │ right load time
///
/// Error messages are displayed with the error color.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use crate::config::ThemeConfig;
use crate::tui::widgets::RenderableWidget;

const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";
const CONNECTOR: &str = "┬";

/// A keyboard hint displayed in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: String,
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct StatusBar {
    pub message: Option<String>,
    pub is_error: bool,
    /// Already formatted load time, shown on the right
    pub loaded_at: Option<String>,
    pub hints: Vec<KeyHint>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self.is_error = false;
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self.is_error = true;
        self
    }

    pub fn with_loaded_at(mut self, loaded_at: Option<String>) -> Self {
        self.loaded_at = loaded_at;
        self
    }

    pub fn with_hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    fn build_right_text(&self) -> String {
        let hints = self
            .hints
            .iter()
            .map(|h| format!("{} {}", h.key, h.action))
            .collect::<Vec<_>>()
            .join("  ");
        match &self.loaded_at {
            Some(t) if hints.is_empty() => t.clone(),
            Some(t) => format!("{}  {}", hints, t),
            None => hints,
        }
    }
}

impl RenderableWidget for StatusBar {
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig) {
        if area.width == 0 || area.height < 2 {
            return;
        }

        let right_text = self.build_right_text();
        // Layout: [message] [padding] │ [right text] [space]
        let right_width = right_text.width() as u16 + 3;
        let bar_position = area.width.saturating_sub(right_width);

        let separator = format!(
            "{}{}{}",
            HORIZONTAL.repeat(bar_position as usize),
            CONNECTOR,
            HORIZONTAL.repeat(area.width.saturating_sub(bar_position + 1) as usize)
        );
        buf.set_stringn(area.x, area.y, &separator, area.width as usize, Style::default());

        let y = area.y + 1;
        if let Some(message) = &self.message {
            let style = if self.is_error {
                Style::default().fg(theme.error_fg)
            } else {
                Style::default()
            };
            let room = bar_position.saturating_sub(2) as usize;
            buf.set_stringn(area.x + 1, y, message, room, style);
        }
        if bar_position < area.width {
            buf.set_string(area.x + bar_position, y, VERTICAL, Style::default());
            buf.set_stringn(
                area.x + bar_position + 2,
                y,
                &right_text,
                area.width.saturating_sub(bar_position + 2) as usize,
                Style::default().add_modifier(Modifier::DIM),
            );
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(2) // Separator line + status line
    }
}
