/// Widget-based rendering infrastructure for TUI
///
/// Widgets are small, focused components that render straight into a
/// ratatui Buffer and can be tested against one.

#[cfg(test)]
pub mod testing;

pub mod list_modal;
pub use list_modal::{render_list_modal, ListModalWidget};

pub mod selector;
pub use selector::SelectorWidget;

pub mod stats_table;
pub use stats_table::StatsTableWidget;

pub mod status_bar;
pub use status_bar::{KeyHint, StatusBar};

use ratatui::{buffer::Buffer, layout::Rect};

use crate::config::ThemeConfig;

/// Core trait for renderable widgets
///
/// Widgets render themselves directly to a ratatui Buffer, avoiding string-based
/// intermediate representations.
pub trait RenderableWidget {
    /// Render this widget into the provided buffer
    ///
    /// # Arguments
    ///
    /// * `area` - The rectangular area to render into
    /// * `buf` - The buffer to write to
    /// * `theme` - Colors from the user's config
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &ThemeConfig);

    /// Get the preferred height of this widget
    ///
    /// Returns None if the widget can adapt to any height.
    fn preferred_height(&self) -> Option<u16> {
        None
    }
}
