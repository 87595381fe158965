//! General test utilities for TUI tests.
//!
//! For widget-specific rendering helpers, see `crate::tui::widgets::testing`.

use std::sync::Arc;
use std::time::Duration;

use ratatui::buffer::Buffer;

use super::runtime::Runtime;
use crate::data_provider::DataProvider;
use crate::dev::mock_source::MockSource;

/// Provider backed by the deterministic mock source
pub fn create_provider() -> Arc<DataProvider> {
    Arc::new(DataProvider::new(Arc::new(MockSource::new())))
}

/// Provider plus a handle on its source, for call counting and removing seasons
pub fn create_provider_with_source() -> (Arc<DataProvider>, Arc<MockSource>) {
    let source = Arc::new(MockSource::new());
    (Arc::new(DataProvider::new(source.clone())), source)
}

/// Pump the runtime until in-flight fetches have been applied
pub async fn settle(runtime: &mut Runtime) {
    let mut idle_rounds = 0;
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        if runtime.process_actions() == 0 && !runtime.state().controller.is_loading() {
            idle_rounds += 1;
            if idle_rounds >= 10 {
                return;
            }
        } else {
            idle_rounds = 0;
        }
    }
}

/// Constant for general rendering width
pub const RENDER_WIDTH: u16 = 80;

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Helper for buffer assertions
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);
    let buffer_width = buf.area().width as usize;

    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].chars().count(),
            buffer_width,
            "Line {} width mismatch: expected {}, got {}",
            i,
            buffer_width,
            actual[i].chars().count()
        );
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}

/// True if any buffer line contains `needle`
pub fn buffer_contains(buf: &Buffer, needle: &str) -> bool {
    buffer_lines(buf).iter().any(|line| line.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    #[test]
    fn test_create_provider_returns_arc() {
        let provider = create_provider();
        assert_eq!(Arc::strong_count(&provider), 1);
    }

    #[test]
    fn test_buffer_lines_and_contains() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        buf.set_string(0, 1, "Hi", Style::default());
        assert_eq!(buffer_lines(&buf), vec!["      ".to_string(), "Hi    ".to_string()]);
        assert!(buffer_contains(&buf, "Hi"));
        assert!(!buffer_contains(&buf, "Bye"));
        assert_buffer(&buf, &["", "Hi"]);
    }
}
