//! Screen layout: two selectors on top, the stats table, the status bar
//!
//! Rendering is a pure function of [`AppState`] so the whole screen can be
//! asserted against a test buffer.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
};

use super::state::{AppState, Focus};
use super::widgets::{
    render_list_modal, KeyHint, RenderableWidget, SelectorWidget, StatsTableWidget, StatusBar,
};
use crate::config::ThemeConfig;

const SELECTOR_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 2;
const YEAR_SELECTOR_WIDTH: u16 = 14;

/// Table borders plus the header row
const TABLE_CHROME: u16 = 3;

/// Data rows that fit in the table for a terminal of `terminal_height` lines
pub fn table_viewport_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(SELECTOR_HEIGHT + STATUS_HEIGHT + TABLE_CHROME)
}

fn hints() -> Vec<KeyHint> {
    vec![
        KeyHint::new("Tab", "focus"),
        KeyHint::new("←/→", "change"),
        KeyHint::new("Enter", "list"),
        KeyHint::new("r", "reload"),
        KeyHint::new("q", "quit"),
    ]
}

/// Falls back to `%H:%M:%S` when the configured format does not parse
fn format_time(time: DateTime<Local>, format: &str) -> String {
    use chrono::format::{Item, StrftimeItems};

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return time.format("%H:%M:%S").to_string();
    }
    time.format(format).to_string()
}

fn table_title(state: &AppState) -> String {
    let bound = match (state.controller.bound_selection(), state.controller.view()) {
        (Some(selection), Some(view)) => format!("{} ({} rows)", selection, view.row_count()),
        _ => "Weekly stats".to_string(),
    };
    match state.controller.pending() {
        Some(pending) => format!("{} - loading {}", bound, pending),
        None => bound,
    }
}

pub fn render(state: &AppState, area: Rect, buf: &mut Buffer, theme: &ThemeConfig, time_format: &str) {
    let [selectors, table, status] = Layout::vertical([
        Constraint::Length(SELECTOR_HEIGHT),
        Constraint::Min(TABLE_CHROME),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);
    let [team_area, year_area] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(YEAR_SELECTOR_WIDTH)]).areas(selectors);

    let selection = state.selection();
    SelectorWidget::new("Team", selection.team.as_str())
        .focused(state.focus == Focus::Team)
        .position(state.team_index(), state.teams.len())
        .render(team_area, buf, theme);
    SelectorWidget::new("Year", selection.year.to_string())
        .focused(state.focus == Focus::Year)
        .position(state.year_index(), state.years.len())
        .render(year_area, buf, theme);

    let placeholder = if state.controller.is_loading() || state.teams.is_empty() {
        "Loading..."
    } else {
        "No data"
    };
    StatsTableWidget::new(state.controller.view(), table_title(state))
        .cursor(state.table)
        .focused(state.focus == Focus::Table)
        .placeholder(placeholder)
        .render(table, buf, theme);

    let mut bar = StatusBar::new()
        .with_hints(hints())
        .with_loaded_at(state.last_loaded.map(|t| format_time(t, time_format)));
    if let Some(status) = &state.status {
        bar = if status.is_error {
            bar.with_error(status.text.as_str())
        } else {
            bar.with_status(status.text.as_str())
        };
    }
    bar.render(status, buf, theme);

    if let Some(dropdown) = &state.dropdown {
        let (options, anchor) = match dropdown.target {
            Focus::Team => (&state.teams, team_area),
            _ => (&state.years, year_area),
        };
        render_list_modal(options, dropdown.highlighted, anchor.x, anchor.bottom(), area, buf, theme);
    }
}
