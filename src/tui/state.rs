use chrono::{DateTime, Local};

use crate::controller::SelectionController;
use crate::stats::{seasons, Selection, LAST_SEASON};

/// Root application state - single source of truth
///
/// All state changes happen through the reducer. The selection and the bound
/// table live in the controller; everything else here is presentation.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Team selector options (display names, sorted)
    pub teams: Vec<String>,
    /// Year selector options, most recent first
    pub years: Vec<String>,
    pub controller: SelectionController,
    pub focus: Focus,
    /// Open selector popup, if any
    pub dropdown: Option<Dropdown>,
    pub table: TableCursor,
    pub status: Option<StatusMessage>,
    /// When the bound table was loaded
    pub last_loaded: Option<DateTime<Local>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            seasons().map(|s| s.to_string()).collect(),
            Selection::new(String::new(), LAST_SEASON),
        )
    }
}

impl AppState {
    pub fn new(years: Vec<String>, initial: Selection) -> Self {
        Self {
            teams: Vec::new(),
            years,
            controller: SelectionController::new(initial),
            focus: Focus::Team,
            dropdown: None,
            table: TableCursor::default(),
            status: None,
            last_loaded: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        self.controller.selection()
    }

    /// Position of the selected team in the team list
    pub fn team_index(&self) -> Option<usize> {
        let team = &self.selection().team;
        self.teams.iter().position(|t| t == team)
    }

    /// Position of the selected year in the year list
    pub fn year_index(&self) -> Option<usize> {
        let year = self.selection().year.to_string();
        self.years.iter().position(|y| *y == year)
    }

    /// Rows in the bound table, 0 when nothing is bound
    pub fn row_count(&self) -> usize {
        self.controller.view().map(|v| v.row_count()).unwrap_or(0)
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage { text: message.into(), is_error: false });
    }

    pub fn set_status_error_message(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage { text: message.into(), is_error: true });
    }
}

/// Which widget receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Team,
    Year,
    Table,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Team => Self::Year,
            Self::Year => Self::Table,
            Self::Table => Self::Team,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Team => Self::Table,
            Self::Year => Self::Team,
            Self::Table => Self::Year,
        }
    }
}

/// Open selector popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    /// Selector the popup belongs to
    pub target: Focus,
    /// Highlighted option
    pub highlighted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Selected row and scroll offset of the stats table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCursor {
    pub selected: usize,
    pub offset: usize,
    /// Visible data rows, set from the render loop
    pub viewport: usize,
}

impl TableCursor {
    /// Move the selection by `delta` rows within `rows`, keeping it visible
    pub fn move_by(&mut self, delta: isize, rows: usize) {
        if rows == 0 {
            *self = Self { viewport: self.viewport, ..Self::default() };
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, rows as isize - 1) as usize;
        self.scroll_into_view();
    }

    pub fn scroll_into_view(&mut self) {
        let viewport = self.viewport.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + viewport {
            self.offset = self.selected + 1 - viewport;
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Team.next(), Focus::Year);
        assert_eq!(Focus::Table.next(), Focus::Team);
        assert_eq!(Focus::Team.previous(), Focus::Table);
        assert_eq!(Focus::Year.previous().next(), Focus::Year);
    }

    #[test]
    fn test_default_state_has_years_and_no_teams() {
        let state = AppState::default();
        assert_eq!(state.years.len(), 26);
        assert!(state.teams.is_empty());
        assert_eq!(state.year_index(), Some(0));
        assert_eq!(state.team_index(), None);
        assert_eq!(state.row_count(), 0);
    }

    #[test]
    fn test_cursor_scrolls_with_selection() {
        let mut cursor = TableCursor { viewport: 5, ..Default::default() };
        cursor.move_by(7, 20);
        assert_eq!(cursor.selected, 7);
        assert_eq!(cursor.offset, 3);

        cursor.move_by(-6, 20);
        assert_eq!(cursor.selected, 1);
        assert_eq!(cursor.offset, 1);
    }

    #[test]
    fn test_cursor_clamps_to_rows() {
        let mut cursor = TableCursor { viewport: 10, ..Default::default() };
        cursor.move_by(100, 4);
        assert_eq!(cursor.selected, 3);
        cursor.move_by(-100, 4);
        assert_eq!(cursor.selected, 0);
        cursor.move_by(1, 0);
        assert_eq!(cursor.selected, 0);
        assert_eq!(cursor.viewport, 10);
    }
}
