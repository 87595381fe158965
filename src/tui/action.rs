use crate::error::DataError;
use crate::stats::{Selection, StatTable};

/// Global actions - like Redux actions
///
/// All state changes in the application happen through actions.
/// Actions are dispatched from:
/// - User input (key events)
/// - Effects (async data loading)
#[derive(Debug, Clone)]
pub enum Action {
    // Data actions
    LoadTeams,
    Refresh,

    // Data loaded (from effects)
    TeamsLoaded(Result<Vec<String>, String>),
    StatsLoaded(Selection, Result<StatTable, DataError>),

    // Selection actions
    SelectTeam(String),
    SelectYear(u16),

    // Focus and popup actions
    FocusNext,
    FocusPrevious,
    OpenDropdown,
    MoveDropdown(isize),
    ConfirmDropdown,
    CloseDropdown,

    // Table actions
    ScrollTable(TableScroll),
    UpdateViewportHeight(u16),

    // System actions
    Quit,
}

/// Table navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableScroll {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

impl Action {
    /// Returns true if this action should trigger a re-render
    pub fn should_render(&self) -> bool {
        !matches!(self, Self::Quit | Self::UpdateViewportHeight(_))
    }
}
