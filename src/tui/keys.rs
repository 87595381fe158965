/// Keyboard event to action mapping
///
/// Converts crossterm KeyEvents into Actions based on focus and popup state.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use super::action::{Action, TableScroll};
use super::state::{AppState, Focus};

/// Rows skipped by PageUp/PageDown inside a popup
const DROPDOWN_PAGE: isize = 10;

pub fn key_to_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    trace!("KEY: {:?} (focus={:?})", key.code, state.focus);

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    if state.dropdown.is_some() {
        return handle_dropdown_keys(key.code);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(Action::Refresh),
        KeyCode::Tab => return Some(Action::FocusNext),
        KeyCode::BackTab => return Some(Action::FocusPrevious),
        _ => {}
    }

    let action = match state.focus {
        Focus::Team => handle_selector_keys(key.code, &state.teams, state.team_index())
            .map(|team| Action::SelectTeam(team.clone())),
        Focus::Year => handle_selector_keys(key.code, &state.years, state.year_index())
            .and_then(|year| year.parse().ok())
            .map(Action::SelectYear),
        Focus::Table => handle_table_keys(key.code),
    };

    action.or_else(|| match (state.focus, key.code) {
        (Focus::Team | Focus::Year, KeyCode::Enter | KeyCode::Char(' ')) => Some(Action::OpenDropdown),
        _ => None,
    })
}

fn handle_dropdown_keys(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveDropdown(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDropdown(1)),
        KeyCode::PageUp => Some(Action::MoveDropdown(-DROPDOWN_PAGE)),
        KeyCode::PageDown => Some(Action::MoveDropdown(DROPDOWN_PAGE)),
        KeyCode::Enter => Some(Action::ConfirmDropdown),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseDropdown),
        _ => None,
    }
}

/// Left/Right step through the options; nothing past either end
fn handle_selector_keys<'a>(
    key_code: KeyCode,
    options: &'a [String],
    current: Option<usize>,
) -> Option<&'a String> {
    let delta: isize = match key_code {
        KeyCode::Left | KeyCode::Char('h') => -1,
        KeyCode::Right | KeyCode::Char('l') => 1,
        _ => return None,
    };
    let target = match current {
        Some(index) => index.checked_add_signed(delta)?,
        None => 0,
    };
    options.get(target)
}

fn handle_table_keys(key_code: KeyCode) -> Option<Action> {
    let scroll = match key_code {
        KeyCode::Up | KeyCode::Char('k') => TableScroll::Up,
        KeyCode::Down | KeyCode::Char('j') => TableScroll::Down,
        KeyCode::PageUp => TableScroll::PageUp,
        KeyCode::PageDown => TableScroll::PageDown,
        KeyCode::Home | KeyCode::Char('g') => TableScroll::Home,
        KeyCode::End | KeyCode::Char('G') => TableScroll::End,
        _ => return None,
    };
    Some(Action::ScrollTable(scroll))
}
