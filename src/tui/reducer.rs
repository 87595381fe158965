use chrono::Local;
use tracing::{debug, warn};

use super::action::{Action, TableScroll};
use super::effects::Effect;
use super::state::{AppState, Dropdown, Focus};
use crate::controller::RefreshOutcome;
use crate::error::{DataError, DataResult, FailureKind};
use crate::stats::{Selection, StatTable};

/// Pure state reducer - like Redux reducer
///
/// Takes current state and an action, returns new state and an effect.
/// No I/O happens here; fetches are returned as `Effect` to be executed
/// by the runtime.
pub fn reduce(state: AppState, action: Action) -> (AppState, Effect) {
    let mut state = state;
    match action {
        Action::LoadTeams => {
            state.set_status_message("Loading teams...");
            (state, Effect::LoadTeams)
        }

        Action::TeamsLoaded(Ok(teams)) => reduce_teams_loaded(state, teams),
        Action::TeamsLoaded(Err(e)) => {
            state.set_status_error_message(format!("Could not load teams: {}", e));
            (state, Effect::None)
        }

        Action::Refresh => {
            if state.teams.is_empty() {
                return reduce(state, Action::LoadTeams);
            }
            let selection = state.controller.begin();
            request_stats(state, selection)
        }

        Action::StatsLoaded(selection, result) => reduce_stats_loaded(state, selection, result),

        Action::SelectTeam(team) => {
            state.dropdown = None;
            let selection = state.controller.select_team(team);
            request_stats(state, selection)
        }

        Action::SelectYear(year) => {
            state.dropdown = None;
            let selection = state.controller.select_year(year);
            request_stats(state, selection)
        }

        Action::FocusNext => {
            state.dropdown = None;
            state.focus = state.focus.next();
            (state, Effect::None)
        }

        Action::FocusPrevious => {
            state.dropdown = None;
            state.focus = state.focus.previous();
            (state, Effect::None)
        }

        Action::OpenDropdown => {
            let highlighted = match state.focus {
                Focus::Team if !state.teams.is_empty() => state.team_index().unwrap_or(0),
                Focus::Year if !state.years.is_empty() => state.year_index().unwrap_or(0),
                _ => return (state, Effect::None),
            };
            state.dropdown = Some(Dropdown { target: state.focus, highlighted });
            (state, Effect::None)
        }

        Action::MoveDropdown(delta) => {
            if let Some(dropdown) = state.dropdown.as_mut() {
                let len = match dropdown.target {
                    Focus::Team => state.teams.len(),
                    _ => state.years.len(),
                };
                let target = dropdown.highlighted as isize + delta;
                dropdown.highlighted = target.clamp(0, len.saturating_sub(1) as isize) as usize;
            }
            (state, Effect::None)
        }

        Action::ConfirmDropdown => {
            let Some(dropdown) = state.dropdown.take() else {
                return (state, Effect::None);
            };
            let action = match dropdown.target {
                Focus::Team => state.teams.get(dropdown.highlighted).cloned().map(Action::SelectTeam),
                _ => state
                    .years
                    .get(dropdown.highlighted)
                    .and_then(|y| y.parse().ok())
                    .map(Action::SelectYear),
            };
            match action {
                Some(action) => reduce(state, action),
                None => (state, Effect::None),
            }
        }

        Action::CloseDropdown => {
            state.dropdown = None;
            (state, Effect::None)
        }

        Action::ScrollTable(scroll) => {
            let rows = state.row_count();
            let page = state.table.viewport.max(1) as isize;
            let delta = match scroll {
                TableScroll::Up => -1,
                TableScroll::Down => 1,
                TableScroll::PageUp => -page,
                TableScroll::PageDown => page,
                TableScroll::Home => -(rows as isize),
                TableScroll::End => rows as isize,
            };
            state.table.move_by(delta, rows);
            (state, Effect::None)
        }

        Action::UpdateViewportHeight(height) => {
            state.table.viewport = height as usize;
            state.table.scroll_into_view();
            (state, Effect::None)
        }

        Action::Quit => (state, Effect::None),
    }
}

fn request_stats(mut state: AppState, selection: Selection) -> (AppState, Effect) {
    state.set_status_message(format!("Loading {}...", selection));
    (state, Effect::FetchStats(selection))
}

fn reduce_teams_loaded(mut state: AppState, teams: Vec<String>) -> (AppState, Effect) {
    debug!("TEAMS: loaded {} teams", teams.len());
    state.teams = teams;

    let current = state.selection().team.clone();
    if state.teams.contains(&current) {
        let selection = state.controller.begin();
        return request_stats(state, selection);
    }

    match state.teams.first().cloned() {
        Some(first) => {
            if !current.is_empty() {
                warn!("TEAMS: default team '{}' not in list, using {}", current, first);
            }
            reduce(state, Action::SelectTeam(first))
        }
        None => {
            state.set_status_error_message("Team list is empty");
            (state, Effect::None)
        }
    }
}

fn reduce_stats_loaded(
    mut state: AppState,
    selection: Selection,
    result: DataResult<StatTable>,
) -> (AppState, Effect) {
    match state.controller.apply(&selection, result) {
        RefreshOutcome::Bound => {
            state.table.reset();
            state.last_loaded = Some(Local::now());
            let rows = state.row_count();
            state.set_status_message(format!("{}: {} rows", selection, rows));
        }
        RefreshOutcome::Kept(e) => {
            let message = describe_failure(&selection, &e, state.controller.bound_selection());
            state.set_status_error_message(message);
        }
        RefreshOutcome::Stale => {}
    }
    (state, Effect::None)
}

fn describe_failure(selection: &Selection, error: &DataError, bound: Option<&Selection>) -> String {
    let reason = match error.kind() {
        FailureKind::Empty => "no data",
        FailureKind::Malformed => "bad data",
        FailureKind::UnresolvedTeam => "unknown team",
    };
    match bound {
        Some(bound) => format!("{} ({}): {}; showing {}", selection, reason, error, bound),
        None => format!("{} ({}): {}", selection, reason, error),
    }
}
