//! Selection-driven refresh of the bound table
//!
//! The controller owns the current [`Selection`] and the table bound to the
//! view. A result is bound only when it answers the latest request and is a
//! valid table; anything else leaves the previous table in place.

use tracing::{debug, info, warn};

use crate::data_provider::DataProvider;
use crate::error::{DataError, DataResult};
use crate::stats::{Selection, StatTable};
use crate::table_model::TableViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No table bound yet
    Initialized,
    /// A table is bound
    Ready,
}

/// What [`SelectionController::apply`] did with a result
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The result was bound
    Bound,
    /// The result was rejected, the previous table stays
    Kept(DataError),
    /// The result answers an older request and was ignored
    Stale,
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    selection: Selection,
    pending: Option<Selection>,
    bound: Option<(Selection, TableViewModel)>,
    last_error: Option<DataError>,
}

impl SelectionController {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            pending: None,
            bound: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        if self.bound.is_some() {
            ControllerState::Ready
        } else {
            ControllerState::Initialized
        }
    }

    /// Latest selection made by the user
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selection the bound table was fetched for
    pub fn bound_selection(&self) -> Option<&Selection> {
        self.bound.as_ref().map(|(s, _)| s)
    }

    pub fn view(&self) -> Option<&TableViewModel> {
        self.bound.as_ref().map(|(_, v)| v)
    }

    /// Selection whose fetch is in flight
    pub fn pending(&self) -> Option<&Selection> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Error of the most recent rejected result, cleared by the next bind
    pub fn last_error(&self) -> Option<&DataError> {
        self.last_error.as_ref()
    }

    pub fn select_team(&mut self, team: impl Into<String>) -> Selection {
        self.selection.team = team.into();
        self.begin()
    }

    pub fn select_year(&mut self, year: u16) -> Selection {
        self.selection.year = year;
        self.begin()
    }

    /// Mark the current selection as requested and return it for fetching
    pub fn begin(&mut self) -> Selection {
        debug!("SELECTION: requesting {}", self.selection);
        self.pending = Some(self.selection.clone());
        self.selection.clone()
    }

    /// Bind `result` if it answers the pending request
    pub fn apply(&mut self, selection: &Selection, result: DataResult<StatTable>) -> RefreshOutcome {
        if self.pending.as_ref() != Some(selection) {
            debug!("SELECTION: ignoring stale result for {}", selection);
            return RefreshOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(table) => {
                info!("SELECTION: bound {} ({} rows)", selection, table.row_count());
                self.bound = Some((selection.clone(), TableViewModel::new(table)));
                self.last_error = None;
                RefreshOutcome::Bound
            }
            Err(e) => {
                match self.bound_selection() {
                    Some(prev) => warn!("SELECTION: {} failed ({}), keeping {}", selection, e, prev),
                    None => warn!("SELECTION: {} failed ({}), nothing bound", selection, e),
                }
                self.last_error = Some(e.clone());
                RefreshOutcome::Kept(e)
            }
        }
    }

    /// Fetch the current selection and bind it
    pub async fn refresh(&mut self, provider: &DataProvider) -> RefreshOutcome {
        let selection = self.begin();
        let result = provider.fetch_weekly_stats(selection.year, &selection.team).await;
        self.apply(&selection, result)
    }
}
