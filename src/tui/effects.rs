use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::action::Action;
use crate::data_provider::DataProvider;
use crate::stats::Selection;

/// Side effects returned by the reducer
///
/// The reducer stays pure; anything that touches the provider is described
/// here and executed by the runtime.
pub enum Effect {
    None,
    Action(Action),
    Batch(Vec<Effect>),
    Async(Pin<Box<dyn Future<Output = Action> + Send>>),
    /// Load the team selector options
    LoadTeams,
    /// Fetch the weekly table for a selection
    FetchStats(Selection),
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Action(a) => f.debug_tuple("Action").field(a).finish(),
            Self::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
            Self::Async(_) => write!(f, "Async(..)"),
            Self::LoadTeams => write!(f, "LoadTeams"),
            Self::FetchStats(s) => f.debug_tuple("FetchStats").field(s).finish(),
        }
    }
}

/// Effect handler for data fetching operations
///
/// Each method returns an Effect that will dispatch the matching
/// *Loaded action when complete.
pub struct DataEffects {
    provider: Arc<DataProvider>,
}

impl DataEffects {
    pub fn new(provider: Arc<DataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the sorted team names
    pub fn load_teams(&self) -> Effect {
        let provider = self.provider.clone();
        Effect::Async(Box::pin(async move {
            let result = provider.list_teams().await;
            Action::TeamsLoaded(result.map_err(|e| e.to_string()))
        }))
    }

    /// Fetch the weekly table for `selection`, tagged with it so stale results can be told apart
    pub fn fetch_stats(&self, selection: Selection) -> Effect {
        let provider = self.provider.clone();
        Effect::Async(Box::pin(async move {
            let result = provider
                .fetch_weekly_stats(selection.year, &selection.team)
                .await;
            Action::StatsLoaded(selection, result)
        }))
    }
}
