use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::action::Action;
use super::effects::{DataEffects, Effect};
use super::reducer::reduce;
use super::state::AppState;

/// Runtime - owns the state and executes effects
///
/// The Runtime is responsible for:
/// - Managing the application state
/// - Dispatching actions through the reducer
/// - Executing side effects asynchronously
pub struct Runtime {
    /// Current application state
    state: AppState,

    /// Channel for dispatching actions
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    /// Channel for queuing effects
    effect_tx: mpsc::UnboundedSender<Effect>,

    /// Data effects handler
    data_effects: Arc<DataEffects>,
}

impl Runtime {
    /// Create a new runtime with initial state and data effects handler
    pub fn new(initial_state: AppState, data_effects: Arc<DataEffects>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (effect_tx, mut effect_rx) = mpsc::unbounded_channel();

        // Spawn effect executor task
        let action_tx_clone = action_tx.clone();
        tokio::spawn(async move {
            Self::run_effect_executor(&mut effect_rx, action_tx_clone).await;
        });

        Self {
            state: initial_state,
            action_tx,
            action_rx,
            effect_tx,
            data_effects,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Dispatch an action to be processed by the reducer
    ///
    /// Uses mem::take to avoid cloning AppState.
    pub fn dispatch(&mut self, action: Action) {
        trace!("ACTION: Dispatching {:?}", action);

        let state = std::mem::take(&mut self.state);
        let (new_state, effect) = reduce(state, action);
        self.state = new_state;

        self.execute_effect(effect);
    }

    /// Turn fetch effects into async ones and queue them
    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::LoadTeams => {
                debug!("EFFECT: Executing team list fetch");
                let _ = self.effect_tx.send(self.data_effects.load_teams());
            }
            Effect::FetchStats(selection) => {
                debug!("EFFECT: Executing stats fetch for {}", selection);
                let _ = self.effect_tx.send(self.data_effects.fetch_stats(selection));
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.execute_effect(e);
                }
            }
            Effect::Action(_) | Effect::Async(_) => {
                trace!("ACTION: Queueing effect for async execution");
                let _ = self.effect_tx.send(effect);
            }
        }
    }

    /// Process all pending actions in the queue
    ///
    /// Returns the number of actions processed
    pub fn process_actions(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            count += 1;
        }
        count
    }

    /// Get a sender for dispatching actions from external sources
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Update the table viewport from the terminal height
    ///
    /// Called from the main render loop; dispatches only on change.
    pub fn update_viewport_height(&mut self, terminal_height: u16) {
        let height = super::view::table_viewport_height(terminal_height);
        if height as usize != self.state.table.viewport {
            debug!("DRAW: table viewport {} -> {}", self.state.table.viewport, height);
            self.dispatch(Action::UpdateViewportHeight(height));
        }
    }

    /// Runs in a separate tokio task; effects feed actions back into the runtime
    async fn run_effect_executor(
        effect_rx: &mut mpsc::UnboundedReceiver<Effect>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) {
        while let Some(effect) = effect_rx.recv().await {
            Self::process_effect_async(effect, &action_tx);
        }
    }

    fn process_effect_async(effect: Effect, action_tx: &mpsc::UnboundedSender<Action>) {
        match effect {
            Effect::None => {}
            Effect::Action(action) => {
                let _ = action_tx.send(action);
            }
            Effect::Batch(effects) => {
                for e in effects {
                    Self::process_effect_async(e, action_tx);
                }
            }
            Effect::Async(future) => {
                // Each fetch runs on its own task so a slow season does not block the next request
                let action_tx = action_tx.clone();
                tokio::spawn(async move {
                    let action = future.await;
                    let _ = action_tx.send(action);
                });
            }
            Effect::LoadTeams | Effect::FetchStats(_) => {
                tracing::warn!("Fetch effect reached async executor without conversion");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::action::TableScroll;
    use crate::tui::state::Focus;
    use crate::tui::testing::{create_provider, settle};

    fn create_test_runtime() -> Runtime {
        let data_effects = Arc::new(DataEffects::new(create_provider()));
        Runtime::new(AppState::default(), data_effects)
    }

    #[tokio::test]
    async fn test_runtime_initial_state() {
        let runtime = create_test_runtime();
        assert!(runtime.state().teams.is_empty());
        assert_eq!(runtime.state().focus, Focus::Team);
    }

    #[tokio::test]
    async fn test_dispatch_action() {
        let mut runtime = create_test_runtime();
        runtime.dispatch(Action::FocusNext);
        assert_eq!(runtime.state().focus, Focus::Year);
    }

    #[tokio::test]
    async fn test_action_queue() {
        let mut runtime = create_test_runtime();
        let tx = runtime.action_sender();
        tx.send(Action::FocusNext).unwrap();
        tx.send(Action::FocusNext).unwrap();

        assert_eq!(runtime.process_actions(), 2);
        assert_eq!(runtime.state().focus, Focus::Table);
    }

    #[tokio::test]
    async fn test_effect_action_is_fed_back() {
        let mut runtime = create_test_runtime();
        runtime.execute_effect(Effect::Action(Action::FocusPrevious));
        settle(&mut runtime).await;
        assert_eq!(runtime.state().focus, Focus::Table);
    }

    #[tokio::test]
    async fn test_load_teams_binds_first_table() {
        let mut runtime = create_test_runtime();
        runtime.dispatch(Action::LoadTeams);
        settle(&mut runtime).await;

        let state = runtime.state();
        assert_eq!(state.teams.len(), 32);
        assert_eq!(state.selection().team, "Arizona Cardinals");
        assert!(state.controller.view().is_some());
        assert!(!state.controller.is_loading());
    }

    #[tokio::test]
    async fn test_viewport_update_dispatches_on_change() {
        let mut runtime = create_test_runtime();
        runtime.update_viewport_height(30);
        let viewport = runtime.state().table.viewport;
        assert!(viewport > 0);

        runtime.update_viewport_height(30);
        assert_eq!(runtime.state().table.viewport, viewport);

        runtime.dispatch(Action::ScrollTable(TableScroll::Down));
        assert_eq!(runtime.state().table.selected, 0);
    }
}
