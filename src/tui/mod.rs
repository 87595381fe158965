pub mod action;
pub mod effects;
pub mod error;
pub mod keys;
pub mod reducer;
pub mod runtime;
pub mod state;
pub mod view;
pub mod widgets;

#[cfg(test)]
pub mod testing;


pub use action::Action;
pub use effects::{DataEffects, Effect};
pub use error::{TuiError, TuiResult};
pub use keys::key_to_action;
pub use reducer::reduce;
pub use runtime::Runtime;
pub use state::AppState;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::data_provider::DataProvider;
use crate::stats::{is_valid_season, Selection, LAST_SEASON};

/// Selection shown before the team list arrives
fn initial_selection(config: &Config) -> Selection {
    let year = if is_valid_season(config.default_year) {
        config.default_year
    } else {
        tracing::warn!("CONFIG: default_year {} out of range, using {}", config.default_year, LAST_SEASON);
        LAST_SEASON
    };
    Selection::new(config.default_team.clone().unwrap_or_default(), year)
}

/// Main entry point for TUI mode
pub async fn run(provider: Arc<DataProvider>, config: Config) -> TuiResult<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, provider, &config).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    provider: Arc<DataProvider>,
    config: &Config,
) -> TuiResult<()> {
    let initial_state = AppState::new(provider.list_years(), initial_selection(config));
    let data_effects = Arc::new(DataEffects::new(provider));
    let mut runtime = Runtime::new(initial_state, data_effects);

    // Trigger initial data load
    runtime.dispatch(Action::LoadTeams);

    loop {
        // Process any actions from effects FIRST (so data loads trigger re-render)
        let actions_processed = runtime.process_actions();
        if actions_processed > 0 {
            tracing::debug!("LOOP: Processed {} actions", actions_processed);
        }

        let height = terminal.size()?.height;
        runtime.update_viewport_height(height);

        terminal.draw(|f| {
            let area = f.area();
            view::render(runtime.state(), area, f.buffer_mut(), &config.theme, &config.time_format);
        })?;

        // Re-render immediately when async data arrived
        if actions_processed > 0 {
            continue;
        }

        // Poll for keyboard events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = key_to_action(key, runtime.state()) {
                    if matches!(action, Action::Quit) {
                        tracing::debug!("ACTION: Quitting application");
                        return Ok(());
                    }
                    runtime.dispatch(action);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_selection_from_config() {
        let config = Config {
            default_team: Some("Buffalo Bills".to_string()),
            default_year: 2021,
            ..Config::default()
        };
        assert_eq!(initial_selection(&config), Selection::new("Buffalo Bills", 2021));
    }

    #[test]
    fn test_initial_selection_clamps_year() {
        let config = Config {
            default_year: 1980,
            ..Config::default()
        };
        let selection = initial_selection(&config);
        assert_eq!(selection.year, LAST_SEASON);
        assert_eq!(selection.team, "");
    }
}
