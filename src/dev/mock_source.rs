/// Mock stats source for development and testing
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::data_provider::{StatsSource, TeamDescription};
use crate::error::{DataError, DataResult};
use crate::fixtures;
use crate::stats::StatRow;

/// Stats source that returns fixture data instead of making HTTP requests
#[derive(Default)]
pub struct MockSource {
    weekly_calls: AtomicUsize,
    /// Seasons answered with "no data", as the provider does for unpublished years
    missing_seasons: Mutex<HashSet<u16>>,
}

impl MockSource {
    pub fn new() -> Self {
        info!("Creating MockSource for development mode");
        Self::default()
    }

    /// Answer `season` with `NoSeasonData` from now on
    pub fn remove_season(&self, season: u16) {
        if let Ok(mut missing) = self.missing_seasons.lock() {
            missing.insert(season);
        }
    }

    /// Number of weekly data requests served
    pub fn weekly_calls(&self) -> usize {
        self.weekly_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsSource for MockSource {
    async fn team_descriptions(&self) -> DataResult<Vec<TeamDescription>> {
        info!("MockSource: Returning mock team descriptions");
        Ok(fixtures::create_mock_team_descriptions())
    }

    async fn weekly_data(&self, season: u16, _columns: &[&str]) -> DataResult<Vec<StatRow>> {
        self.weekly_calls.fetch_add(1, Ordering::SeqCst);
        let missing = self
            .missing_seasons
            .lock()
            .map(|m| m.contains(&season))
            .unwrap_or(false);
        if missing {
            return Err(DataError::NoSeasonData(season));
        }
        info!("MockSource: Returning mock weekly data for {}", season);
        Ok(fixtures::create_mock_weekly_data(season))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::COLUMNS;

    #[tokio::test]
    async fn test_weekly_calls_are_counted() {
        let source = MockSource::new();
        source.weekly_data(2023, &COLUMNS).await.unwrap();
        source.weekly_data(2022, &COLUMNS).await.unwrap();
        assert_eq!(source.weekly_calls(), 2);
    }

    #[tokio::test]
    async fn test_removed_season_has_no_data() {
        let source = MockSource::new();
        source.remove_season(2023);
        assert_eq!(
            source.weekly_data(2023, &COLUMNS).await,
            Err(DataError::NoSeasonData(2023))
        );
        assert!(source.weekly_data(2022, &COLUMNS).await.is_ok());
    }
}
