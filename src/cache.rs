use std::sync::Arc;

use cached::TimedSizedCache;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::data_provider::StatsSource;
use crate::error::DataResult;
use crate::stats::StatRow;

pub use cached::Cached;

/// Seasons kept in memory
pub const DEFAULT_CACHE_SIZE: usize = 4;

/// Seconds a season stays cached
pub const DEFAULT_CACHE_TTL: u64 = 3600;

/// One season's rows, filled by the first request that downloads them
type SeasonSlot = Arc<OnceCell<Arc<Vec<StatRow>>>>;

/// In-memory cache of whole-season weekly data, keyed by season
///
/// The map lock is only held to find or insert a season's slot. Downloads run
/// outside it, so a cached season is served while another one is still
/// downloading. Requests for a season already in flight wait on the same
/// slot and share one download. Failed downloads leave nothing behind.
pub struct SeasonCache {
    inner: Mutex<TimedSizedCache<u16, SeasonSlot>>,
}

impl SeasonCache {
    pub fn new(size: usize, lifespan_secs: u64) -> Self {
        Self {
            inner: Mutex::new(TimedSizedCache::with_size_and_lifespan(size, lifespan_secs)),
        }
    }

    async fn slot(&self, season: u16) -> SeasonSlot {
        let mut cache = self.inner.lock().await;
        if let Some(slot) = cache.cache_get(&season) {
            if slot.initialized() {
                debug!("CACHE: hit for season {}", season);
            } else {
                debug!("CACHE: season {} already downloading", season);
            }
            return Arc::clone(slot);
        }

        debug!("CACHE: miss for season {}", season);
        let slot = SeasonSlot::default();
        cache.cache_set(season, Arc::clone(&slot));
        slot
    }

    pub async fn get_or_fetch(
        &self,
        source: &dyn StatsSource,
        season: u16,
        columns: &[&str],
    ) -> DataResult<Arc<Vec<StatRow>>> {
        let slot = self.slot(season).await;
        let result = slot
            .get_or_try_init(|| async { source.weekly_data(season, columns).await.map(Arc::new) })
            .await;

        match result {
            Ok(rows) => Ok(Arc::clone(rows)),
            Err(e) => {
                let mut cache = self.inner.lock().await;
                if cache.cache_get(&season).is_some_and(|s| Arc::ptr_eq(s, &slot)) {
                    cache.cache_remove(&season);
                }
                Err(e)
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.cache_size()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SeasonCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use async_trait::async_trait;

    use crate::data_provider::TeamDescription;
    use crate::dev::mock_source::MockSource;
    use crate::error::DataError;
    use crate::stats::COLUMNS;

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let source = MockSource::new();
        let cache = SeasonCache::default();

        let first = cache.get_or_fetch(&source, 2023, &COLUMNS).await.unwrap();
        let second = cache.get_or_fetch(&source, 2023, &COLUMNS).await.unwrap();

        assert_eq!(source.weekly_calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = MockSource::new();
        source.remove_season(2023);
        let cache = SeasonCache::default();

        let result = cache.get_or_fetch(&source, 2023, &COLUMNS).await;
        assert_eq!(result.unwrap_err(), DataError::NoSeasonData(2023));
        assert!(cache.is_empty().await);

        let _ = cache.get_or_fetch(&source, 2023, &COLUMNS).await;
        assert_eq!(source.weekly_calls(), 2);
    }

    #[tokio::test]
    async fn test_size_bound_evicts_oldest() {
        let source = MockSource::new();
        let cache = SeasonCache::new(2, 60);

        for season in [2021, 2022, 2023] {
            cache.get_or_fetch(&source, season, &COLUMNS).await.unwrap();
        }
        assert_eq!(cache.len().await, 2);
    }

    /// Mock source that takes a while to answer for one season
    struct SlowSource {
        inner: MockSource,
        slow_season: u16,
        delay: Duration,
    }

    #[async_trait]
    impl StatsSource for SlowSource {
        async fn team_descriptions(&self) -> DataResult<Vec<TeamDescription>> {
            self.inner.team_descriptions().await
        }

        async fn weekly_data(&self, season: u16, columns: &[&str]) -> DataResult<Vec<StatRow>> {
            if season == self.slow_season {
                tokio::time::sleep(self.delay).await;
            }
            self.inner.weekly_data(season, columns).await
        }
    }

    fn slow_2019() -> Arc<SlowSource> {
        Arc::new(SlowSource {
            inner: MockSource::new(),
            slow_season: 2019,
            delay: Duration::from_millis(500),
        })
    }

    #[tokio::test]
    async fn test_cached_season_served_during_other_download() {
        let source = slow_2019();
        let cache = Arc::new(SeasonCache::default());
        cache.get_or_fetch(source.as_ref(), 2023, &COLUMNS).await.unwrap();

        let download = {
            let (source, cache) = (Arc::clone(&source), Arc::clone(&cache));
            tokio::spawn(async move { cache.get_or_fetch(source.as_ref(), 2019, &COLUMNS).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let started = Instant::now();
        cache.get_or_fetch(source.as_ref(), 2023, &COLUMNS).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(200));

        assert!(download.await.unwrap().is_ok());
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_download() {
        let source = slow_2019();
        let cache = Arc::new(SeasonCache::default());

        let requests: Vec<_> = (0..3)
            .map(|_| {
                let (source, cache) = (Arc::clone(&source), Arc::clone(&cache));
                tokio::spawn(async move { cache.get_or_fetch(source.as_ref(), 2019, &COLUMNS).await })
            })
            .collect();
        let mut results = Vec::new();
        for request in requests {
            results.push(request.await.unwrap().unwrap());
        }

        assert_eq!(source.inner.weekly_calls(), 1);
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
