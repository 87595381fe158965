/// Stats source abstraction and the provider the UI talks to
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::cache::SeasonCache;
use crate::config::Config;
use crate::error::{DataError, DataResult};
use crate::stats::{is_valid_season, seasons, StatRow, StatTable, COLUMNS};
use crate::team_abbrev::TeamDirectory;

/// Columns every team description must carry
const TEAM_COLUMNS: [&str; 2] = ["team_abbr", "team_name"];

/// Team metadata as published by the provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamDescription {
    pub team_abbr: String,
    pub team_name: String,
    #[serde(default)]
    pub team_nick: String,
    #[serde(default)]
    pub team_conf: String,
    #[serde(default)]
    pub team_division: String,
}

/// External stats source, implemented by the nflverse client and the mock source
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Team descriptions, including historical and duplicate entries
    async fn team_descriptions(&self) -> DataResult<Vec<TeamDescription>>;

    /// All weekly rows of one season, restricted to `columns`
    async fn weekly_data(&self, season: u16, columns: &[&str]) -> DataResult<Vec<StatRow>>;
}

/// Fail with `Malformed` unless every column in `required` is present
fn require_columns(headers: &csv::StringRecord, required: &[&str]) -> DataResult<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::Malformed(format!("missing columns: {}", missing.join(", "))))
    }
}

/// Parse a weekly player stats CSV, keeping only `columns`
pub fn parse_weekly_csv<R: Read>(input: R, columns: &[&str]) -> DataResult<Vec<StatRow>> {
    let mut reader = csv::Reader::from_reader(input);
    require_columns(reader.headers()?, columns)?;
    let rows = reader.deserialize().collect::<Result<Vec<StatRow>, _>>()?;
    Ok(rows)
}

/// Parse the team description CSV
pub fn parse_teams_csv<R: Read>(input: R) -> DataResult<Vec<TeamDescription>> {
    let mut reader = csv::Reader::from_reader(input);
    require_columns(reader.headers()?, &TEAM_COLUMNS)?;
    let teams = reader.deserialize().collect::<Result<Vec<TeamDescription>, _>>()?;
    Ok(teams)
}

/// A zero timeout would fail every request, so it is raised to one second
fn request_timeout(secs: u64) -> Duration {
    if secs == 0 {
        warn!("CONFIG: request_timeout_secs is 0, using 1");
        return Duration::from_secs(1);
    }
    Duration::from_secs(secs)
}

/// HTTP client for the nflverse data releases
pub struct NflverseClient {
    http: reqwest::Client,
    stats_url: String,
    teams_url: String,
}

impl NflverseClient {
    /// `stats_url` must contain a `{season}` placeholder
    pub fn new(
        stats_url: impl Into<String>,
        teams_url: impl Into<String>,
        timeout: Duration,
    ) -> DataResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            stats_url: stats_url.into(),
            teams_url: teams_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> DataResult<Self> {
        Self::new(
            config.stats_url.clone(),
            config.teams_url.clone(),
            request_timeout(config.request_timeout_secs),
        )
    }

    fn season_url(&self, season: u16) -> String {
        self.stats_url.replace("{season}", &season.to_string())
    }

    /// GET `url`; `Ok(None)` when the file does not exist
    async fn get_text(&self, url: &str) -> DataResult<Option<String>> {
        debug!("HTTP: GET {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DataError::Http(format!("{} returned {}", url, status)));
        }
        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl StatsSource for NflverseClient {
    async fn team_descriptions(&self) -> DataResult<Vec<TeamDescription>> {
        let body = self
            .get_text(&self.teams_url)
            .await?
            .ok_or_else(|| DataError::Http(format!("{} not found", self.teams_url)))?;
        parse_teams_csv(body.as_bytes())
    }

    async fn weekly_data(&self, season: u16, columns: &[&str]) -> DataResult<Vec<StatRow>> {
        let body = self
            .get_text(&self.season_url(season))
            .await?
            .ok_or(DataError::NoSeasonData(season))?;
        parse_weekly_csv(body.as_bytes(), columns)
    }
}

/// What the viewer asks for: team names, years, and filtered weekly tables
pub struct DataProvider {
    source: Arc<dyn StatsSource>,
    directory: OnceCell<TeamDirectory>,
    seasons: SeasonCache,
}

impl DataProvider {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self::with_cache(source, SeasonCache::default())
    }

    pub fn with_cache(source: Arc<dyn StatsSource>, seasons: SeasonCache) -> Self {
        Self {
            source,
            directory: OnceCell::new(),
            seasons,
        }
    }

    /// Team directory, built from the source on first use
    pub async fn directory(&self) -> DataResult<&TeamDirectory> {
        self.directory
            .get_or_try_init(|| async {
                let descriptions = self.source.team_descriptions().await?;
                let directory = TeamDirectory::from_descriptions(&descriptions)?;
                info!(
                    "TEAMS: {} franchises from {} source entries",
                    directory.len(),
                    descriptions.len()
                );
                Ok::<_, DataError>(directory)
            })
            .await
    }

    /// Sorted display names of the current franchises
    pub async fn list_teams(&self) -> DataResult<Vec<String>> {
        Ok(self.directory().await?.names())
    }

    /// Selectable years, most recent first
    pub fn list_years(&self) -> Vec<String> {
        seasons().map(|s| s.to_string()).collect()
    }

    /// Weekly stats of `team` (display name) in `year`
    pub async fn fetch_weekly_stats(&self, year: u16, team: &str) -> DataResult<StatTable> {
        if !is_valid_season(year) {
            return Err(DataError::SeasonOutOfRange(year));
        }
        let abbrev = self.directory().await?.resolve(team, year)?;
        let rows = self.seasons.get_or_fetch(self.source.as_ref(), year, &COLUMNS).await?;
        let table = StatTable::for_team(abbrev, year, &rows)?;
        info!(
            "FETCH: {} {} -> {} rows ({} in season)",
            abbrev,
            year,
            table.row_count(),
            rows.len()
        );
        Ok(table)
    }

    pub fn season_cache(&self) -> &SeasonCache {
        &self.seasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::mock_source::MockSource;
    use crate::fixtures::WEEKLY_CSV_2023;

    fn create_provider() -> DataProvider {
        DataProvider::new(Arc::new(MockSource::new()))
    }

    #[test]
    fn test_list_years_exact() {
        let years = create_provider().list_years();
        let expected: Vec<String> = (1999..=2024).rev().map(|y: u16| y.to_string()).collect();
        assert_eq!(years.len(), 26);
        assert_eq!(years, expected);
        assert_eq!(years[0], "2024");
        assert_eq!(years[25], "1999");
    }

    #[tokio::test]
    async fn test_list_teams_sorted_and_canonical() {
        let teams = create_provider().list_teams().await.unwrap();
        assert_eq!(teams.len(), 32);
        assert!(teams.windows(2).all(|w| w[0] < w[1]));
        assert!(teams.contains(&"Kansas City Chiefs".to_string()));
        assert!(!teams.contains(&"Oakland Raiders".to_string()));
    }

    #[tokio::test]
    async fn test_chiefs_2023_only_kc_rows() {
        let table = create_provider()
            .fetch_weekly_stats(2023, "Kansas City Chiefs")
            .await
            .unwrap();
        assert!(table.row_count() > 0);
        assert!(table.rows().iter().all(|r| r.recent_team == "KC"));
        assert!(table.rows().iter().all(|r| r.season == 2023));
    }

    #[tokio::test]
    async fn test_relocated_team_resolves_to_former_abbrev() {
        let table = create_provider()
            .fetch_weekly_stats(2019, "Las Vegas Raiders")
            .await
            .unwrap();
        assert_eq!(table.team(), "OAK");
        assert!(table.rows().iter().all(|r| r.recent_team == "OAK"));
    }

    #[tokio::test]
    async fn test_future_year_is_rejected() {
        let err = create_provider()
            .fetch_weekly_stats(2031, "Kansas City Chiefs")
            .await
            .unwrap_err();
        assert_eq!(err, DataError::SeasonOutOfRange(2031));
    }

    #[tokio::test]
    async fn test_team_without_appearances_is_empty() {
        // Houston joined the league in 2002
        let err = create_provider()
            .fetch_weekly_stats(2001, "Houston Texans")
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::EmptyResult { .. }));
    }

    #[tokio::test]
    async fn test_unknown_team_is_unresolved() {
        let err = create_provider()
            .fetch_weekly_stats(2023, "Hartford Whalers")
            .await
            .unwrap_err();
        assert_eq!(err, DataError::UnresolvedTeam("Hartford Whalers".to_string()));
    }

    #[tokio::test]
    async fn test_season_is_fetched_once() {
        let source = Arc::new(MockSource::new());
        let provider = DataProvider::new(source.clone());
        provider.fetch_weekly_stats(2023, "Kansas City Chiefs").await.unwrap();
        provider.fetch_weekly_stats(2023, "Buffalo Bills").await.unwrap();
        assert_eq!(source.weekly_calls(), 1);
        assert_eq!(provider.season_cache().len().await, 1);
    }

    #[test]
    fn test_parse_weekly_csv_reads_fixture() {
        let rows = parse_weekly_csv(WEEKLY_CSV_2023.as_bytes(), &COLUMNS).unwrap();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.season == 2023));
    }

    #[test]
    fn test_parse_weekly_csv_missing_column_is_malformed() {
        let data = "player_name,position,recent_team,season,week\nP.Mahomes,QB,KC,2023,1\n";
        let err = parse_weekly_csv(data.as_bytes(), &COLUMNS).unwrap_err();
        assert_eq!(
            err,
            DataError::Malformed(
                "missing columns: opponent_team, completions, attempts, passing_yards, passing_tds, interceptions, sacks"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_parse_weekly_csv_bad_number_is_malformed() {
        let data = "\
player_name,position,recent_team,season,week,opponent_team,completions,attempts,passing_yards,passing_tds,interceptions,sacks
P.Mahomes,QB,KC,2023,1,DET,lots,39,226,2,1,2
";
        let err = parse_weekly_csv(data.as_bytes(), &COLUMNS).unwrap_err();
        assert!(matches!(err, DataError::Malformed(_)));
    }

    #[test]
    fn test_parse_teams_csv_keeps_all_entries() {
        let data = "\
team_abbr,team_name,team_id,team_nick,team_conf,team_division
KC,Kansas City Chiefs,2310,Chiefs,AFC,AFC West
LA,Los Angeles Rams,2510,Rams,NFC,NFC West
LAR,Los Angeles Rams,2510,Rams,NFC,NFC West
";
        let teams = parse_teams_csv(data.as_bytes()).unwrap();
        assert_eq!(teams.len(), 3);
        assert_eq!(teams[0].team_nick, "Chiefs");
        assert_eq!(teams[2].team_abbr, "LAR");
    }

    #[test]
    fn test_parse_teams_csv_requires_name() {
        let data = "team_abbr,team_nick\nKC,Chiefs\n";
        assert!(matches!(parse_teams_csv(data.as_bytes()), Err(DataError::Malformed(_))));
    }

    #[test]
    fn test_zero_request_timeout_is_raised() {
        assert_eq!(request_timeout(0), Duration::from_secs(1));
        assert_eq!(request_timeout(30), Duration::from_secs(30));
    }

    #[test]
    fn test_season_url_substitutes_placeholder() {
        let client = NflverseClient::new(
            "https://example.test/player_stats_{season}.csv",
            "https://example.test/teams.csv",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.season_url(2023), "https://example.test/player_stats_2023.csv");
    }
}
