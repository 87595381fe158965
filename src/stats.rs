//! Weekly player statistics: rows, the filtered table, and the selection
//! that produces it.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::{DataError, DataResult};

/// First season the provider publishes weekly data for
pub const FIRST_SEASON: u16 = 1999;

/// Last season offered in the year selector
pub const LAST_SEASON: u16 = 2024;

/// Columns requested from the provider, in display order
pub const COLUMNS: [&str; 12] = [
    "player_name",
    "position",
    "recent_team",
    "season",
    "week",
    "opponent_team",
    "completions",
    "attempts",
    "passing_yards",
    "passing_tds",
    "interceptions",
    "sacks",
];

/// Index of `recent_team` in [`COLUMNS`]
pub const TEAM_COLUMN: usize = 2;

/// Seasons offered for selection, most recent first
pub fn seasons() -> impl Iterator<Item = u16> {
    (FIRST_SEASON..=LAST_SEASON).rev()
}

pub fn is_valid_season(season: u16) -> bool {
    (FIRST_SEASON..=LAST_SEASON).contains(&season)
}

/// One player's line for one week
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatRow {
    pub player_name: String,
    pub position: String,
    pub recent_team: String,
    pub season: u16,
    pub week: u8,
    pub opponent_team: String,
    #[serde(deserialize_with = "de_count")]
    pub completions: u32,
    #[serde(deserialize_with = "de_count")]
    pub attempts: u32,
    #[serde(deserialize_with = "de_stat")]
    pub passing_yards: f64,
    #[serde(deserialize_with = "de_count")]
    pub passing_tds: u32,
    #[serde(deserialize_with = "de_count")]
    pub interceptions: u32,
    #[serde(deserialize_with = "de_stat")]
    pub sacks: f64,
}

impl StatRow {
    /// Stringified value of column `col` (see [`COLUMNS`])
    pub fn value(&self, col: usize) -> Option<String> {
        let v = match col {
            0 => self.player_name.clone(),
            1 => self.position.clone(),
            2 => self.recent_team.clone(),
            3 => self.season.to_string(),
            4 => self.week.to_string(),
            5 => self.opponent_team.clone(),
            6 => self.completions.to_string(),
            7 => self.attempts.to_string(),
            8 => self.passing_yards.to_string(),
            9 => self.passing_tds.to_string(),
            10 => self.interceptions.to_string(),
            11 => self.sacks.to_string(),
            _ => return None,
        };
        Some(v)
    }
}

/// Parse an optional numeric cell. Empty and `NA` read as zero.
fn parse_stat(raw: Option<String>) -> Result<f64, String> {
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("NA") => Ok(0.0),
        Some(s) => s.parse::<f64>().map_err(|_| format!("invalid number: {}", s)),
    }
}

fn de_stat<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    parse_stat(raw).map_err(serde::de::Error::custom)
}

/// Counting stats are published as floats ("3.0") in some seasons
fn de_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let v = parse_stat(raw).map_err(serde::de::Error::custom)?;
    Ok(v.max(0.0).round() as u32)
}

/// Weekly stats for one team in one season
///
/// Never empty: construction from zero rows fails, so an empty fetch can't
/// replace a table that is already on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    team: String,
    season: u16,
    rows: Vec<StatRow>,
}

impl StatTable {
    pub fn new(team: impl Into<String>, season: u16, rows: Vec<StatRow>) -> DataResult<Self> {
        let team = team.into();
        if rows.is_empty() {
            return Err(DataError::EmptyResult { team, season });
        }
        Ok(Self { team, season, rows })
    }

    /// Keep the rows of `season` whose `recent_team` is `team`
    pub fn for_team(team: &str, season: u16, rows: &[StatRow]) -> DataResult<Self> {
        let kept = rows
            .iter()
            .filter(|r| r.recent_team == team && r.season == season)
            .cloned()
            .collect();
        Self::new(team, season, kept)
    }

    /// Team abbreviation the table was filtered on
    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn season(&self) -> u16 {
        self.season
    }

    pub fn rows(&self) -> &[StatRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row: usize) -> Option<&StatRow> {
        self.rows.get(row)
    }
}

/// The (team, year) pair driving what is displayed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Team display name, e.g. "Kansas City Chiefs"
    pub team: String,
    pub year: u16,
}

impl Selection {
    pub fn new(team: impl Into<String>, year: u16) -> Self {
        Self { team: team.into(), year }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.team, self.year)
    }
}
