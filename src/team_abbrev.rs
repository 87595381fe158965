//! Team display name <-> abbreviation mapping
//!
//! The provider's team list mixes current franchises with historical and
//! duplicate entries (`OAK`, `SD`, `STL`, `LAR`). Everything here is keyed by
//! the abbreviation the weekly data uses for the current franchise, so the
//! order of the upstream list never matters.

use std::collections::{BTreeMap, HashSet};

use phf::phf_map;

use crate::data_provider::TeamDescription;
use crate::error::{DataError, DataResult};

/// Current franchises keyed by weekly-data abbreviation
static FRANCHISES: phf::Map<&'static str, &'static str> = phf_map! {
    "ARI" => "Arizona Cardinals",
    "ATL" => "Atlanta Falcons",
    "BAL" => "Baltimore Ravens",
    "BUF" => "Buffalo Bills",
    "CAR" => "Carolina Panthers",
    "CHI" => "Chicago Bears",
    "CIN" => "Cincinnati Bengals",
    "CLE" => "Cleveland Browns",
    "DAL" => "Dallas Cowboys",
    "DEN" => "Denver Broncos",
    "DET" => "Detroit Lions",
    "GB" => "Green Bay Packers",
    "HOU" => "Houston Texans",
    "IND" => "Indianapolis Colts",
    "JAX" => "Jacksonville Jaguars",
    "KC" => "Kansas City Chiefs",
    "LA" => "Los Angeles Rams",
    "LAC" => "Los Angeles Chargers",
    "LV" => "Las Vegas Raiders",
    "MIA" => "Miami Dolphins",
    "MIN" => "Minnesota Vikings",
    "NE" => "New England Patriots",
    "NO" => "New Orleans Saints",
    "NYG" => "New York Giants",
    "NYJ" => "New York Jets",
    "PHI" => "Philadelphia Eagles",
    "PIT" => "Pittsburgh Steelers",
    "SEA" => "Seattle Seahawks",
    "SF" => "San Francisco 49ers",
    "TB" => "Tampa Bay Buccaneers",
    "TEN" => "Tennessee Titans",
    "WAS" => "Washington Commanders",
};

/// Relocations: (current abbreviation, former abbreviation, last season under the former one)
const RELOCATIONS: &[(&str, &str, u16)] = &[
    ("LV", "OAK", 2019),
    ("LAC", "SD", 2016),
    ("LA", "STL", 2015),
];

/// True for abbreviations of current franchises
pub fn is_canonical(abbrev: &str) -> bool {
    FRANCHISES.contains_key(abbrev)
}

/// Abbreviation a franchise appears under in a given season's weekly data
pub fn abbrev_for_season(abbrev: &'static str, season: u16) -> &'static str {
    RELOCATIONS
        .iter()
        .find(|(current, _, last)| *current == abbrev && season <= *last)
        .map(|(_, former, _)| *former)
        .unwrap_or(abbrev)
}

/// Display name -> canonical abbreviation, validated against the provider
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    by_name: BTreeMap<String, &'static str>,
}

impl TeamDirectory {
    /// Build the directory from the provider's team descriptions
    ///
    /// Fails if any current franchise is missing from the source, or if two
    /// franchises share a display name.
    pub fn from_descriptions(descriptions: &[TeamDescription]) -> DataResult<Self> {
        let ids: HashSet<&str> = descriptions.iter().map(|d| d.team_abbr.as_str()).collect();

        let mut missing: Vec<&str> = FRANCHISES
            .keys()
            .copied()
            .filter(|abbrev| !ids.contains(abbrev))
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(DataError::UnresolvedTeam(format!(
                "team list has no entry for {}",
                missing.join(", ")
            )));
        }

        let mut by_name = BTreeMap::new();
        for desc in descriptions {
            let Some((abbrev, _)) = FRANCHISES.get_entry(desc.team_abbr.as_str()) else {
                continue;
            };
            if let Some(other) = by_name.insert(desc.team_name.clone(), *abbrev) {
                if other != *abbrev {
                    return Err(DataError::UnresolvedTeam(format!(
                        "{} is listed for both {} and {}",
                        desc.team_name, other, abbrev
                    )));
                }
            }
        }

        Ok(Self { by_name })
    }

    /// Display names, sorted
    pub fn names(&self) -> Vec<String> {
        self.by_name.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Current abbreviation for a display name
    pub fn abbrev(&self, name: &str) -> Option<&'static str> {
        self.by_name.get(name).copied()
    }

    /// Abbreviation `name` appears under in `season`'s weekly data
    pub fn resolve(&self, name: &str, season: u16) -> DataResult<&'static str> {
        self.abbrev(name)
            .map(|abbrev| abbrev_for_season(abbrev, season))
            .ok_or_else(|| DataError::UnresolvedTeam(name.to_string()))
    }
}
