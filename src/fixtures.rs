/// Mock fixture data for testing and development
///
/// Deterministic data used by:
/// 1. Unit and integration tests
/// 2. The `development` mock source (run the viewer without network access)
/// 3. Benchmarks
///
/// The team list mirrors the provider's: 32 current franchises plus the
/// historical and duplicate entries it also publishes.
use crate::data_provider::TeamDescription;
use crate::stats::StatRow;
use crate::team_abbrev::abbrev_for_season;

/// (abbr, name, nick, conference, division), in provider order
const TEAMS: &[(&str, &str, &str, &str, &str)] = &[
    ("ARI", "Arizona Cardinals", "Cardinals", "NFC", "NFC West"),
    ("ATL", "Atlanta Falcons", "Falcons", "NFC", "NFC South"),
    ("BAL", "Baltimore Ravens", "Ravens", "AFC", "AFC North"),
    ("BUF", "Buffalo Bills", "Bills", "AFC", "AFC East"),
    ("CAR", "Carolina Panthers", "Panthers", "NFC", "NFC South"),
    ("CHI", "Chicago Bears", "Bears", "NFC", "NFC North"),
    ("CIN", "Cincinnati Bengals", "Bengals", "AFC", "AFC North"),
    ("CLE", "Cleveland Browns", "Browns", "AFC", "AFC North"),
    ("DAL", "Dallas Cowboys", "Cowboys", "NFC", "NFC East"),
    ("DEN", "Denver Broncos", "Broncos", "AFC", "AFC West"),
    ("DET", "Detroit Lions", "Lions", "NFC", "NFC North"),
    ("GB", "Green Bay Packers", "Packers", "NFC", "NFC North"),
    ("HOU", "Houston Texans", "Texans", "AFC", "AFC South"),
    ("IND", "Indianapolis Colts", "Colts", "AFC", "AFC South"),
    ("JAX", "Jacksonville Jaguars", "Jaguars", "AFC", "AFC South"),
    ("KC", "Kansas City Chiefs", "Chiefs", "AFC", "AFC West"),
    ("LA", "Los Angeles Rams", "Rams", "NFC", "NFC West"),
    ("LAC", "Los Angeles Chargers", "Chargers", "AFC", "AFC West"),
    ("LV", "Las Vegas Raiders", "Raiders", "AFC", "AFC West"),
    ("MIA", "Miami Dolphins", "Dolphins", "AFC", "AFC East"),
    ("MIN", "Minnesota Vikings", "Vikings", "NFC", "NFC North"),
    ("NE", "New England Patriots", "Patriots", "AFC", "AFC East"),
    ("NO", "New Orleans Saints", "Saints", "NFC", "NFC South"),
    ("NYG", "New York Giants", "Giants", "NFC", "NFC East"),
    ("NYJ", "New York Jets", "Jets", "AFC", "AFC East"),
    ("OAK", "Oakland Raiders", "Raiders", "AFC", "AFC West"),
    ("PHI", "Philadelphia Eagles", "Eagles", "NFC", "NFC East"),
    ("PIT", "Pittsburgh Steelers", "Steelers", "AFC", "AFC North"),
    ("SD", "San Diego Chargers", "Chargers", "AFC", "AFC West"),
    ("SEA", "Seattle Seahawks", "Seahawks", "NFC", "NFC West"),
    ("SF", "San Francisco 49ers", "49ers", "NFC", "NFC West"),
    ("STL", "St. Louis Rams", "Rams", "NFC", "NFC West"),
    ("TB", "Tampa Bay Buccaneers", "Buccaneers", "NFC", "NFC South"),
    ("TEN", "Tennessee Titans", "Titans", "AFC", "AFC South"),
    ("WAS", "Washington Commanders", "Commanders", "NFC", "NFC East"),
    ("LAR", "Los Angeles Rams", "Rams", "NFC", "NFC West"),
];

/// Franchises that started after 1999, with their first season
const FIRST_SEASONS: &[(&str, u16)] = &[("HOU", 2002)];

/// Weeks generated per season
pub const MOCK_WEEKS: u8 = 3;

/// A small slice of the real 2023 weekly file
pub const WEEKLY_CSV_2023: &str = "\
player_id,player_name,player_display_name,position,position_group,recent_team,season,week,season_type,opponent_team,completions,attempts,passing_yards,passing_tds,interceptions,sacks,sack_yards,fantasy_points
00-0033873,P.Mahomes,Patrick Mahomes,QB,QB,KC,2023,1,REG,DET,21,39,226.0,2,1,2.0,14.0,16.94
00-0033873,P.Mahomes,Patrick Mahomes,QB,QB,KC,2023,2,REG,JAX,29,41,305.0,2,1,3.0,20.0,22.1
00-0030506,T.Kelce,Travis Kelce,TE,TE,KC,2023,3,REG,CHI,0,0,0.0,0,0,0.0,0.0,20.9
00-0034857,J.Allen,Josh Allen,QB,QB,BUF,2023,1,REG,NYJ,29,40,236.0,1,3,5.0,29.0,16.84
00-0034857,J.Allen,Josh Allen,QB,QB,BUF,2023,2,REG,LV,31,37,274.0,3,0,0.0,0.0,25.86
00-0036945,J.Love,Jordan Love,QB,QB,GB,2023,1,REG,CHI,15,27,245.0,3,0,0.0,0.0,23.8
";

/// Provider team descriptions, including `OAK`, `SD`, `STL` and `LAR`
pub fn create_mock_team_descriptions() -> Vec<TeamDescription> {
    TEAMS
        .iter()
        .map(|(abbr, name, nick, conf, division)| TeamDescription {
            team_abbr: abbr.to_string(),
            team_name: name.to_string(),
            team_nick: nick.to_string(),
            team_conf: conf.to_string(),
            team_division: division.to_string(),
        })
        .collect()
}

/// A row with zeroed stats
pub fn stat_row(
    player: &str,
    position: &str,
    team: &str,
    season: u16,
    week: u8,
    opponent: &str,
) -> StatRow {
    StatRow {
        player_name: player.to_string(),
        position: position.to_string(),
        recent_team: team.to_string(),
        season,
        week,
        opponent_team: opponent.to_string(),
        completions: 0,
        attempts: 0,
        passing_yards: 0.0,
        passing_tds: 0,
        interceptions: 0,
        sacks: 0.0,
    }
}

fn played_in(abbr: &str, season: u16) -> bool {
    FIRST_SEASONS
        .iter()
        .find(|(a, _)| *a == abbr)
        .map(|(_, first)| season >= *first)
        .unwrap_or(true)
}

/// Generated weekly rows for every franchise active in `season`
///
/// Each team gets a quarterback and a receiver line per week, under the
/// abbreviation it used that season.
pub fn create_mock_weekly_data(season: u16) -> Vec<StatRow> {
    let teams: Vec<&'static str> = TEAMS
        .iter()
        .map(|t| t.0)
        .filter(|abbr| crate::team_abbrev::is_canonical(abbr))
        .filter(|abbr| played_in(abbr, season))
        .map(|abbr| abbrev_for_season(abbr, season))
        .collect();

    let mut rows = Vec::new();
    for week in 1..=MOCK_WEEKS {
        for (i, team) in teams.iter().enumerate() {
            let opponent = teams[(i + week as usize) % teams.len()];
            let seed = (i as u32 + 1) * week as u32;

            let mut qb = stat_row(&format!("{} QB", team), "QB", team, season, week, opponent);
            qb.completions = 15 + seed % 15;
            qb.attempts = qb.completions + 8 + seed % 7;
            qb.passing_yards = (qb.completions * 11 + seed % 40) as f64;
            qb.passing_tds = seed % 4;
            qb.interceptions = seed % 3;
            qb.sacks = (seed % 5) as f64;
            rows.push(qb);

            rows.push(stat_row(&format!("{} WR", team), "WR", team, season, week, opponent));
        }
    }
    rows
}
