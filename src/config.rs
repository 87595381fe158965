use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use ratatui::style::Color;
use thiserror::Error;

use crate::stats::LAST_SEASON;

pub const DEFAULT_STATS_URL: &str =
    "https://github.com/nflverse/nflverse-data/releases/download/player_stats/player_stats_{season}.csv";

pub const DEFAULT_TEAMS_URL: &str =
    "https://github.com/nflverse/nflverse-data/releases/download/teams/teams_colors_logos.csv";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub time_format: String,
    /// Team selected at startup (display name)
    pub default_team: Option<String>,
    /// Year selected at startup
    pub default_year: u16,
    /// Weekly stats URL, `{season}` is replaced by the year
    pub stats_url: String,
    pub teams_url: String,
    pub request_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub unfocused_selection_fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_fg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            time_format: "%H:%M:%S".to_string(),
            default_team: None,
            default_year: LAST_SEASON,
            stats_url: DEFAULT_STATS_URL.to_string(),
            teams_url: DEFAULT_TEAMS_URL.to_string(),
            request_timeout_secs: 30,
            cache_ttl_secs: 3600,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            unfocused_selection_fg: None,
            error_fg: Color::Red,
        }
    }
}

impl ThemeConfig {
    /// Get the unfocused selection color, calculating 50% darker if not explicitly set
    pub fn unfocused_selection_fg(&self) -> Color {
        self.unfocused_selection_fg.unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * factor) as u8;
            let g = (g as f32 * factor) as u8;
            let b = (b as f32 * factor) as u8;
            Color::Rgb(r, g, b)
        }
        other => other,
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|color_str| {
        parse_color(&color_str)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))
    })
    .transpose()
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    let named = match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        "orange" => Some(Color::Rgb(255, 165, 0)),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    if let Some(hex) = s.strip_prefix('#') {
        let channel = |i: usize, len: usize| -> Option<u8> {
            let part = hex.get(i * len..(i + 1) * len)?;
            let part = if len == 1 { part.repeat(2) } else { part.to_string() };
            u8::from_str_radix(&part, 16).ok()
        };
        return match hex.len() {
            6 => Some(Color::Rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            3 => Some(Color::Rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            _ => None,
        };
    }

    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if let [r, g, b] = parts.as_slice() {
        return Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Parse config file contents; unknown keys are ignored, missing keys defaulted
pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Why the config file could not be used
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Load the config file at `path`
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Config from the XDG path, or the defaults
///
/// A file that exists but cannot be used yields the defaults plus the error,
/// so the caller can report it once logging is set up.
pub fn read() -> (Config, Option<ConfigError>) {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return (Config::default(), None),
    };

    if !config_path.exists() {
        return (Config::default(), None);
    }

    match load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}
