use anyhow::Result;

use crate::config::{self, Config};

/// Human-readable dump of the effective configuration
pub fn describe(cfg: &Config) -> String {
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };
    line(format!("log_level: {}", cfg.log_level));
    line(format!("log_file: {}", cfg.log_file));
    line(format!("time_format: {}", cfg.time_format));
    line(format!(
        "default_team: {}",
        cfg.default_team.as_deref().unwrap_or("(first team)")
    ));
    line(format!("default_year: {}", cfg.default_year));
    line(format!("stats_url: {}", cfg.stats_url));
    line(format!("teams_url: {}", cfg.teams_url));
    line(format!("request_timeout_secs: {}", cfg.request_timeout_secs));
    line(format!("cache_ttl_secs: {}", cfg.cache_ttl_secs));
    line(String::new());
    line("[theme]".to_string());
    line(format!("selection_fg: {:?}", cfg.theme.selection_fg));
    line(format!(
        "unfocused_selection_fg: {:?}{}",
        cfg.theme.unfocused_selection_fg(),
        if cfg.theme.unfocused_selection_fg.is_none() { " (auto: 50% darker)" } else { "" }
    ));
    line(format!("error_fg: {:?}", cfg.theme.error_fg));
    out
}

pub fn run(cfg: &Config) -> Result<()> {

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    print!("{}", describe(cfg));
    Ok(())
}
