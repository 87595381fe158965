pub mod config;
pub mod stats;
pub mod teams;
pub mod years;

use anyhow::{bail, Result};

use crate::stats::{is_valid_season, FIRST_SEASON, LAST_SEASON};

/// Parse and range-check a `--year` argument
pub fn parse_year(year: &str) -> Result<u16> {
    let parsed: u16 = match year.trim().parse() {
        Ok(y) => y,
        Err(_) => bail!("Invalid year '{}'. Use a season between {} and {}", year, FIRST_SEASON, LAST_SEASON),
    };
    if !is_valid_season(parsed) {
        bail!("Season {} is outside {}-{}", parsed, FIRST_SEASON, LAST_SEASON);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2023").unwrap(), 2023);
        assert_eq!(parse_year(" 1999 ").unwrap(), 1999);
        assert!(parse_year("1998").is_err());
        assert!(parse_year("twenty").is_err());
        assert!(parse_year("2025").unwrap_err().to_string().contains("1999-2024"));
    }
}
