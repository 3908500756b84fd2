use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Polymarket Gamma API URL
    pub gamma_api_url: String,

    /// Gamma tag of the Premier League
    pub gamma_tag_id: String,

    /// Maximum number of events per Gamma request
    pub gamma_event_limit: u32,

    /// Polymarket CLOB API URL
    pub clob_api_url: String,

    /// Number of order book levels to request per token
    pub order_book_depth: u32,

    /// Whether to fetch Over/Under price history for each market
    pub fetch_price_history: bool,

    /// Base URL of the openfootball football.json repository
    pub openfootball_base_url: String,

    /// Season tags to aggregate, oldest first
    pub seasons: Vec<String>,

    /// Interval in seconds between dashboard refreshes
    pub refresh_interval: u64,

    /// Optional team name table overriding the built-in one
    pub team_names_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            gamma_api_url: env::var("GAMMA_API_URL")
                .unwrap_or_else(|_| "https://gamma-api.polymarket.com".to_string()),

            gamma_tag_id: env::var("GAMMA_TAG_ID").unwrap_or_else(|_| "82".to_string()),

            gamma_event_limit: env::var("GAMMA_EVENT_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .context("GAMMA_EVENT_LIMIT must be a valid number")?,

            clob_api_url: env::var("CLOB_API_URL")
                .unwrap_or_else(|_| "https://clob.polymarket.com".to_string()),

            order_book_depth: env::var("ORDER_BOOK_DEPTH")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("ORDER_BOOK_DEPTH must be a valid number")?,

            fetch_price_history: env::var("FETCH_PRICE_HISTORY")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("FETCH_PRICE_HISTORY must be true or false")?,

            openfootball_base_url: env::var("OPENFOOTBALL_BASE_URL").unwrap_or_else(|_| {
                "https://raw.githubusercontent.com/openfootball/football.json/master".to_string()
            }),

            seasons: parse_seasons(
                &env::var("SEASONS").unwrap_or_else(|_| "2024-25,2025-26".to_string()),
            ),

            refresh_interval: parse_refresh_interval(
                &env::var("REFRESH_INTERVAL").unwrap_or_else(|_| "300".to_string()),
            )?,

            team_names_path: env::var("TEAM_NAMES_PATH")
                .unwrap_or_else(|_| "data/team_names.json".to_string())
                .into(),
        })
    }
}

/// Refresh interval in seconds, must be non-zero
pub fn parse_refresh_interval(value: &str) -> Result<u64> {
    let secs: u64 = value
        .trim()
        .parse()
        .context("REFRESH_INTERVAL must be a valid number")?;
    anyhow::ensure!(secs > 0, "REFRESH_INTERVAL must be greater than zero");

    Ok(secs)
}

/// Split a comma-separated season list, dropping blanks
pub fn parse_seasons(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seasons() {
        assert_eq!(
            parse_seasons("2024-25, 2025-26,,"),
            vec!["2024-25".to_string(), "2025-26".to_string()]
        );
        assert!(parse_seasons("").is_empty());
    }

    #[test]
    fn test_parse_refresh_interval() {
        assert_eq!(parse_refresh_interval("300").unwrap(), 300);
        assert_eq!(parse_refresh_interval(" 60 ").unwrap(), 60);

        let err = parse_refresh_interval("0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
        assert!(parse_refresh_interval("five").is_err());
        assert!(parse_refresh_interval("-5").is_err());
    }
}
