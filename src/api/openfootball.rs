use anyhow::{Context, Result};
use reqwest::Client;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::models::{RawSeason, SeasonFeed};

/// Premier League file inside each season directory
const LEAGUE_FILE: &str = "en.1.json";

/// Client for the openfootball `football.json` season feeds
#[derive(Clone)]
pub struct OpenFootballClient {
    client: Client,
    base_url: String,
}

impl OpenFootballClient {
    /// Create a new client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn season_url(&self, season: &str) -> String {
        format!("{}/{}/{}", self.base_url, season, LEAGUE_FILE)
    }

    /// Fetch one season's feed; None when the season has not been published
    pub async fn fetch_season(&self, season: &str) -> Result<Option<RawSeason>> {
        let url = self.season_url(season);
        debug!("Fetching season feed: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to fetch season feed")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("openfootball error: {} - {}", status, text);
        }

        let data: RawSeason = response
            .json()
            .await
            .context("Failed to parse season feed")?;

        Ok(Some(data))
    }

    /// Fetch all seasons concurrently, returned in the order given.
    /// A season that fails or does not exist comes back without data.
    pub async fn fetch_seasons(&self, seasons: &[String]) -> Vec<SeasonFeed> {
        let mut tasks = JoinSet::new();

        for (index, season) in seasons.iter().enumerate() {
            let client = self.clone();
            let season = season.clone();

            tasks.spawn(async move {
                let result = client.fetch_season(&season).await;
                (index, season, result)
            });
        }

        let mut feeds: Vec<(usize, SeasonFeed)> = Vec::with_capacity(seasons.len());

        while let Some(joined) = tasks.join_next().await {
            let (index, season, result) = match joined {
                Ok(output) => output,
                Err(e) => {
                    warn!("Season fetch task failed: {}", e);
                    continue;
                }
            };

            let data = match result {
                Ok(Some(data)) => {
                    info!("Season {}: {} fixtures", season, data.matches.len());
                    Some(data)
                }
                Ok(None) => {
                    info!("Season {} not published yet", season);
                    None
                }
                Err(e) => {
                    warn!("Failed to fetch season {}: {:#}", season, e);
                    None
                }
            };

            feeds.push((index, SeasonFeed::new(season, data)));
        }

        feeds.sort_by_key(|(index, _)| *index);
        feeds.into_iter().map(|(_, feed)| feed).collect()
    }
}
