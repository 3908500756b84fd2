use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::models::RawEvent;

/// Client for the Polymarket Gamma events API
#[derive(Clone)]
pub struct GammaClient {
    client: Client,
    base_url: String,
    tag_id: String,
    limit: u32,
}

impl GammaClient {
    /// Create a new Gamma client for one league tag
    pub fn new(base_url: &str, tag_id: &str, limit: u32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            tag_id: tag_id.to_string(),
            limit,
        }
    }

    /// Fetch open Premier League events with their markets
    pub async fn fetch_premier_league_events(&self) -> Result<Vec<RawEvent>> {
        let url = format!(
            "{}/events?tag_id={}&closed=false&limit={}&offset=0",
            self.base_url,
            urlencoding::encode(&self.tag_id),
            self.limit
        );
        debug!("Fetching Gamma events from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to fetch Gamma events")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gamma API error: {} - {}", status, text);
        }

        let events: Vec<RawEvent> = response
            .json()
            .await
            .context("Failed to parse Gamma events response")?;

        info!("Gamma returned {} open events", events.len());
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_feed_parses() {
        let body = r#"[{
            "id": "16091",
            "ticker": "epl-liv-new-2026-01-31-more-markets",
            "slug": "epl-liv-new-2026-01-31-more-markets",
            "title": "Liverpool FC vs. Newcastle United FC - More Markets",
            "startDate": "2026-01-24T10:00:00Z",
            "creationDate": "2026-01-24T09:00:00Z",
            "active": true,
            "markets": [{
                "id": "558934",
                "slug": "epl-liv-new-2026-01-31-total-4pt5",
                "question": "Liverpool FC vs. Newcastle United FC: O/U 4.5",
                "outcomes": "[\"Over\", \"Under\"]",
                "outcomePrices": "[\"0.185\", \"0.815\"]",
                "clobTokenIds": "[\"740066\", \"664911\"]",
                "gameStartTime": "2026-01-31 17:30:00+00",
                "volumeNum": 1520.4
            }]
        }, {"id": "16092", "slug": "epl-winner", "title": "EPL Winner"}]"#;

        let events: Vec<RawEvent> = serde_json::from_str(body).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].creation_date, "2026-01-24T09:00:00Z");
        assert_eq!(events[0].markets[0].clob_token_ids, r#"["740066", "664911"]"#);
        assert!(events[1].markets.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GammaClient::new("https://gamma-api.polymarket.com/", "82", 100);
        assert_eq!(client.base_url, "https://gamma-api.polymarket.com");
    }
}
