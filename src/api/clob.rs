use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::filter::{best_ask, iso_date_to_unix_timestamp};
use crate::models::{BestAsk, OrderLevel, PriceHistory, TokenPair};

/// Price history window used when no start is given
const DEFAULT_HISTORY_SECS: i64 = 7 * 24 * 60 * 60;

/// Price history resolution (seconds between points)
pub const DEFAULT_FIDELITY: u32 = 60;

/// Client for the Polymarket CLOB (order books and price history)
#[derive(Clone)]
pub struct ClobClient {
    client: Client,
    base_url: String,
    depth: u32,
}

/// Order book response from /book
#[derive(Debug, Default, Deserialize)]
struct BookResponse {
    #[serde(default)]
    asks: Option<Vec<OrderLevel>>,
}

/// Best asks of both sides of a market
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BestAsks {
    pub over: Option<BestAsk>,
    pub under: Option<BestAsk>,
}

impl ClobClient {
    /// Create a new CLOB client fetching `depth` levels per book
    pub fn new(base_url: &str, depth: u32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            depth,
        }
    }

    /// Fetch the ask side of a token's order book
    pub async fn fetch_asks(&self, token_id: &str) -> Result<Vec<OrderLevel>> {
        let url = format!(
            "{}/book?token_id={}&side=ask&depth={}",
            self.base_url,
            urlencoding::encode(token_id),
            self.depth
        );
        debug!("Fetching order book: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to fetch order book")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("CLOB API error: {} - {}", status, text);
        }

        let book: BookResponse = response
            .json()
            .await
            .context("Failed to parse order book response")?;

        Ok(book.asks.unwrap_or_default())
    }

    /// Best ask of a token; any failure reads as no ask
    pub async fn fetch_best_ask(&self, token_id: &str) -> Option<BestAsk> {
        match self.fetch_asks(token_id).await {
            Ok(levels) => best_ask(&levels),
            Err(e) => {
                warn!("Failed to fetch asks for token {}: {:#}", token_id, e);
                None
            }
        }
    }

    /// Best asks of the Over and Under tokens, fetched concurrently
    pub async fn fetch_best_asks(&self, tokens: &TokenPair) -> BestAsks {
        let (over, under) = tokio::join!(
            self.fetch_best_ask(&tokens.over_token_id),
            self.fetch_best_ask(&tokens.under_token_id)
        );

        BestAsks { over, under }
    }

    /// Price history of a token since `start_ts` (default: the last 7 days).
    /// Failures yield an empty history.
    pub async fn fetch_price_history(
        &self,
        token_id: &str,
        start_ts: Option<i64>,
        fidelity: u32,
    ) -> PriceHistory {
        let start_ts = start_ts.unwrap_or_else(|| Utc::now().timestamp() - DEFAULT_HISTORY_SECS);

        match self.try_fetch_price_history(token_id, start_ts, fidelity).await {
            Ok(history) => history,
            Err(e) => {
                warn!("Failed to fetch price history for token {}: {:#}", token_id, e);
                PriceHistory::default()
            }
        }
    }

    /// Over and Under price histories since the event was created
    pub async fn fetch_market_price_history(
        &self,
        tokens: &TokenPair,
        event_creation_date: &str,
    ) -> (PriceHistory, PriceHistory) {
        let start_ts = iso_date_to_unix_timestamp(event_creation_date);

        tokio::join!(
            self.fetch_price_history(&tokens.over_token_id, start_ts, DEFAULT_FIDELITY),
            self.fetch_price_history(&tokens.under_token_id, start_ts, DEFAULT_FIDELITY)
        )
    }

    async fn try_fetch_price_history(
        &self,
        token_id: &str,
        start_ts: i64,
        fidelity: u32,
    ) -> Result<PriceHistory> {
        let url = format!(
            "{}/prices-history?startTs={}&market={}&fidelity={}",
            self.base_url,
            start_ts,
            urlencoding::encode(token_id),
            fidelity
        );
        debug!("Fetching price history: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to fetch price history")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("CLOB API error: {} - {}", status, text);
        }

        response
            .json()
            .await
            .context("Failed to parse price history response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_response_asks() {
        let body = r#"{
            "market": "0xabc",
            "asset_id": "740066",
            "asks": [{"price": "0.21", "size": "150"}, {"price": "0.19", "size": "42.5"}],
            "bids": [{"price": "0.17", "size": "300"}]
        }"#;
        let book: BookResponse = serde_json::from_str(body).unwrap();

        let asks = book.asks.unwrap_or_default();
        assert_eq!(asks.len(), 2);
        assert_eq!(
            best_ask(&asks),
            Some(BestAsk {
                price: 0.19,
                size: 42.5
            })
        );
    }

    #[test]
    fn test_book_response_missing_side() {
        let book: BookResponse = serde_json::from_str(r#"{"bids": []}"#).unwrap();
        assert!(book.asks.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_price_history_parses() {
        let body = r#"{"history": [{"t": 1769000000, "p": 0.185}, {"t": 1769003600, "p": 0.2}]}"#;
        let history: PriceHistory = serde_json::from_str(body).unwrap();
        assert_eq!(history.history.len(), 2);
        assert_eq!(history.history[1].p, 0.2);
    }

    #[tokio::test]
    async fn test_unreachable_book_yields_no_ask() {
        let client = ClobClient::new("http://127.0.0.1:9", 10);

        assert_eq!(client.fetch_best_ask("740066").await, None);
        assert!(client
            .fetch_price_history("740066", Some(0), DEFAULT_FIDELITY)
            .await
            .history
            .is_empty());
    }
}
