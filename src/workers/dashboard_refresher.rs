use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::api::{ClobClient, GammaClient, OpenFootballClient};
use crate::config::Config;
use crate::filter::{filter_45_goal_line_markets, has_price_history, merge_price_history};
use crate::history::{compute_all_team_stats, matchup_stats, parse_all_seasons};
use crate::matching::TeamNameNormalizer;
use crate::models::{
    ChartPoint, DashboardSnapshot, FilteredMarket, MarketView, MatchResult, SharedSnapshot,
};

/// Worker that periodically rebuilds the dashboard snapshot
pub struct DashboardRefresherWorker {
    gamma: GammaClient,
    clob: ClobClient,
    openfootball: OpenFootballClient,
    normalizer: Arc<TeamNameNormalizer>,
    seasons: Vec<String>,
    fetch_price_history: bool,
    snapshot: SharedSnapshot,
    refresh_interval: Duration,
}

impl DashboardRefresherWorker {
    /// Create a new refresher with clients built from the configuration
    pub fn new(
        config: &Config,
        normalizer: Arc<TeamNameNormalizer>,
        snapshot: SharedSnapshot,
    ) -> Self {
        Self {
            gamma: GammaClient::new(
                &config.gamma_api_url,
                &config.gamma_tag_id,
                config.gamma_event_limit,
            ),
            clob: ClobClient::new(&config.clob_api_url, config.order_book_depth),
            openfootball: OpenFootballClient::new(&config.openfootball_base_url),
            normalizer,
            seasons: config.seasons.clone(),
            fetch_price_history: config.fetch_price_history,
            snapshot,
            refresh_interval: Duration::from_secs(config.refresh_interval),
        }
    }

    /// Run the worker loop
    pub async fn run(&self) {
        info!(
            "Dashboard refresher started (interval: {:?}, seasons: {:?})",
            self.refresh_interval, self.seasons
        );

        // Run initial refresh immediately
        self.refresh().await;

        // Then run on interval
        let mut interval = time::interval(self.refresh_interval);
        interval.tick().await; // Skip first tick (already ran)

        loop {
            interval.tick().await;
            self.refresh().await;
        }
    }

    /// Perform a single refresh; the previous snapshot stays in place on failure
    pub async fn refresh(&self) {
        info!("Refreshing Over/Under 4.5 dashboard...");

        let events = match self.gamma.fetch_premier_league_events().await {
            Ok(events) => events,
            Err(e) => {
                error!("Failed to fetch events: {:#}", e);
                warn!("Will retry on next interval");
                return;
            }
        };

        let markets = match filter_45_goal_line_markets(&events) {
            Ok(markets) => markets,
            Err(e) => {
                error!("Event feed violates market contract: {}", e);
                warn!("Will retry on next interval");
                return;
            }
        };
        info!(
            "Found {} Over/Under 4.5 markets in {} events",
            markets.len(),
            events.len()
        );

        let (enriched, feeds) = tokio::join!(
            self.enrich(markets),
            self.openfootball.fetch_seasons(&self.seasons)
        );

        let matches = parse_all_seasons(&feeds);
        info!("Loaded {} played matches", matches.len());

        let snapshot = build_snapshot(enriched, &matches, &self.normalizer, Utc::now());
        log_snapshot(&snapshot);

        *self.snapshot.write().await = Some(snapshot);
    }

    /// Attach best asks and, if enabled, price history to each market
    async fn enrich(
        &self,
        markets: Vec<FilteredMarket>,
    ) -> Vec<(FilteredMarket, Vec<ChartPoint>)> {
        let mut enriched = Vec::with_capacity(markets.len());

        for market in markets {
            let tokens = market.token_pair();
            let asks = self.clob.fetch_best_asks(&tokens).await;

            let chart = if self.fetch_price_history {
                let (over, under) = self
                    .clob
                    .fetch_market_price_history(&tokens, &market.event_creation_date)
                    .await;
                if !has_price_history(&over, &under) {
                    debug!("No price history for market {}", market.market_slug);
                }
                merge_price_history(&over, &under)
            } else {
                Vec::new()
            };

            enriched.push((market.with_best_asks(asks.over, asks.under), chart));
        }

        enriched
    }
}

/// Join markets with team history into a snapshot
pub fn build_snapshot(
    markets: Vec<(FilteredMarket, Vec<ChartPoint>)>,
    matches: &[MatchResult],
    normalizer: &TeamNameNormalizer,
    generated_at: DateTime<Utc>,
) -> DashboardSnapshot {
    let markets = markets
        .into_iter()
        .map(|(market, chart)| MarketView {
            matchup: matchup_stats(&market, matches, normalizer),
            market,
            chart,
        })
        .collect();

    DashboardSnapshot {
        markets,
        team_stats: compute_all_team_stats(matches),
        generated_at,
    }
}

fn log_snapshot(snapshot: &DashboardSnapshot) {
    for view in &snapshot.markets {
        let market = &view.market;
        let history = view
            .matchup
            .as_ref()
            .map(|m| format!("{:.1}%", m.combined_over_45_percentage()))
            .unwrap_or_else(|| "n/a".to_string());
        let ask = market
            .best_ask_over_price
            .map(|p| format!("{:.3}", p))
            .unwrap_or_else(|| "-".to_string());

        info!(
            "{} | Over 4.5 implied: {:.1}% (best ask {}) | Historical Over 4.5: {}",
            market.event_title,
            market.current_over_price * 100.0,
            ask,
            history
        );
    }

    info!(
        "Dashboard refreshed: {} markets, {} teams with history",
        snapshot.markets.len(),
        snapshot.team_stats.len()
    );
}
