use serde::{Deserialize, Serialize};

/// Goal line every filtered market is priced on
pub const GOAL_LINE: f64 = 4.5;

/// Event from the Gamma events feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEvent {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub start_date: String,
    pub creation_date: String,
    pub markets: Vec<RawMarket>,
}

/// Individual market within an event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMarket {
    pub id: String,
    pub slug: String,

    /// Free text, e.g. "Will the total goals ... be over or under 4.5?"
    pub question: String,

    /// JSON-encoded string array, `["<over>", "<under>"]`
    pub outcome_prices: String,

    /// JSON-encoded string array, `["<over token>", "<under token>"]`
    pub clob_token_ids: String,

    pub game_start_time: String,
}

/// Over/Under token identifiers of a binary goal-line market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub over_token_id: String,
    pub under_token_id: String,
}

/// A 4.5 goal-line market with its event context.
///
/// Token ids and prices always come from the same index pairing: index 0 of
/// `clobTokenIds`/`outcomePrices` is Over, index 1 is Under. This is an
/// upstream convention and is never re-derived from the prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredMarket {
    pub event_id: String,
    pub event_slug: String,
    pub event_title: String,
    pub event_start_date: String,
    pub event_creation_date: String,

    pub market_id: String,
    pub market_question: String,
    pub market_slug: String,

    pub over_token_id: String,
    pub under_token_id: String,

    /// Current Over price (0.0 - 1.0)
    pub current_over_price: f64,

    /// Current Under price (0.0 - 1.0)
    pub current_under_price: f64,

    pub best_ask_over_price: Option<f64>,
    pub best_ask_under_price: Option<f64>,
    pub best_ask_over_volume: Option<f64>,
    pub best_ask_under_volume: Option<f64>,

    pub line: f64,
    pub game_start_time: String,
}

impl FilteredMarket {
    /// Copy of this market with best-ask fields taken from the order books.
    /// A side without a best ask keeps its fields unset.
    pub fn with_best_asks(&self, over: Option<BestAsk>, under: Option<BestAsk>) -> Self {
        Self {
            best_ask_over_price: over.map(|a| a.price),
            best_ask_over_volume: over.map(|a| a.size),
            best_ask_under_price: under.map(|a| a.price),
            best_ask_under_volume: under.map(|a| a.size),
            ..self.clone()
        }
    }

    pub fn token_pair(&self) -> TokenPair {
        TokenPair {
            over_token_id: self.over_token_id.clone(),
            under_token_id: self.under_token_id.clone(),
        }
    }
}

/// One price level of a CLOB order book, as returned upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLevel {
    pub price: String,
    pub size: String,
}

/// Lowest ask on one side of a market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestAsk {
    pub price: f64,
    pub size: f64,
}

/// Single point from the CLOB `prices-history` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryPoint {
    /// Unix timestamp (seconds)
    pub t: i64,
    /// Price (0.0 - 1.0)
    pub p: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    #[serde(default)]
    pub history: Vec<PriceHistoryPoint>,
}

/// Over and Under prices aligned on a shared timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub timestamp: i64,
    pub over_price: f64,
    pub under_price: f64,
    /// RFC 3339 UTC timestamp
    pub date: String,
}
