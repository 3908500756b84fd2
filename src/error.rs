use thiserror::Error;

/// Upstream contract violations found while turning a raw market into a
/// `FilteredMarket`
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("market {market_slug}: malformed {field}: {source}")]
    MalformedField {
        market_slug: String,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("market {market_slug}: {field} has {len} entries, expected 2")]
    WrongArity {
        market_slug: String,
        field: &'static str,
        len: usize,
    },

    #[error("market {market_slug}: invalid price {value:?}")]
    InvalidPrice { market_slug: String, value: String },
}

pub type Result<T> = std::result::Result<T, MarketError>;
