pub mod dashboard;
pub mod market;
pub mod match_history;

pub use dashboard::{DashboardSnapshot, MarketView, MatchupStats, SharedSnapshot};
pub use market::{
    BestAsk, ChartPoint, FilteredMarket, OrderLevel, PriceHistory, PriceHistoryPoint, RawEvent,
    RawMarket, TokenPair, GOAL_LINE,
};
pub use match_history::{
    MatchResult, RawMatch, RawScore, RawSeason, Score, SeasonFeed, TeamStats,
};
