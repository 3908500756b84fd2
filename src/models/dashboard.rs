use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChartPoint, FilteredMarket, TeamStats};

/// Historical stats for both sides of a market's fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupStats {
    pub home: TeamStats,
    pub away: TeamStats,
}

impl MatchupStats {
    /// Share of both teams' matches that went over 4.5 goals (0.0 - 100.0).
    /// Matches between the two sides are counted once per team.
    pub fn combined_over_45_percentage(&self) -> f64 {
        let played = self.home.matches_played + self.away.matches_played;
        if played == 0 {
            return 0.0;
        }
        let over = self.home.over_45_count + self.away.over_45_count;
        (over as f64 / played as f64) * 100.0
    }
}

/// A filtered market joined with the history of the teams it names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketView {
    pub market: FilteredMarket,

    /// None when the event title does not name two teams
    pub matchup: Option<MatchupStats>,

    /// Over/Under price series, empty when history was not fetched
    pub chart: Vec<ChartPoint>,
}

/// Everything the dashboard shows, rebuilt on every refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub markets: Vec<MarketView>,
    pub team_stats: Vec<TeamStats>,
    pub generated_at: DateTime<Utc>,
}

/// Latest snapshot, None until the first refresh succeeds
pub type SharedSnapshot = std::sync::Arc<tokio::sync::RwLock<Option<DashboardSnapshot>>>;
