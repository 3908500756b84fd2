use serde::{Deserialize, Serialize};

/// One season of the openfootball `football.json` feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSeason {
    pub name: String,
    pub matches: Vec<RawMatch>,
}

/// Fixture entry as it appears in a season feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMatch {
    #[serde(default)]
    pub round: String,
    #[serde(default)]
    pub date: String,
    pub time: Option<String>,
    pub team1: String,
    pub team2: String,
    pub score: Option<RawScore>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawScore {
    /// Full-time score `[home, away]`, absent for unplayed fixtures
    pub ft: Option<[u32; 2]>,
}

/// A season tag together with its feed, if one was fetched
#[derive(Debug, Clone)]
pub struct SeasonFeed {
    /// Caller-supplied label, e.g. "2024-25"
    pub tag: String,
    pub data: Option<RawSeason>,
}

impl SeasonFeed {
    pub fn new(tag: impl Into<String>, data: Option<RawSeason>) -> Self {
        Self {
            tag: tag.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub ft: [u32; 2],
}

/// A played match with its final score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub round: String,

    /// ISO date, e.g. "2024-08-16"
    pub date: String,

    pub time: String,

    /// Home team (canonical name)
    pub team1: String,

    /// Away team (canonical name)
    pub team2: String,

    pub score: Score,
    pub total_goals: u32,
    pub is_over_45: bool,
    pub season: String,
}

impl MatchResult {
    pub fn involves(&self, team_name: &str) -> bool {
        self.team1 == team_name || self.team2 == team_name
    }
}

/// Historical Over 4.5 statistics for one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team_name: String,
    pub matches_played: usize,
    pub over_45_count: usize,

    /// 0.0 - 100.0, zero when no matches were played
    pub over_45_percentage: f64,

    /// Most recent first
    pub last_5_matches: Vec<MatchResult>,

    /// Most recent first
    pub all_matches: Vec<MatchResult>,
}
