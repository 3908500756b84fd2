pub mod aggregator;

pub use aggregator::{
    compute_all_team_stats, compute_team_stats, extract_teams_from_matches, extract_unique_teams,
    matchup_stats, most_recent_season, parse_all_seasons, parse_season_matches,
};
