use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::warn;

use crate::matching::TeamNameNormalizer;
use crate::models::{
    FilteredMarket, MatchResult, MatchupStats, RawSeason, Score, SeasonFeed, TeamStats, GOAL_LINE,
};

const RECENT_MATCHES: usize = 5;

/// Fixture time used when the feed has none
const DEFAULT_KICKOFF: &str = "00:00";

/// Convert one season feed into match results, skipping fixtures without a
/// full-time score
pub fn parse_season_matches(raw: &RawSeason, season: &str) -> Vec<MatchResult> {
    raw.matches
        .iter()
        .filter_map(|m| {
            let ft = m.score.as_ref()?.ft?;
            let Some(total_goals) = ft[0].checked_add(ft[1]) else {
                warn!(
                    "Skipping {} vs {} on {}: score {:?} overflows",
                    m.team1, m.team2, m.date, ft
                );
                return None;
            };

            Some(MatchResult {
                round: m.round.clone(),
                date: m.date.clone(),
                time: m
                    .time
                    .clone()
                    .unwrap_or_else(|| DEFAULT_KICKOFF.to_string()),
                team1: m.team1.clone(),
                team2: m.team2.clone(),
                score: Score { ft },
                total_goals,
                is_over_45: f64::from(total_goals) > GOAL_LINE,
                season: season.to_string(),
            })
        })
        .collect()
}

/// Parse every season in the order given; a season without a feed adds nothing
pub fn parse_all_seasons(seasons: &[SeasonFeed]) -> Vec<MatchResult> {
    seasons
        .iter()
        .filter_map(|s| s.data.as_ref().map(|data| parse_season_matches(data, &s.tag)))
        .flatten()
        .collect()
}

/// Over 4.5 record of one team, most recent match first.
///
/// Matches on the same date keep their input order.
pub fn compute_team_stats(matches: &[MatchResult], team_name: &str) -> TeamStats {
    let mut team_matches: Vec<MatchResult> = matches
        .iter()
        .filter(|m| m.involves(team_name))
        .cloned()
        .collect();

    // Stable sort, unparseable dates last
    team_matches.sort_by(|a, b| match_date(b).cmp(&match_date(a)));

    let matches_played = team_matches.len();
    let over_45_count = team_matches.iter().filter(|m| m.is_over_45).count();
    let over_45_percentage = if matches_played > 0 {
        (over_45_count as f64 / matches_played as f64) * 100.0
    } else {
        0.0
    };

    TeamStats {
        team_name: team_name.to_string(),
        matches_played,
        over_45_count,
        over_45_percentage,
        last_5_matches: team_matches.iter().take(RECENT_MATCHES).cloned().collect(),
        all_matches: team_matches,
    }
}

/// Distinct team names, in the order they first appear, optionally limited
/// to one season
pub fn extract_teams_from_matches(matches: &[MatchResult], season: Option<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut teams = Vec::new();

    for m in matches {
        if season.is_some_and(|s| m.season != s) {
            continue;
        }

        for team in [&m.team1, &m.team2] {
            if seen.insert(team.as_str()) {
                teams.push(team.clone());
            }
        }
    }

    teams
}

/// Latest season tag present ("2025-26" sorts after "2024-25")
pub fn most_recent_season(matches: &[MatchResult]) -> Option<&str> {
    matches.iter().map(|m| m.season.as_str()).max()
}

/// Stats for every team in the league.
///
/// The team list comes from the most recent season, or from all seasons when
/// that one has no matches. Teams that played nothing are dropped. Output
/// keeps team discovery order; sorting is left to the caller.
pub fn compute_all_team_stats(matches: &[MatchResult]) -> Vec<TeamStats> {
    let latest = extract_teams_from_matches(matches, most_recent_season(matches));
    let teams = if latest.is_empty() {
        extract_teams_from_matches(matches, None)
    } else {
        latest
    };

    teams
        .iter()
        .map(|team| compute_team_stats(matches, team))
        .filter(|stats| stats.matches_played > 0)
        .collect()
}

/// Canonical teams named by the markets' event titles, sorted
pub fn extract_unique_teams(
    markets: &[FilteredMarket],
    normalizer: &TeamNameNormalizer,
) -> Vec<String> {
    let mut teams = BTreeSet::new();

    for market in markets {
        if let Some(pair) = normalizer.extract_team_names(&market.event_title) {
            teams.insert(pair.home);
            teams.insert(pair.away);
        }
    }

    teams.into_iter().collect()
}

/// History of both sides of a market's fixture, None when the event title
/// does not name two teams
pub fn matchup_stats(
    market: &FilteredMarket,
    matches: &[MatchResult],
    normalizer: &TeamNameNormalizer,
) -> Option<MatchupStats> {
    let pair = normalizer.extract_team_names(&market.event_title)?;

    Some(MatchupStats {
        home: compute_team_stats(matches, &pair.home),
        away: compute_team_stats(matches, &pair.away),
    })
}

fn match_date(m: &MatchResult) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&m.date, "%Y-%m-%d").ok()
}
