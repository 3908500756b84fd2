use std::env;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epl_goal_line::api::OpenFootballClient;
use epl_goal_line::config::Config;
use epl_goal_line::history::{compute_all_team_stats, compute_team_stats, parse_all_seasons};
use epl_goal_line::matching::team_normalizer;
use epl_goal_line::models::TeamStats;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "team_history=info,epl_goal_line=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse arguments
    let args: Vec<String> = env::args().collect();
    let config = Config::from_env()?;

    let mut seasons = parse_all(&args, "--season", "-s");
    if seasons.is_empty() {
        seasons = config.seasons.clone();
    }

    let client = OpenFootballClient::new(&config.openfootball_base_url);
    let feeds = client.fetch_seasons(&seasons).await;

    let matches = parse_all_seasons(&feeds);
    info!("Loaded {} played matches from {:?}", matches.len(), seasons);

    if matches.is_empty() {
        warn!("No match history available");
        return Ok(());
    }

    let normalizer = team_normalizer::shared();

    match parse_one(&args, "--team", "-t") {
        Some(team) => {
            let canonical = normalizer.to_canonical(&team);
            let stats = compute_team_stats(&matches, &canonical);

            if stats.matches_played == 0 {
                warn!("No matches found for {} ({})", team, canonical);
                return Ok(());
            }

            log_team(&stats, &normalizer.to_display(&stats.team_name));
            for m in &stats.all_matches {
                info!(
                    "  {} {} | {} {}-{} {} | {} goals{}",
                    m.season,
                    m.date,
                    normalizer.to_display(&m.team1),
                    m.score.ft[0],
                    m.score.ft[1],
                    normalizer.to_display(&m.team2),
                    m.total_goals,
                    if m.is_over_45 { " (over 4.5)" } else { "" }
                );
            }
        }
        None => {
            let mut all = compute_all_team_stats(&matches);
            all.sort_by(|a, b| b.over_45_percentage.total_cmp(&a.over_45_percentage));

            for stats in &all {
                log_team(stats, &normalizer.to_display(&stats.team_name));
            }
        }
    }

    Ok(())
}

fn log_team(stats: &TeamStats, display_name: &str) {
    let recent: Vec<String> = stats
        .last_5_matches
        .iter()
        .map(|m| m.total_goals.to_string())
        .collect();

    info!(
        "{}: {}/{} over 4.5 ({:.1}%) | last 5 totals: {}",
        display_name,
        stats.over_45_count,
        stats.matches_played,
        stats.over_45_percentage,
        recent.join(" ")
    );
}

/// Parse the value following the first occurrence of a flag
fn parse_one(args: &[String], long: &str, short: &str) -> Option<String> {
    parse_all(args, long, short).into_iter().next()
}

/// Parse the values following every occurrence of a flag
fn parse_all(args: &[String], long: &str, short: &str) -> Vec<String> {
    args.iter()
        .enumerate()
        .filter(|(_, arg)| *arg == long || *arg == short)
        .filter_map(|(i, _)| args.get(i + 1).cloned())
        .collect()
}
