use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epl_goal_line::config::Config;
use epl_goal_line::matching::TeamNameNormalizer;
use epl_goal_line::models::SharedSnapshot;
use epl_goal_line::workers::DashboardRefresherWorker;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "epl_goal_line=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting epl-goal-line");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    let normalizer = Arc::new(load_team_names(&config)?);
    info!("Team name normalizer initialized");

    // Shared state
    let snapshot: SharedSnapshot = Arc::new(RwLock::new(None));

    let refresher = DashboardRefresherWorker::new(&config, normalizer, Arc::clone(&snapshot));

    let refresher_handle = tokio::spawn(async move {
        refresher.run().await;
    });

    info!("Dashboard refresher started");

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = refresher_handle => {
            error!("Dashboard refresher exited unexpectedly: {:?}", result);
        }
    }

    info!("Shutting down epl-goal-line");
    Ok(())
}

/// Load the team name table from file or use the built-in one
fn load_team_names(config: &Config) -> Result<TeamNameNormalizer> {
    if config.team_names_path.exists() {
        TeamNameNormalizer::load_from_file(&config.team_names_path)
    } else {
        info!("No team names file found, using built-in Premier League table");
        Ok(TeamNameNormalizer::premier_league())
    }
}
