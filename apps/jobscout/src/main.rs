mod cli;
mod commands;
mod config;
mod errors;
mod filter;
mod hot_jobs;
mod http;
mod models;
mod profile;
mod ranking;
mod report;
mod sources;
mod state;
mod tracker;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Mode};
use crate::config::Config;
use crate::state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first; a bad value aborts before any network call
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobscout v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config).context("failed to initialize")?;
    info!(
        "Home: {}/{} | {} hot-job categories",
        state.config.home_city,
        state.config.home_country,
        state.profile.hot_job_categories.len()
    );

    match cli.mode() {
        Mode::Daily => {
            let path = commands::daily::run(&state, cli.out)
                .await
                .context("daily report failed")?;
            println!("Daily report: {}", path.display());
        }
        Mode::HotJobs { refresh, remove } => {
            commands::hot_jobs::run(&state, refresh, remove)
                .await
                .context("hot jobs run failed")?;
        }
        Mode::Remote => {
            let path = commands::remote::run(&state, cli.out)
                .await
                .context("remote search failed")?;
            println!("Remote report: {}", path.display());
        }
    }

    Ok(())
}
