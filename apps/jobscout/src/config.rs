use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::errors::AppError;

/// Runtime configuration loaded from environment variables (and `.env`).
/// Only `TRACKER_FILE` is mandatory, and only for the commands that read it.
#[derive(Debug, Clone)]
pub struct Config {
    pub tracker_file: Option<PathBuf>,
    pub state_file: PathBuf,
    pub report_dir: PathBuf,
    pub search_profile: Option<PathBuf>,
    pub home_city: String,
    pub home_country: String,
    pub http_timeout: Duration,
    pub query_delay: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            tracker_file: optional_env("TRACKER_FILE").map(PathBuf::from),
            state_file: optional_env("HOT_JOBS_STATE_FILE")
                .unwrap_or_else(|| "daily_hot_jobs.json".to_string())
                .into(),
            report_dir: optional_env("REPORT_DIR")
                .unwrap_or_else(|| "reports".to_string())
                .into(),
            search_profile: optional_env("SEARCH_PROFILE").map(PathBuf::from),
            home_city: optional_env("HOME_CITY").unwrap_or_else(|| "Paris".to_string()),
            home_country: optional_env("HOME_COUNTRY").unwrap_or_else(|| "France".to_string()),
            http_timeout: Duration::from_secs(
                optional_env("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "15".to_string())
                    .parse::<u64>()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            query_delay: Duration::from_millis(
                optional_env("QUERY_DELAY_MS")
                    .unwrap_or_else(|| "2000".to_string())
                    .parse::<u64>()
                    .context("QUERY_DELAY_MS must be a whole number of milliseconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The tracker path, or a configuration error that tells the user how to set it.
    pub fn require_tracker(&self) -> Result<&PathBuf, AppError> {
        self.tracker_file.as_ref().ok_or_else(|| {
            AppError::Config(
                "TRACKER_FILE is not set. Point it at your application tracker workbook \
                 (in the environment or in a .env file next to the binary)."
                    .to_string(),
            )
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
