use thiserror::Error;

use crate::hot_jobs::store::StoreError;

/// Application-level error type.
/// Per-source and per-category failures are recovered where they happen; what
/// reaches this type is fatal for the current command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search profile error: {0}")]
    Profile(#[from] serde_json::Error),

    #[error("Sticky state error: {0}")]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
