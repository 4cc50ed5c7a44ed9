//! One module per run mode. Each returns `AppError` only for fatal problems;
//! source and category failures are logged where they happen.

pub mod daily;
pub mod hot_jobs;
pub mod remote;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::tracker::{read_tracker, TrackerTable};

/// Today's date and a minute-precision timestamp for report headers.
fn now_stamps() -> (NaiveDate, String) {
    let now = Local::now();
    (now.date_naive(), now.format("%Y-%m-%d %H:%M").to_string())
}

/// Reads the tracker named by `TRACKER_FILE`; a missing setting is fatal.
fn load_tracker(state: &AppState) -> Result<TrackerTable, AppError> {
    let tracker = read_tracker(state.config.require_tracker()?);
    if tracker.is_empty() {
        warn!("Tracker is empty, no company will be filtered out of hot jobs");
    } else {
        info!("Tracker: {} companies", tracker.len());
    }
    Ok(tracker)
}
