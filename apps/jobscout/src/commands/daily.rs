use std::path::PathBuf;

use tracing::info;

use crate::errors::AppError;
use crate::hot_jobs::{self, StickyStore};
use crate::report::{self, DailyReportInput};
use crate::state::AppState;

/// Default mode: tracker, sticky hot jobs and category tables in one report.
pub async fn run(state: &AppState, out: Option<PathBuf>) -> Result<PathBuf, AppError> {
    let tracker = super::load_tracker(state)?;

    info!("Fetching hot jobs from LinkedIn...");
    let store = StickyStore::new(&state.config.state_file);
    let mut sticky = store.load();
    let (today, generated_at) = super::now_stamps();
    super::hot_jobs::reconcile(state, &tracker, &store, &mut sticky, today).await?;

    let listing = hot_jobs::ordered(&sticky, &state.profile.hot_job_categories);
    let hot_section = report::render_hot_jobs_section(&listing, &state.tiers)?;

    let html = report::render_daily_report(
        DailyReportInput {
            date: today.format("%Y-%m-%d").to_string(),
            generated_at,
            home_city: &state.config.home_city,
            home_country: &state.config.home_country,
            hot_section,
        },
        &tracker,
        &state.profile,
    )?;

    let path = out.unwrap_or_else(|| report::report_path(&state.config.report_dir, "daily", today));
    report::write_report(&path, &html)?;
    Ok(path)
}
