use chrono::NaiveDate;
use tracing::{info, warn};

use crate::cli::Refresh;
use crate::errors::AppError;
use crate::hot_jobs::{self, CompanyMatcher, Reconciler, RefreshOutcome, StickyState, StickyStore};
use crate::report::format_hot_jobs;
use crate::sources::linkedin::LinkedInSearch;
use crate::state::AppState;
use crate::tracker::TrackerTable;

/// `--hot-jobs`: optional removal and refresh, then reconcile and print.
pub async fn run(
    state: &AppState,
    refresh: Option<Refresh>,
    remove: Option<(String, String)>,
) -> Result<(), AppError> {
    info!("=== Hot Jobs Check ===");
    let tracker = super::load_tracker(state)?;

    let store = StickyStore::new(&state.config.state_file);
    let mut sticky = store.load();

    if let Some((company, role)) = remove {
        let touched = hot_jobs::remove_listing(&mut sticky, &company, &role);
        if touched.is_empty() {
            info!("'{company}' / '{role}' not in the current list, blocklisted for future runs");
        } else {
            for category in &touched {
                info!("Removed '{company}' / '{role}' from {category}");
            }
            info!("Blocklisted, this job won't reappear");
        }
        store.save(&sticky)?;
    }

    if let Some(refresh) = refresh {
        let outcome = match &refresh {
            Refresh::All => hot_jobs::refresh(&mut sticky, None),
            Refresh::Category(name) => hot_jobs::refresh(&mut sticky, Some(name)),
        };
        match outcome {
            RefreshOutcome::ClearedAll => info!("Cleared all categories, will re-fetch"),
            RefreshOutcome::Cleared(name) => info!("Cleared '{name}', will re-fetch"),
            RefreshOutcome::NotFound { available } => warn!(
                "Category not found. Available: {}",
                available.join(", ")
            ),
        }
        store.save(&sticky)?;
    }

    let (today, _) = super::now_stamps();
    reconcile(state, &tracker, &store, &mut sticky, today).await?;

    let listing = hot_jobs::ordered(&sticky, &state.profile.hot_job_categories);
    print!("{}", format_hot_jobs(&listing, &state.tiers));
    Ok(())
}

/// Reconciles every configured category against the tracker and saves.
pub async fn reconcile(
    state: &AppState,
    tracker: &TrackerTable,
    store: &StickyStore,
    sticky: &mut StickyState,
    today: NaiveDate,
) -> Result<(), AppError> {
    let search = LinkedInSearch::new(state.http.clone());
    let reconciler = Reconciler::new(&search, &state.tiers, state.config.query_delay);
    let matcher = CompanyMatcher::new(tracker.companies());

    reconciler
        .reconcile_all(sticky, &state.profile.hot_job_categories, &matcher)
        .await;
    sticky.touch(today);
    store.save(sticky)?;

    info!(
        "Hot jobs: {} listings across {} categories",
        sticky.total_jobs(),
        sticky.current_jobs.len()
    );
    Ok(())
}
