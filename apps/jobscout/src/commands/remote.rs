use std::path::PathBuf;

use tracing::info;

use crate::errors::AppError;
use crate::filter::{dedup_listings, filter_listings, FilterProfile};
use crate::models::JobListing;
use crate::ranking::{sort_listings, TierTable};
use crate::report;
use crate::sources::arbeitnow::Arbeitnow;
use crate::sources::jobicy::Jobicy;
use crate::sources::linkedin::LinkedInRemote;
use crate::sources::remoteok::RemoteOk;
use crate::sources::remotive::Remotive;
use crate::sources::wwr::WeWorkRemotely;
use crate::sources::{collect_all, JobSource};
use crate::state::AppState;

/// `--remote`: every remote board plus LinkedIn remote search, one report.
pub async fn run(state: &AppState, out: Option<PathBuf>) -> Result<PathBuf, AppError> {
    info!("=== Remote Job Search ===");
    let http = &state.http;
    let mut sources: Vec<Box<dyn JobSource>> = vec![
        Box::new(RemoteOk::new(http.clone())),
        Box::new(Remotive::new(http.clone())),
        Box::new(Arbeitnow::new(http.clone())),
        Box::new(Jobicy::new(http.clone())),
        Box::new(WeWorkRemotely::new(http.clone())),
    ];
    if !state.profile.remote_linkedin_queries.is_empty() {
        sources.push(Box::new(LinkedInRemote::new(
            http.clone(),
            state.profile.remote_linkedin_queries.clone(),
            state.config.query_delay,
        )));
    }

    let raw = collect_all(&sources).await;
    info!("Total fetched: {}", raw.len());

    let listings = prepare_remote_listings(raw, &state.profile.filter, &state.tiers);
    info!("After filter and dedup: {}", listings.len());

    let (today, generated_at) = super::now_stamps();
    let names: Vec<_> = sources.iter().map(|s| s.source()).collect();
    let html = report::render_remote_report(
        &today.format("%Y-%m-%d").to_string(),
        &generated_at,
        &names,
        &listings,
    )?;

    let path = out.unwrap_or_else(|| report::report_path(&state.config.report_dir, "remote", today));
    report::write_report(&path, &html)?;
    Ok(path)
}

/// Filter, dedup, then rank with the remote ordering.
pub fn prepare_remote_listings(
    raw: Vec<JobListing>,
    profile: &FilterProfile,
    tiers: &TierTable,
) -> Vec<JobListing> {
    let mut listings = dedup_listings(filter_listings(raw, profile));
    sort_listings(&mut listings, tiers, true);
    listings
}
