//! Job sources: one fetcher per board, all mapping into `JobListing`.
//!
//! Two seams, both trait objects so the pipelines can be driven by fakes:
//! - `JobSource` for boards that return their whole feed in one go.
//! - `ListingSearch` for query-driven search pages (LinkedIn), used by the
//!   hot-jobs backfill and the remote search.
//!
//! A failing source never fails the run: `collect_all` logs and moves on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::http::FetchError;
use crate::models::{JobListing, Source};

pub mod arbeitnow;
pub mod jobicy;
pub mod linkedin;
pub mod remoteok;
pub mod remotive;
pub mod rss;
pub mod wwr;

/// A keyword/location pair for search-style endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keywords: String,
    pub location: String,
}

impl SearchQuery {
    pub fn new(keywords: &str, location: &str) -> Self {
        Self {
            keywords: keywords.to_string(),
            location: location.to_string(),
        }
    }
}

#[async_trait]
pub trait JobSource: Send + Sync {
    fn source(&self) -> Source;

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError>;
}

#[async_trait]
pub trait ListingSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>, FetchError>;
}

/// Fetches every source in order. A source that errors contributes nothing.
pub async fn collect_all(sources: &[Box<dyn JobSource>]) -> Vec<JobListing> {
    let mut all = Vec::new();

    for source in sources {
        match source.fetch().await {
            Ok(jobs) => {
                info!("{}: {} jobs fetched", source.source(), jobs.len());
                all.extend(jobs);
            }
            Err(e) => warn!("{} error: {e}", source.source()),
        }
    }

    all
}
