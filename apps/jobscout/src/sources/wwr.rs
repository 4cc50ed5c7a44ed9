//! We Work Remotely category RSS feeds. Item titles read "Company: Role".

use async_trait::async_trait;
use tracing::warn;

use crate::http::{FetchError, HttpFetcher};
use crate::models::{JobListing, Source};
use crate::sources::rss::{parse_feed, pub_date_to_iso};
use crate::sources::JobSource;

const FEED_URLS: &[&str] = &[
    "https://weworkremotely.com/categories/remote-back-end-programming-jobs.rss",
    "https://weworkremotely.com/categories/remote-full-stack-programming-jobs.rss",
];

pub struct WeWorkRemotely {
    http: HttpFetcher,
}

impl WeWorkRemotely {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl JobSource for WeWorkRemotely {
    fn source(&self) -> Source {
        Source::WeWorkRemotely
    }

    /// A broken category feed is skipped; the others still count.
    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError> {
        let mut jobs = Vec::new();
        for url in FEED_URLS {
            match self.http.get_text(url).await.and_then(|body| parse_wwr(&body)) {
                Ok(found) => jobs.extend(found),
                Err(e) => warn!("  We Work Remotely feed {url} error: {e}"),
            }
        }
        Ok(jobs)
    }
}

pub fn parse_wwr(xml: &str) -> Result<Vec<JobListing>, FetchError> {
    Ok(parse_feed(xml)?
        .into_iter()
        .filter(|item| !item.title.trim().is_empty())
        .map(|item| {
            let (company, title) = split_title(&item.title);
            JobListing {
                company,
                title,
                url: item.link.trim().to_string(),
                source: Source::WeWorkRemotely,
                location: item.region.trim().to_string(),
                tags: item.categories.join(", "),
                posted_date: pub_date_to_iso(&item.pub_date),
            }
        })
        .collect())
}

fn split_title(raw: &str) -> (String, String) {
    match raw.split_once(": ") {
        Some((company, title)) => (company.trim().to_string(), title.trim().to_string()),
        None => (String::new(), raw.trim().to_string()),
    }
}
