//! LinkedIn guest search: the public "see more jobs" fragment endpoint.
//!
//! Returns a list of `base-search-card` snippets. The card root is usually a
//! `div` holding a full-card link, but some pages render the card itself as
//! the `<a>`. Cards missing a title, company or link are skipped.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use crate::http::{FetchError, HttpFetcher};
use crate::models::listing::iso_date_prefix;
use crate::models::{JobListing, Source};
use crate::sources::{JobSource, ListingSearch, SearchQuery};

const SEARCH_URL: &str = "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// `f_WT=2` is LinkedIn's "remote" workplace-type filter.
const REMOTE_FILTER: &str = "&f_WT=2";

#[derive(Clone)]
pub struct LinkedInSearch {
    http: HttpFetcher,
    remote_only: bool,
}

impl LinkedInSearch {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            remote_only: false,
        }
    }

    pub fn remote_only(http: HttpFetcher) -> Self {
        Self {
            http,
            remote_only: true,
        }
    }
}

#[async_trait]
impl ListingSearch for LinkedInSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<JobListing>, FetchError> {
        let url = search_url(query, self.remote_only);
        let body = self.http.get_text(&url).await?;
        parse_job_cards(&body)
    }
}

pub fn search_url(query: &SearchQuery, remote_only: bool) -> String {
    let mut url = format!(
        "{SEARCH_URL}?keywords={}&location={}&start=0",
        urlencoding::encode(query.keywords.trim()),
        urlencoding::encode(query.location.trim()),
    );
    if remote_only {
        url.push_str(REMOTE_FILTER);
    }
    url
}

/// Parses the guest search fragment into listings.
pub fn parse_job_cards(html: &str) -> Result<Vec<JobListing>, FetchError> {
    let document = Html::parse_fragment(html);
    let card_sel = selector(".base-search-card")?;
    let title_sel = selector(".base-search-card__title")?;
    let company_sel = selector(".base-search-card__subtitle")?;
    let location_sel = selector(".job-search-card__location")?;
    let link_sel = selector("a[href*='/jobs/view/']")?;
    let time_sel = selector("time")?;

    let jobs = document
        .select(&card_sel)
        .filter_map(|el| {
            let url = job_href(el, &link_sel).map(strip_tracking)?;
            let title = first_text(el, &title_sel)?;
            let company = first_text(el, &company_sel)?;

            Some(JobListing {
                company,
                title,
                url,
                source: Source::LinkedIn,
                location: first_text(el, &location_sel).unwrap_or_default(),
                tags: String::new(),
                posted_date: el
                    .select(&time_sel)
                    .next()
                    .and_then(|t| t.value().attr("datetime"))
                    .map(iso_date_prefix)
                    .unwrap_or_default(),
            })
        })
        .collect();

    Ok(jobs)
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Parse(format!("bad selector '{css}': {e}")))
}

fn job_href<'a>(card: ElementRef<'a>, link_sel: &Selector) -> Option<&'a str> {
    let own = card
        .value()
        .attr("href")
        .filter(|href| card.value().name() == "a" && href.contains("/jobs/view/"));
    own.or_else(|| {
        card.select(link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
    })
}

fn first_text(el: ElementRef<'_>, sel: &Selector) -> Option<String> {
    let text = el.select(sel).next()?.text().collect::<String>();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Drops the `?refId=...&trackingId=...` suffix so the URL is a stable key.
fn strip_tracking(href: &str) -> String {
    href.split('?').next().unwrap_or(href).to_string()
}

/// The LinkedIn remote search as a whole-feed source: runs each query in turn,
/// pausing between them so the guest endpoint does not throttle us.
pub struct LinkedInRemote {
    search: LinkedInSearch,
    queries: Vec<SearchQuery>,
    delay: Duration,
}

impl LinkedInRemote {
    pub fn new(http: HttpFetcher, queries: Vec<SearchQuery>, delay: Duration) -> Self {
        Self {
            search: LinkedInSearch::remote_only(http),
            queries,
            delay,
        }
    }
}

#[async_trait]
impl JobSource for LinkedInRemote {
    fn source(&self) -> Source {
        Source::LinkedIn
    }

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError> {
        let mut jobs = Vec::new();

        for (i, query) in self.queries.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.delay).await;
            }
            match self.search.search(query).await {
                Ok(found) => {
                    info!(
                        "  LinkedIn remote '{}' in '{}': {} results",
                        query.keywords,
                        query.location,
                        found.len()
                    );
                    jobs.extend(found);
                }
                Err(e) => warn!(
                    "  LinkedIn remote error ({}, {}): {e}",
                    query.keywords, query.location
                ),
            }
        }

        Ok(jobs)
    }
}
