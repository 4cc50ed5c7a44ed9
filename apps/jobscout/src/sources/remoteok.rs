//! RemoteOK public API. The first array element is a legal/metadata notice.

use async_trait::async_trait;
use serde::Deserialize;

use crate::http::{FetchError, HttpFetcher};
use crate::models::listing::iso_date_prefix;
use crate::models::{JobListing, Source};
use crate::sources::JobSource;

const API_URL: &str = "https://remoteok.com/api";

#[derive(Debug, Deserialize)]
struct RemoteOkItem {
    #[serde(default)]
    company: String,
    #[serde(default)]
    position: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    date: String,
}

pub struct RemoteOk {
    http: HttpFetcher,
}

impl RemoteOk {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl JobSource for RemoteOk {
    fn source(&self) -> Source {
        Source::RemoteOk
    }

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError> {
        let body = self.http.get_text(API_URL).await?;
        parse_remoteok(&body)
    }
}

pub fn parse_remoteok(body: &str) -> Result<Vec<JobListing>, FetchError> {
    let items: Vec<serde_json::Value> = serde_json::from_str(body)?;

    Ok(items
        .into_iter()
        .skip(1)
        .filter_map(|value| serde_json::from_value::<RemoteOkItem>(value).ok())
        .filter(|item| !item.position.trim().is_empty())
        .map(|item| JobListing {
            company: item.company.trim().to_string(),
            title: item.position.trim().to_string(),
            url: item.url,
            source: Source::RemoteOk,
            location: if item.location.trim().is_empty() {
                "Remote".to_string()
            } else {
                item.location.trim().to_string()
            },
            tags: item.tags.join(", "),
            posted_date: iso_date_prefix(&item.date),
        })
        .collect())
}
