//! Arbeitnow job board API (EU-focused). Only remote postings are kept.

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use crate::http::{FetchError, HttpFetcher};
use crate::models::listing::iso_date_prefix;
use crate::models::{JobListing, Source};
use crate::sources::JobSource;

const API_URL: &str = "https://www.arbeitnow.com/api/job-board-api";

#[derive(Debug, Deserialize)]
struct ArbeitnowResponse {
    #[serde(default)]
    data: Vec<ArbeitnowJob>,
}

#[derive(Debug, Deserialize)]
struct ArbeitnowJob {
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    remote: bool,
    #[serde(default)]
    location: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    created_at: Option<CreatedAt>,
}

/// `created_at` is a unix timestamp today but has been a date string before.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CreatedAt {
    Unix(i64),
    Text(String),
}

impl CreatedAt {
    fn to_iso_date(&self) -> String {
        match self {
            CreatedAt::Unix(secs) => DateTime::from_timestamp(*secs, 0)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            CreatedAt::Text(text) => iso_date_prefix(text),
        }
    }
}

pub struct Arbeitnow {
    http: HttpFetcher,
}

impl Arbeitnow {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl JobSource for Arbeitnow {
    fn source(&self) -> Source {
        Source::Arbeitnow
    }

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError> {
        let body = self.http.get_text(API_URL).await?;
        parse_arbeitnow(&body)
    }
}

pub fn parse_arbeitnow(body: &str) -> Result<Vec<JobListing>, FetchError> {
    let response: ArbeitnowResponse = serde_json::from_str(body)?;

    Ok(response
        .data
        .into_iter()
        .filter(|job| job.remote)
        .map(|job| JobListing {
            company: job.company_name.trim().to_string(),
            title: job.title.trim().to_string(),
            url: job.url,
            source: Source::Arbeitnow,
            location: if job.location.trim().is_empty() {
                "Remote".to_string()
            } else {
                job.location.trim().to_string()
            },
            tags: job.tags.join(", "),
            posted_date: job
                .created_at
                .as_ref()
                .map(CreatedAt::to_iso_date)
                .unwrap_or_default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arbeitnow_keeps_only_remote() {
        let body = r#"{
            "data": [
                {
                    "slug": "a",
                    "company_name": "Umbrella GmbH",
                    "title": "Senior Java Developer",
                    "remote": true,
                    "url": "https://www.arbeitnow.com/jobs/a",
                    "tags": ["Java", "Spring"],
                    "location": "Berlin",
                    "created_at": 1760572800
                },
                {
                    "slug": "b",
                    "company_name": "Onsite AG",
                    "title": "Backend Engineer",
                    "remote": false,
                    "url": "https://www.arbeitnow.com/jobs/b",
                    "tags": [],
                    "location": "Munich",
                    "created_at": 1760572800
                }
            ],
            "links": {},
            "meta": {}
        }"#;

        let jobs = parse_arbeitnow(body).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Umbrella GmbH");
        assert_eq!(jobs[0].tags, "Java, Spring");
        assert_eq!(jobs[0].posted_date, "2025-10-16");
    }

    #[test]
    fn test_parse_arbeitnow_string_created_at() {
        let body = r#"{"data": [{
            "company_name": "A", "title": "Dev", "remote": true, "url": "u",
            "created_at": "2026-10-01 10:00:00"
        }]}"#;
        let jobs = parse_arbeitnow(body).unwrap();
        assert_eq!(jobs[0].posted_date, "2026-10-01");
        assert_eq!(jobs[0].location, "Remote");
    }
}
