//! Remotive public API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::http::{FetchError, HttpFetcher};
use crate::models::listing::iso_date_prefix;
use crate::models::{JobListing, Source};
use crate::sources::JobSource;

const API_URL: &str = "https://remotive.com/api/remote-jobs";

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    candidate_required_location: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    publication_date: String,
}

pub struct Remotive {
    http: HttpFetcher,
}

impl Remotive {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl JobSource for Remotive {
    fn source(&self) -> Source {
        Source::Remotive
    }

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError> {
        let body = self.http.get_text(API_URL).await?;
        parse_remotive(&body)
    }
}

pub fn parse_remotive(body: &str) -> Result<Vec<JobListing>, FetchError> {
    let response: RemotiveResponse = serde_json::from_str(body)?;

    Ok(response
        .jobs
        .into_iter()
        .map(|job| {
            let mut tags = vec![job.category];
            tags.extend(job.tags);
            tags.retain(|t| !t.trim().is_empty());

            JobListing {
                company: job.company_name.trim().to_string(),
                title: job.title.trim().to_string(),
                url: job.url,
                source: Source::Remotive,
                location: if job.candidate_required_location.trim().is_empty() {
                    "Remote".to_string()
                } else {
                    job.candidate_required_location.trim().to_string()
                },
                tags: tags.join(", "),
                posted_date: iso_date_prefix(&job.publication_date),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remotive_maps_fields() {
        let body = r#"{
            "job-count": 1,
            "jobs": [{
                "id": 1,
                "company_name": "Initech",
                "title": "Java Software Engineer",
                "url": "https://remotive.com/remote-jobs/software-dev/1",
                "candidate_required_location": "Europe, UK",
                "category": "Software Development",
                "tags": ["java", "spring"],
                "publication_date": "2026-10-14T12:00:00"
            }]
        }"#;

        let jobs = parse_remotive(body).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Initech");
        assert_eq!(jobs[0].location, "Europe, UK");
        assert_eq!(jobs[0].tags, "Software Development, java, spring");
        assert_eq!(jobs[0].posted_date, "2026-10-14");
    }

    #[test]
    fn test_parse_remotive_defaults_location() {
        let body = r#"{"jobs": [{"company_name": "A", "title": "Dev", "url": "u"}]}"#;
        let jobs = parse_remotive(body).unwrap();
        assert_eq!(jobs[0].location, "Remote");
        assert!(jobs[0].tags.is_empty());
    }
}
