//! Jobicy remote jobs RSS feed.

use async_trait::async_trait;

use crate::http::{FetchError, HttpFetcher};
use crate::models::{JobListing, Source};
use crate::sources::rss::{parse_feed, pub_date_to_iso};
use crate::sources::JobSource;

const FEED_URL: &str = "https://jobicy.com/?feed=job_feed&job_categories=dev&job_types=full-time";

pub struct Jobicy {
    http: HttpFetcher,
}

impl Jobicy {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl JobSource for Jobicy {
    fn source(&self) -> Source {
        Source::Jobicy
    }

    async fn fetch(&self) -> Result<Vec<JobListing>, FetchError> {
        let body = self.http.get_text(FEED_URL).await?;
        parse_jobicy(&body)
    }
}

pub fn parse_jobicy(xml: &str) -> Result<Vec<JobListing>, FetchError> {
    Ok(parse_feed(xml)?
        .into_iter()
        .filter(|item| !item.title.trim().is_empty())
        .map(|item| {
            let mut tags = item.categories;
            if !item.job_type.trim().is_empty() {
                tags.push(item.job_type.trim().to_string());
            }

            JobListing {
                company: item.company.trim().to_string(),
                title: item.title.trim().to_string(),
                url: item.link.trim().to_string(),
                source: Source::Jobicy,
                location: item.location.trim().to_string(),
                tags: tags.join(", "),
                posted_date: pub_date_to_iso(&item.pub_date),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jobicy_maps_namespaced_fields() {
        let xml = r#"<rss version="2.0" xmlns:job_listing="https://jobicy.com">
  <channel>
    <item>
      <title>Lead Backend Developer</title>
      <link>https://jobicy.com/jobs/101-lead-backend-developer</link>
      <pubDate>Thu, 15 Oct 2026 10:00:00 +0000</pubDate>
      <category>Dev</category>
      <job_listing:company>Hooli</job_listing:company>
      <job_listing:location>EMEA</job_listing:location>
      <job_listing:job_type>Full-Time</job_listing:job_type>
    </item>
  </channel>
</rss>"#;

        let jobs = parse_jobicy(xml).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Hooli");
        assert_eq!(jobs[0].location, "EMEA");
        assert_eq!(jobs[0].tags, "Dev, Full-Time");
        assert_eq!(jobs[0].posted_date, "2026-10-15");
        assert_eq!(jobs[0].source, Source::Jobicy);
    }
}
