use askama::Template;

use crate::models::{JobListing, Source};

#[derive(Template)]
#[template(path = "remote_report.html")]
struct RemoteReportTemplate {
    date: String,
    generated_at: String,
    sources: String,
    rows: Vec<RemoteRowView>,
}

struct RemoteRowView {
    company: String,
    title: String,
    url: String,
    source: String,
    location: String,
    tags: String,
    posted_date: String,
}

/// Remote report over already filtered, deduplicated and sorted listings.
pub fn render_remote_report(
    date: &str,
    generated_at: &str,
    sources: &[Source],
    listings: &[JobListing],
) -> Result<String, askama::Error> {
    RemoteReportTemplate {
        date: date.to_string(),
        generated_at: generated_at.to_string(),
        sources: sources
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", "),
        rows: listings
            .iter()
            .map(|job| RemoteRowView {
                company: job.company.clone(),
                title: job.title.clone(),
                url: job.url.clone(),
                source: job.source.to_string(),
                location: job.location.clone(),
                tags: job.tags.clone(),
                posted_date: job.posted_date.clone(),
            })
            .collect(),
    }
    .render()
}
