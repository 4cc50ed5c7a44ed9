use askama::Template;

use crate::models::JobListing;
use crate::ranking::TierTable;
use crate::report::plural;

#[derive(Template)]
#[template(path = "hot_jobs.html")]
struct HotJobsTemplate {
    total_label: String,
    categories: Vec<HotCategoryView>,
}

struct HotCategoryView {
    name: String,
    count_label: String,
    rows: Vec<HotRowView>,
}

struct HotRowView {
    company: String,
    title: String,
    url: String,
    badge: String,
    location: String,
}

/// The hot-jobs block embedded in the daily report. Empty when there are no
/// listings.
pub fn render_hot_jobs_section(
    categories: &[(&str, &[JobListing])],
    tiers: &TierTable,
) -> Result<String, askama::Error> {
    let total: usize = categories.iter().map(|(_, jobs)| jobs.len()).sum();
    let template = HotJobsTemplate {
        total_label: plural(total, "New Listing"),
        categories: categories
            .iter()
            .filter(|(_, jobs)| !jobs.is_empty())
            .map(|(name, jobs)| HotCategoryView {
                name: name.to_string(),
                count_label: plural(jobs.len(), "job"),
                rows: jobs
                    .iter()
                    .map(|job| HotRowView {
                        company: job.company.clone(),
                        title: job.title.clone(),
                        url: job.url.clone(),
                        badge: tiers.tier_for(&job.location).badge.clone(),
                        location: job.location.clone(),
                    })
                    .collect(),
            })
            .collect(),
    };
    template.render()
}
