//! The daily report: tracker stats, the hot-jobs block, then one table per
//! role category.

use askama::Template;

use crate::models::{StatusKind, TrackerEntry};
use crate::profile::SearchProfile;
use crate::report::LinkView;
use crate::tracker::TrackerTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub not_contacted: usize,
    pub applied: usize,
    pub no_jobs: usize,
    pub review: usize,
    pub progress: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn from_tracker(tracker: &TrackerTable) -> Self {
        let mut counts = Self {
            total: tracker.len(),
            ..Self::default()
        };
        for entry in tracker.iter() {
            match entry.status_kind() {
                StatusKind::Uncategorized => counts.not_contacted += 1,
                StatusKind::Applied => counts.applied += 1,
                StatusKind::NoJobs => counts.no_jobs += 1,
                StatusKind::Review => counts.review += 1,
                StatusKind::Progress => counts.progress += 1,
                StatusKind::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

#[derive(Template)]
#[template(path = "daily_report.html")]
struct DailyReportTemplate {
    date: String,
    generated_at: String,
    home: String,
    stats: StatusCounts,
    hot_section: String,
    categories: Vec<RoleCategoryView>,
}

struct RoleCategoryView {
    name: String,
    short_name: String,
    rows: Vec<CompanyRowView>,
    platforms: Vec<PlatformView>,
}

struct CompanyRowView {
    /// Section title when this row starts a new status group, else empty.
    section: String,
    company: String,
    status_label: String,
    status_class: String,
    role: String,
    role_link: String,
    hr_contacts: Vec<LinkView>,
    search_links: Vec<LinkView>,
}

struct PlatformView {
    name: String,
    links: Vec<LinkView>,
}

/// Inputs of the daily report besides the tracker.
pub struct DailyReportInput<'a> {
    pub date: String,
    pub generated_at: String,
    pub home_city: &'a str,
    pub home_country: &'a str,
    pub hot_section: String,
}

pub fn render_daily_report(
    input: DailyReportInput<'_>,
    tracker: &TrackerTable,
    profile: &SearchProfile,
) -> Result<String, askama::Error> {
    let categories = tracker
        .by_category(&profile.role_categories)
        .into_iter()
        .map(|(name, entries)| RoleCategoryView {
            short_name: name.split(" - ").next().unwrap_or(&name).to_string(),
            rows: company_rows(entries, input.home_city),
            platforms: profile
                .aggregators_for(&name)
                .iter()
                .map(|p| PlatformView {
                    name: p.name.clone(),
                    links: p
                        .links
                        .iter()
                        .map(|l| LinkView::new(l.label.clone(), l.url.clone()))
                        .collect(),
                })
                .collect(),
            name,
        })
        .collect();

    DailyReportTemplate {
        date: input.date,
        generated_at: input.generated_at,
        home: format!("{}/{}", input.home_city, input.home_country),
        stats: StatusCounts::from_tracker(tracker),
        hot_section: input.hot_section,
        categories,
    }
    .render()
}

/// Sorted by status display order then company name, with a section title on
/// the first row of each status group.
fn company_rows(mut entries: Vec<&TrackerEntry>, city: &str) -> Vec<CompanyRowView> {
    entries.sort_by(|a, b| {
        a.status_kind()
            .display_rank()
            .cmp(&b.status_kind().display_rank())
            .then_with(|| a.company.cmp(&b.company))
    });

    let mut previous: Option<StatusKind> = None;
    entries
        .into_iter()
        .map(|entry| {
            let kind = entry.status_kind();
            let section = if previous == Some(kind) {
                String::new()
            } else {
                kind.section_title().to_string()
            };
            previous = Some(kind);

            CompanyRowView {
                section,
                company: entry.company.clone(),
                status_label: kind.label().to_string(),
                status_class: kind.css_class().to_string(),
                role: if entry.role.is_empty() {
                    "Various".to_string()
                } else {
                    entry.role.clone()
                },
                role_link: entry.role_link.clone(),
                hr_contacts: entry
                    .hr_contacts
                    .iter()
                    .map(|c| LinkView::new(c.name.clone(), c.url.clone()))
                    .collect(),
                search_links: search_links(&entry.company, city),
            }
        })
        .collect()
}

/// Web search, LinkedIn company page and Welcome to the Jungle for a company.
pub fn search_links(company: &str, city: &str) -> Vec<LinkView> {
    let slug = company.trim().to_lowercase().replace(' ', "-");
    vec![
        LinkView::new(
            "Search",
            format!(
                "https://www.google.com/search?q={}",
                urlencoding::encode(&format!("{company} careers {city}"))
            ),
        ),
        LinkView::new(
            "LinkedIn",
            format!(
                "https://www.linkedin.com/company/{}/jobs",
                urlencoding::encode(&slug)
            ),
        ),
        LinkView::new(
            "WTTJ",
            format!(
                "https://www.welcometothejungle.com/fr/jobs?query={}",
                urlencoding::encode(company)
            ),
        ),
    ]
}
