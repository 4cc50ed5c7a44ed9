//! Sticky hot jobs: each category keeps the same listings across runs until
//! the company shows up in the tracker or the user removes the listing.
//! Only vacated slots are backfilled from the search.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::JobListing;
use crate::ranking::{sort_by_tier, TierTable};
use crate::sources::{ListingSearch, SearchQuery};

pub mod store;

pub use store::{BlockKey, StickyState, StickyStore, CAPACITY};

/// A named category and the searches that feed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotJobCategory {
    pub name: String,
    pub queries: Vec<SearchQuery>,
}

/// Tracker company names, lowercased, for the either-way substring test.
#[derive(Debug, Clone, Default)]
pub struct CompanyMatcher {
    names: Vec<String>,
}

impl CompanyMatcher {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn is_tracked(&self, company: &str) -> bool {
        let company = company.trim().to_lowercase();
        if company.is_empty() {
            return false;
        }
        self.names
            .iter()
            .any(|t| t.contains(company.as_str()) || company.contains(t.as_str()))
    }
}

pub struct Reconciler<'a> {
    search: &'a dyn ListingSearch,
    tiers: &'a TierTable,
    query_delay: Duration,
}

impl<'a> Reconciler<'a> {
    pub fn new(search: &'a dyn ListingSearch, tiers: &'a TierTable, query_delay: Duration) -> Self {
        Self {
            search,
            tiers,
            query_delay,
        }
    }

    /// Reconciles every configured category in `state`. Categories that are no
    /// longer configured, or that end up empty, are dropped. The blocklist is
    /// left as is.
    pub async fn reconcile_all(
        &self,
        state: &mut StickyState,
        categories: &[HotJobCategory],
        tracker: &CompanyMatcher,
    ) {
        let mut previous = std::mem::take(&mut state.current_jobs);
        let mut next = BTreeMap::new();

        for category in categories {
            let existing = previous.remove(&category.name).unwrap_or_default();
            let kept = self
                .reconcile_category(category, existing, tracker, state)
                .await;
            if !kept.is_empty() {
                next.insert(category.name.clone(), kept);
            }
        }

        state.current_jobs = next;
    }

    async fn reconcile_category(
        &self,
        category: &HotJobCategory,
        existing: Vec<JobListing>,
        tracker: &CompanyMatcher,
        state: &StickyState,
    ) -> Vec<JobListing> {
        let name = &category.name;
        let mut kept: Vec<JobListing> = existing
            .into_iter()
            .filter(|job| {
                let tracked = tracker.is_tracked(&job.company);
                if tracked {
                    info!("  [{name}] Removed '{}' (now in tracker)", job.company);
                }
                !tracked
            })
            .collect();
        kept.truncate(CAPACITY);

        let deficit = CAPACITY - kept.len();
        if deficit == 0 {
            info!("  [{name}] All {CAPACITY} slots filled, no fetch needed");
            return kept;
        }

        info!(
            "  [{name}] {} kept, need {deficit} more, searching...",
            kept.len()
        );

        let mut seen_urls: HashSet<String> = kept.iter().map(|j| j.url.clone()).collect();
        let mut seen_keys: HashSet<(String, String)> = kept.iter().map(JobListing::dedup_key).collect();
        let mut candidates = Vec::new();

        for (i, query) in category.queries.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.query_delay).await;
            }

            let found = match self.search.search(query).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(
                        "    [{name}] search '{}' in '{}' failed: {e}",
                        query.keywords, query.location
                    );
                    continue;
                }
            };
            info!(
                "    '{}' in '{}': {} results",
                query.keywords,
                query.location,
                found.len()
            );

            for job in found {
                if seen_urls.contains(&job.url)
                    || seen_keys.contains(&job.dedup_key())
                    || tracker.is_tracked(&job.company)
                    || state.is_blocklisted(&job.company, &job.title)
                {
                    continue;
                }
                seen_urls.insert(job.url.clone());
                seen_keys.insert(job.dedup_key());
                candidates.push(job);
            }
        }

        sort_by_tier(&mut candidates, self.tiers);
        kept.extend(candidates.into_iter().take(deficit));
        kept
    }
}

/// Removes every listing matching `company` and `role` from all categories
/// and blocklists the pair. Returns the categories something was removed from.
pub fn remove_listing(state: &mut StickyState, company: &str, role: &str) -> Vec<String> {
    let company = company.trim().to_lowercase();
    let role = role.trim().to_lowercase();
    let mut touched = Vec::new();

    for (category, jobs) in state.current_jobs.iter_mut() {
        let before = jobs.len();
        jobs.retain(|job| {
            !(job.company.to_lowercase().contains(&company)
                && job.title.to_lowercase().contains(&role))
        });
        if jobs.len() < before {
            touched.push(category.clone());
        }
    }

    if !company.is_empty() {
        state.blocklist.insert(BlockKey::new(&company, &role));
    }
    touched
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    ClearedAll,
    Cleared(String),
    NotFound { available: Vec<String> },
}

/// Clears one category, or all of them when `category` is `None`.
pub fn refresh(state: &mut StickyState, category: Option<&str>) -> RefreshOutcome {
    match category {
        None => {
            state.current_jobs.clear();
            RefreshOutcome::ClearedAll
        }
        Some(name) => {
            if state.current_jobs.remove(name).is_some() {
                RefreshOutcome::Cleared(name.to_string())
            } else {
                RefreshOutcome::NotFound {
                    available: state.current_jobs.keys().cloned().collect(),
                }
            }
        }
    }
}

/// Current listings in configured category order, empty categories skipped.
pub fn ordered<'s>(
    state: &'s StickyState,
    categories: &[HotJobCategory],
) -> Vec<(&'s str, &'s [JobListing])> {
    categories
        .iter()
        .filter_map(|c| {
            let (name, jobs) = state.current_jobs.get_key_value(&c.name)?;
            (!jobs.is_empty()).then_some((name.as_str(), jobs.as_slice()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::http::FetchError;
    use crate::models::Source;

    fn listing(company: &str, title: &str, location: &str) -> JobListing {
        JobListing {
            company: company.to_string(),
            title: title.to_string(),
            url: format!(
                "https://www.linkedin.com/jobs/view/{}-{}",
                company.to_lowercase().replace(' ', "-"),
                title.to_lowercase().replace(' ', "-")
            ),
            source: Source::LinkedIn,
            location: location.to_string(),
            tags: String::new(),
            posted_date: String::new(),
        }
    }

    fn tiers() -> TierTable {
        TierTable::for_home("Paris", "France", &[], &["europe".to_string()])
    }

    /// Returns the same canned results for every query and counts calls.
    struct FakeSearch {
        results: Vec<JobListing>,
        calls: AtomicUsize,
    }

    impl FakeSearch {
        fn new(results: Vec<JobListing>) -> Self {
            Self {
                results,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ListingSearch for FakeSearch {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<JobListing>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl ListingSearch for FailingSearch {
        async fn search(&self, _query: &SearchQuery) -> Result<Vec<JobListing>, FetchError> {
            Err(FetchError::Status {
                status: 429,
                url: "https://www.linkedin.com".to_string(),
            })
        }
    }

    fn senior_java() -> Vec<HotJobCategory> {
        vec![HotJobCategory {
            name: "SeniorJava".to_string(),
            queries: vec![SearchQuery::new("senior java developer", "Paris, France")],
        }]
    }

    fn five_listings() -> Vec<JobListing> {
        vec![
            listing("Acme", "Senior Java Developer", "Paris"),
            listing("Globex", "Java Engineer", "Lyon, France"),
            listing("Initech", "Backend Java", "Paris"),
            listing("Hooli", "Java Lead", "Berlin, Europe"),
            listing("Umbrella", "Java Developer", "Paris"),
        ]
    }

    #[tokio::test]
    async fn test_tracked_company_is_replaced_by_one_backfill() {
        let search = FakeSearch::new(vec![
            listing("Stark Industries", "Java Developer", "Tokyo"),
            listing("Wayne Enterprises", "Java Developer", "Paris, France"),
            listing("Acme", "Senior Java Developer", "Paris"),
        ]);
        let tiers = tiers();
        let reconciler = Reconciler::new(&search, &tiers, Duration::ZERO);

        let mut state = StickyState::default();
        state
            .current_jobs
            .insert("SeniorJava".to_string(), five_listings());
        let tracker = CompanyMatcher::new(["globex corporation"]);

        reconciler
            .reconcile_all(&mut state, &senior_java(), &tracker)
            .await;

        let jobs = &state.current_jobs["SeniorJava"];
        assert_eq!(jobs.len(), 5);
        assert_eq!(search.calls(), 1);
        let companies: Vec<_> = jobs.iter().map(|j| j.company.as_str()).collect();
        assert_eq!(
            companies,
            vec!["Acme", "Initech", "Hooli", "Umbrella", "Wayne Enterprises"]
        );
    }

    #[tokio::test]
    async fn test_full_category_does_not_search() {
        let search = FakeSearch::new(vec![listing("Stark", "Java Developer", "Paris")]);
        let tiers = tiers();
        let reconciler = Reconciler::new(&search, &tiers, Duration::ZERO);

        let mut state = StickyState::default();
        state
            .current_jobs
            .insert("SeniorJava".to_string(), five_listings());

        reconciler
            .reconcile_all(&mut state, &senior_java(), &CompanyMatcher::default())
            .await;

        assert_eq!(search.calls(), 0);
        assert_eq!(state.current_jobs["SeniorJava"], five_listings());
    }

    #[tokio::test]
    async fn test_blocklisted_pair_never_backfills() {
        let search = FakeSearch::new(vec![
            listing("Stark", "Senior Java Developer", "Paris"),
            listing("Stark", "Product Owner", "Paris"),
            listing("Wayne", "Java Developer", "Paris"),
        ]);
        let tiers = tiers();
        let reconciler = Reconciler::new(&search, &tiers, Duration::ZERO);

        let mut state = StickyState::default();
        state.blocklist.insert(BlockKey::new("stark", "java"));

        reconciler
            .reconcile_all(&mut state, &senior_java(), &CompanyMatcher::default())
            .await;

        let jobs = &state.current_jobs["SeniorJava"];
        assert!(jobs
            .iter()
            .all(|j| !(j.company == "Stark" && j.title.contains("Java"))));
        assert_eq!(jobs.len(), 2);
        assert_eq!(state.blocklist.len(), 1);
    }

    #[tokio::test]
    async fn test_capacity_and_tracker_hold_after_reconcile() {
        let many: Vec<_> = (0..12)
            .map(|i| listing(&format!("Company {i}"), "Java Developer", "Remote"))
            .collect();
        let search = FakeSearch::new(many);
        let tiers = tiers();
        let reconciler = Reconciler::new(&search, &tiers, Duration::ZERO);
        let categories = vec![
            HotJobCategory {
                name: "A".to_string(),
                queries: vec![
                    SearchQuery::new("java", "Paris"),
                    SearchQuery::new("java", "France"),
                ],
            },
            HotJobCategory {
                name: "B".to_string(),
                queries: vec![SearchQuery::new("kotlin", "Paris")],
            },
        ];
        let tracker = CompanyMatcher::new(["Company 1", "  "]);

        let mut state = StickyState::default();
        reconciler
            .reconcile_all(&mut state, &categories, &tracker)
            .await;

        for jobs in state.current_jobs.values() {
            assert!(jobs.len() <= CAPACITY);
            assert!(jobs.iter().all(|j| !tracker.is_tracked(&j.company)));
        }
        // "company 1" also matches "Company 10" and "Company 11".
        assert_eq!(state.current_jobs["A"][0].company, "Company 0");
        assert_eq!(state.current_jobs["A"][1].company, "Company 2");
    }

    #[tokio::test]
    async fn test_failed_search_leaves_slots_empty() {
        let tiers = tiers();
        let reconciler = Reconciler::new(&FailingSearch, &tiers, Duration::ZERO);

        let mut state = StickyState::default();
        state.current_jobs.insert(
            "SeniorJava".to_string(),
            vec![listing("Acme", "Java Developer", "Paris")],
        );

        reconciler
            .reconcile_all(&mut state, &senior_java(), &CompanyMatcher::default())
            .await;

        assert_eq!(state.current_jobs["SeniorJava"].len(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_category_is_dropped() {
        let search = FakeSearch::new(Vec::new());
        let tiers = tiers();
        let reconciler = Reconciler::new(&search, &tiers, Duration::ZERO);

        let mut state = StickyState::default();
        state.current_jobs.insert(
            "Retired".to_string(),
            vec![listing("Acme", "Java Developer", "Paris")],
        );

        reconciler
            .reconcile_all(&mut state, &senior_java(), &CompanyMatcher::default())
            .await;

        assert!(state.current_jobs.is_empty());
    }

    #[test]
    fn test_empty_company_never_tracked() {
        let matcher = CompanyMatcher::new(["Acme", ""]);
        assert!(!matcher.is_tracked(""));
        assert!(!matcher.is_tracked("   "));
        assert!(matcher.is_tracked("ACME SAS"));
        assert!(matcher.is_tracked("acm"));
    }

    #[test]
    fn test_remove_listing_blocklists_even_when_absent() {
        let mut state = StickyState::default();
        state.current_jobs.insert(
            "SeniorJava".to_string(),
            vec![
                listing("Acme", "Senior Java Developer", "Paris"),
                listing("Acme", "Product Owner", "Paris"),
            ],
        );
        state.current_jobs.insert(
            "Backend".to_string(),
            vec![listing("Acme Corp", "Java Backend Developer", "Paris")],
        );

        let touched = remove_listing(&mut state, "  ACME ", "Java ");

        assert_eq!(touched, vec!["Backend".to_string(), "SeniorJava".to_string()]);
        assert_eq!(state.current_jobs["SeniorJava"].len(), 1);
        assert!(state.current_jobs["Backend"].is_empty());
        assert!(state.blocklist.contains(&BlockKey::new("acme", "java")));

        let touched = remove_listing(&mut state, "Nobody", "Anything");
        assert!(touched.is_empty());
        assert_eq!(state.blocklist.len(), 2);
    }

    #[test]
    fn test_refresh_variants() {
        let mut state = StickyState::default();
        state.current_jobs.insert("A".to_string(), vec![]);
        state.current_jobs.insert("B".to_string(), vec![]);

        assert_eq!(
            refresh(&mut state, Some("Z")),
            RefreshOutcome::NotFound {
                available: vec!["A".to_string(), "B".to_string()]
            }
        );
        assert_eq!(
            refresh(&mut state, Some("A")),
            RefreshOutcome::Cleared("A".to_string())
        );
        assert_eq!(refresh(&mut state, None), RefreshOutcome::ClearedAll);
        assert!(state.current_jobs.is_empty());
    }
}
