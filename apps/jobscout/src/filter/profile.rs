use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Source;

/// How strictly a source's location field is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPolicy {
    /// A `location_include` hit is required.
    #[default]
    Strict,
    /// Empty or generic locations pass when nothing excludes them.
    Relaxed,
    /// The board only lists jobs inside the target region; no location check.
    RegionGuaranteed,
}

/// Keyword and location lists driving `filter_listings`. Matching is
/// case-insensitive substring matching; the lists themselves may use any case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterProfile {
    /// Any hit in title+tags rejects the listing.
    pub exclude_roles: Vec<String>,
    /// Role-defining keywords; one hit is enough.
    pub include_roles: Vec<String>,
    /// Language-only keywords; they count only next to a `role_signals` hit.
    pub weak_roles: Vec<String>,
    pub role_signals: Vec<String>,
    /// Hard location exclusions checked against location+tags.
    pub location_exclude: Vec<String>,
    /// Signals strong enough to rescue a listing from `location_exclude`.
    pub region_override: Vec<String>,
    pub location_include: Vec<String>,
    /// Locations that say nothing about the region ("Remote", "Anywhere").
    pub generic_locations: Vec<String>,
    pub source_policies: HashMap<Source, LocationPolicy>,
}

impl FilterProfile {
    pub fn policy_for(&self, source: Source) -> LocationPolicy {
        self.source_policies
            .get(&source)
            .copied()
            .unwrap_or_default()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for FilterProfile {
    fn default() -> Self {
        Self {
            exclude_roles: strings(&[
                "internship",
                "junior",
                "alternance",
                "apprenti",
                "sales",
                "recruiter",
                "marketing",
                "php",
                "ios developer",
                "android",
            ]),
            include_roles: strings(&[
                "backend",
                "back-end",
                "software engineer",
                "senior software",
                "full stack",
                "fullstack",
                "devops",
                "cloud engineer",
                "platform engineer",
            ]),
            weak_roles: strings(&["java", "python", "kotlin", "spring"]),
            role_signals: strings(&[
                "developer",
                "engineer",
                "programmer",
                "architect",
                "tech lead",
            ]),
            location_exclude: strings(&[
                "us only",
                "usa only",
                "us timezone",
                "us-based",
                "americas only",
                "est/pst",
                "usa",
                "united states",
                "canada",
                "latam",
                "north america",
            ]),
            region_override: strings(&[
                "emea",
                "europe",
                "european union",
                "worldwide",
                "anywhere in the world",
            ]),
            location_include: strings(&[
                "worldwide",
                "anywhere",
                "emea",
                "europe",
                "eu",
                "france",
                "paris",
                "remote",
                "global",
                "uk",
                "germany",
                "netherlands",
            ]),
            generic_locations: strings(&["remote", "anywhere", "worldwide", "global"]),
            source_policies: HashMap::from([
                (Source::LinkedIn, LocationPolicy::RegionGuaranteed),
                (Source::Arbeitnow, LocationPolicy::RegionGuaranteed),
                (Source::Jobicy, LocationPolicy::Relaxed),
                (Source::WeWorkRemotely, LocationPolicy::Relaxed),
                (Source::RemoteOk, LocationPolicy::Strict),
                (Source::Remotive, LocationPolicy::Strict),
            ]),
        }
    }
}
