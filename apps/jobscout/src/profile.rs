//! Search profile: everything about *what* to look for, as opposed to the
//! runtime `Config`. Defaults are built around the home city and country;
//! an optional JSON file replaces any top-level key it names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::filter::FilterProfile;
use crate::hot_jobs::HotJobCategory;
use crate::ranking::TierTable;
use crate::sources::SearchQuery;
use crate::tracker::categories::{self, CategoryRule};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub links: Vec<LinkSpec>,
}

/// Job-board shortcuts listed under a role category in the daily report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorGroup {
    pub category: String,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProfile {
    pub filter: FilterProfile,
    /// Location fragments ranked as the wider region (third tier).
    pub region_locations: Vec<String>,
    /// Other names for the home country, ranked with it.
    pub home_country_aliases: Vec<String>,
    pub hot_job_categories: Vec<HotJobCategory>,
    pub remote_linkedin_queries: Vec<SearchQuery>,
    pub role_categories: Vec<CategoryRule>,
    pub aggregators: Vec<AggregatorGroup>,
}

impl SearchProfile {
    pub fn for_home(city: &str, country: &str) -> Self {
        Self {
            filter: FilterProfile::default(),
            region_locations: strings(&[
                "europe",
                "emea",
                "germany",
                "netherlands",
                "belgium",
                "spain",
                "italy",
                "switzerland",
                "uk",
                "united kingdom",
                "ireland",
                "sweden",
                "denmark",
                "portugal",
                "austria",
                "poland",
            ]),
            home_country_aliases: strings(&["île-de-france", "ile-de-france"]),
            hot_job_categories: default_hot_job_categories(city, country),
            remote_linkedin_queries: vec![
                SearchQuery::new("senior java developer", "European Union"),
                SearchQuery::new("backend engineer java", "European Union"),
            ],
            role_categories: categories::default_rules(),
            aggregators: default_aggregators(city, country),
        }
    }

    /// Reads the profile at `path` over the home defaults. Without a path the
    /// defaults are returned as they are.
    pub fn load(path: Option<&Path>, city: &str, country: &str) -> Result<Self, AppError> {
        let defaults = Self::for_home(city, country);
        let Some(path) = path else {
            return Ok(defaults);
        };

        let raw = std::fs::read_to_string(path)?;
        let overrides: Map<String, Value> = serde_json::from_str(&raw)?;
        let mut merged = serde_json::to_value(&defaults)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        let profile = serde_json::from_value(merged)?;
        info!("Loaded search profile from {}", path.display());
        Ok(profile)
    }

    pub fn tier_table(&self, city: &str, country: &str) -> TierTable {
        TierTable::for_home(
            city,
            country,
            &self.home_country_aliases,
            &self.region_locations,
        )
    }

    pub fn aggregators_for(&self, category: &str) -> &[Platform] {
        self.aggregators
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.platforms.as_slice())
            .unwrap_or(&[])
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn category(name: &str, queries: &[(&str, &str)]) -> HotJobCategory {
    HotJobCategory {
        name: name.to_string(),
        queries: queries
            .iter()
            .map(|(keywords, location)| SearchQuery::new(keywords, location))
            .collect(),
    }
}

fn default_hot_job_categories(city: &str, country: &str) -> Vec<HotJobCategory> {
    let local = format!("{city}, {country}");
    let local = local.as_str();
    vec![
        category(
            "Senior Java",
            &[
                ("senior java developer", local),
                ("senior java developer", country),
                ("senior software engineer java", local),
            ],
        ),
        category(
            "Backend Java",
            &[
                ("backend java developer", local),
                ("lead backend engineer", country),
            ],
        ),
        category(
            "Product Owner",
            &[("product owner", local), ("product owner", country)],
        ),
        category(
            "Assistant Project Manager",
            &[
                ("assistant project manager", local),
                ("assistant project manager", country),
                ("assistant project manager java", local),
                ("assistant project manager java", country),
            ],
        ),
    ]
}

fn platform(name: &str, links: &[(String, String)]) -> Platform {
    Platform {
        name: name.to_string(),
        links: links
            .iter()
            .map(|(label, url)| LinkSpec {
                label: label.clone(),
                url: url.clone(),
            })
            .collect(),
    }
}

fn default_aggregators(city: &str, country: &str) -> Vec<AggregatorGroup> {
    let wttj = |query: &str| {
        format!(
            "https://www.welcometothejungle.com/fr/jobs?query={query}&aroundQuery={}",
            urlencoding::encode(city)
        )
    };

    vec![
        AggregatorGroup {
            category: categories::SENIOR_JAVA.to_string(),
            platforms: vec![
                platform(
                    "Glassdoor",
                    &[
                        (format!("Senior Java {city}"), "https://www.glassdoor.com/Job/paris-senior-java-developer-jobs-SRCH_IL.0,5_IC2881970_KO6,27.htm".to_string()),
                        (format!("Senior Java {country}"), "https://www.glassdoor.com/Job/france-senior-software-engineer-java-developer-jobs-SRCH_IL.0,6_IN86_KO7,46.htm".to_string()),
                    ],
                ),
                platform(
                    "LinkedIn",
                    &[(format!("Senior Java {city}"), "https://www.linkedin.com/jobs/java-software-engineer-jobs-paris".to_string())],
                ),
                platform(
                    "EnglishJobs.fr",
                    &[(format!("Senior Java {country}"), "https://englishjobs.fr/in/paris/java".to_string())],
                ),
                platform(
                    "WelcomeToTheJungle",
                    &[(format!("Senior Java {city} (FR)"), wttj("java"))],
                ),
            ],
        },
        AggregatorGroup {
            category: categories::BACKEND_JAVA.to_string(),
            platforms: vec![
                platform(
                    "Glassdoor",
                    &[(format!("Lead Java {city}"), "https://www.glassdoor.com/Job/paris-lead-java-developer-jobs-SRCH_IL.0,5_IC2881970_KO6,25.htm".to_string())],
                ),
                platform(
                    "EnglishJobs.fr",
                    &[(format!("Backend Developer {country}"), "https://englishjobs.fr/jobs/backend_developer".to_string())],
                ),
                platform(
                    "WelcomeToTheJungle",
                    &[(format!("Backend Java {city} (FR)"), wttj("backend+java"))],
                ),
            ],
        },
        AggregatorGroup {
            category: categories::PRODUCT_OWNER.to_string(),
            platforms: vec![
                platform(
                    "Glassdoor",
                    &[(format!("PO {city}"), "https://www.glassdoor.com/Job/paris-product-owner-jobs-SRCH_IL.0,5_IC2881970_KO6,19.htm".to_string())],
                ),
                platform(
                    "LinkedIn",
                    &[(format!("PO {city}"), "https://www.linkedin.com/jobs/product-owner-jobs-paris".to_string())],
                ),
                platform(
                    "WelcomeToTheJungle",
                    &[(format!("Product Owner {city} (FR)"), wttj("product+owner"))],
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_gives_defaults() {
        let profile = SearchProfile::load(None, "Paris", "France").unwrap();
        assert_eq!(profile.hot_job_categories.len(), 4);
        assert_eq!(profile.hot_job_categories[0].name, "Senior Java");
        assert_eq!(profile.aggregators_for(categories::PRODUCT_OWNER).len(), 3);
        assert!(profile.aggregators_for("Unknown").is_empty());
    }

    #[test]
    fn test_partial_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(
            &path,
            r#"{
  "hot_job_categories": [
    {"name": "Rust", "queries": [{"keywords": "rust engineer", "location": "Lyon"}]}
  ],
  "filter": {"include_roles": ["rust"]}
}"#,
        )
        .unwrap();

        let profile = SearchProfile::load(Some(&path), "Paris", "France").unwrap();

        assert_eq!(profile.hot_job_categories.len(), 1);
        assert_eq!(profile.hot_job_categories[0].queries[0].location, "Lyon");
        assert_eq!(profile.filter.include_roles, vec!["rust".to_string()]);
        assert_eq!(
            profile.filter.exclude_roles,
            FilterProfile::default().exclude_roles
        );
        assert_eq!(profile.region_locations.len(), 16);
    }

    #[test]
    fn test_malformed_file_is_profile_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = SearchProfile::load(Some(&path), "Paris", "France").unwrap_err();
        assert!(matches!(err, AppError::Profile(_)));
    }

    #[test]
    fn test_defaults_follow_home_location() {
        let profile = SearchProfile::for_home("Lyon", "France");

        let labels: Vec<&str> = profile
            .aggregators_for(categories::SENIOR_JAVA)
            .iter()
            .flat_map(|p| p.links.iter().map(|l| l.label.as_str()))
            .collect();
        assert!(labels.contains(&"Senior Java Lyon"));
        assert!(labels.contains(&"Senior Java France"));
        assert!(!labels.iter().any(|l| l.contains("Paris")));

        let wttj = &profile.aggregators_for(categories::PRODUCT_OWNER)[2].links[0];
        assert_eq!(wttj.label, "Product Owner Lyon (FR)");
        assert!(wttj.url.ends_with("query=product+owner&aroundQuery=Lyon"));

        assert_eq!(profile.hot_job_categories[0].queries[0].location, "Lyon, France");
    }

    #[test]
    fn test_tier_table_uses_aliases() {
        let tiers = SearchProfile::for_home("Paris", "France").tier_table("Paris", "France");
        assert_eq!(tiers.tier_of("Nanterre, Île-de-France"), 1);
        assert_eq!(tiers.tier_of("Madrid, Spain"), 2);
    }
}
