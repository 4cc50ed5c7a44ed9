//! Filter & Dedup: keeps listings that match the role profile and a
//! reachable region, then drops repeated (company, title) pairs.
//!
//! Both passes are order-preserving and idempotent, so running them again on
//! their own output changes nothing.

use std::collections::HashSet;

use tracing::debug;

use crate::models::JobListing;

pub mod profile;

pub use profile::{FilterProfile, LocationPolicy};

/// Why a listing was filtered out. Used for debug logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    ExcludedRole,
    NoRoleMatch,
    ExcludedLocation,
    NoLocationMatch,
}

impl FilterProfile {
    /// `None` when the listing passes; otherwise the first failed check.
    pub fn rejection(&self, job: &JobListing) -> Option<Rejection> {
        let title = job.title.to_lowercase();
        let tags = job.tags.to_lowercase();
        let location = job.location.to_lowercase();
        let role_text = format!("{title} {tags}");

        if contains_any(&role_text, &self.exclude_roles) {
            return Some(Rejection::ExcludedRole);
        }

        let strong = contains_any(&role_text, &self.include_roles);
        let weak = contains_any(&role_text, &self.weak_roles)
            && contains_any(&role_text, &self.role_signals);
        if !strong && !weak {
            return Some(Rejection::NoRoleMatch);
        }

        let policy = self.policy_for(job.source);
        if policy == LocationPolicy::RegionGuaranteed {
            return None;
        }

        let location_text = format!("{location} {tags}");
        if contains_any(&location_text, &self.location_exclude)
            && !contains_any(&location_text, &self.region_override)
        {
            return Some(Rejection::ExcludedLocation);
        }

        if policy == LocationPolicy::Relaxed && self.is_generic_location(&location) {
            return None;
        }

        if contains_any(&location_text, &self.location_include) {
            None
        } else {
            Some(Rejection::NoLocationMatch)
        }
    }

    fn is_generic_location(&self, location: &str) -> bool {
        let location = location.trim();
        location.is_empty()
            || self
                .generic_locations
                .iter()
                .any(|g| g.trim().eq_ignore_ascii_case(location))
    }
}

/// Keeps the listings accepted by `profile`, in their original order.
pub fn filter_listings(listings: Vec<JobListing>, profile: &FilterProfile) -> Vec<JobListing> {
    listings
        .into_iter()
        .filter(|job| match profile.rejection(job) {
            None => true,
            Some(reason) => {
                debug!("Filtered out '{}' at '{}': {:?}", job.title, job.company, reason);
                false
            }
        })
        .collect()
}

/// Drops listings whose normalized (company, title) was already seen.
/// The first occurrence wins.
pub fn dedup_listings(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|job| seen.insert(job.dedup_key()))
        .collect()
}

/// Keyword-list test using [`contains_term`].
/// `haystack` must already be lowercase.
pub fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| contains_term(haystack, &needle.trim().to_lowercase()))
}

/// True when `term` occurs in `haystack` starting at a word boundary, so
/// "usa" does not hit "Lausanne" while "europe" still hits "European".
pub fn contains_term(haystack: &str, term: &str) -> bool {
    !term.is_empty()
        && haystack.match_indices(term).any(|(at, _)| {
            haystack[..at]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn job(company: &str, title: &str, source: Source, location: &str, tags: &str) -> JobListing {
        JobListing {
            company: company.to_string(),
            title: title.to_string(),
            url: format!("https://example.com/{company}/{title}"),
            source,
            location: location.to_string(),
            tags: tags.to_string(),
            posted_date: "2026-10-10".to_string(),
        }
    }

    #[test]
    fn test_us_location_with_emea_tag_survives_override() {
        let profile = FilterProfile::default();
        let listing = job(
            "Acme",
            "Senior Backend Engineer",
            Source::RemoteOk,
            "Remote, USA",
            "java, emea",
        );
        assert_eq!(profile.rejection(&listing), None);
    }

    #[test]
    fn test_us_location_without_region_signal_is_dropped() {
        let profile = FilterProfile::default();
        let listing = job(
            "Acme",
            "Senior Backend Engineer",
            Source::RemoteOk,
            "Remote, USA",
            "java",
        );
        assert_eq!(
            profile.rejection(&listing),
            Some(Rejection::ExcludedLocation)
        );
    }

    #[test]
    fn test_excluded_role_wins_over_include() {
        let profile = FilterProfile::default();
        let listing = job(
            "Acme",
            "Junior Backend Engineer",
            Source::RemoteOk,
            "Europe",
            "",
        );
        assert_eq!(profile.rejection(&listing), Some(Rejection::ExcludedRole));
    }

    #[test]
    fn test_weak_keyword_needs_role_signal() {
        let profile = FilterProfile::default();
        let language_only = job("Acme", "Java Trainer", Source::RemoteOk, "Europe", "");
        let with_signal = job("Acme", "Java Developer", Source::RemoteOk, "Europe", "");
        assert_eq!(
            profile.rejection(&language_only),
            Some(Rejection::NoRoleMatch)
        );
        assert_eq!(profile.rejection(&with_signal), None);
    }

    #[test]
    fn test_region_guaranteed_source_skips_location_check() {
        let profile = FilterProfile::default();
        let listing = job(
            "Umbrella",
            "Backend Engineer",
            Source::Arbeitnow,
            "Toronto, Canada",
            "",
        );
        assert!(profile.rejection(&listing).is_none());
    }

    #[test]
    fn test_relaxed_source_accepts_empty_location() {
        let profile = FilterProfile::default();
        let relaxed = job("Hooli", "Backend Engineer", Source::Jobicy, "", "");
        let strict = job("Hooli", "Backend Engineer", Source::Remotive, "", "");
        assert!(profile.rejection(&relaxed).is_none());
        assert_eq!(
            profile.rejection(&strict),
            Some(Rejection::NoLocationMatch)
        );
    }

    #[test]
    fn test_relaxed_source_still_honours_exclusion() {
        let profile = FilterProfile::default();
        let listing = job("Hooli", "Backend Engineer", Source::Jobicy, "", "usa only");
        assert_eq!(
            profile.rejection(&listing),
            Some(Rejection::ExcludedLocation)
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let profile = FilterProfile::default();
        let listings = vec![
            job("A", "Backend Engineer", Source::RemoteOk, "Europe", ""),
            job("B", "Sales Manager", Source::RemoteOk, "Europe", ""),
            job("C", "Python Developer", Source::Remotive, "Worldwide", ""),
            job("D", "DevOps Engineer", Source::Remotive, "US only", ""),
            job("E", "Full Stack Developer", Source::WeWorkRemotely, "Anywhere", ""),
        ];

        let once = dedup_listings(filter_listings(listings, &profile));
        let twice = dedup_listings(filter_listings(once.clone(), &profile));

        assert_eq!(
            once.iter().map(|j| j.company.as_str()).collect::<Vec<_>>(),
            vec!["A", "C", "E"]
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_short_location_needles_match_whole_words_only() {
        let profile = FilterProfile::default();
        let at = |location: &str| job("Acme", "Backend Engineer", Source::RemoteOk, location, "");
        let lausanne = at("Lausanne, Switzerland, Europe");
        let jerusalem = at("Jerusalem, EU timezone");
        let usa = at("Austin, USA");

        assert_eq!(profile.rejection(&lausanne), None);
        assert_eq!(profile.rejection(&jerusalem), None);
        assert_eq!(profile.rejection(&usa), Some(Rejection::ExcludedLocation));
    }

    #[test]
    fn test_contains_term_word_start() {
        assert!(contains_term("remote, usa", "usa"));
        assert!(contains_term("us-based only", "us-based"));
        assert!(contains_term("european union", "europe"));
        assert!(!contains_term("lausanne", "usa"));
        assert!(!contains_term("milwaukee, wi", "uk"));
        assert!(!contains_term("paris", ""));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let first = job("Acme", "Backend Engineer", Source::RemoteOk, "Europe", "first");
        let second = job(" ACME ", "backend engineer", Source::Remotive, "EMEA", "second");
        let other = job("Globex", "Backend Engineer", Source::Remotive, "EMEA", "");

        let out = dedup_listings(vec![first.clone(), other.clone(), second]);

        assert_eq!(out, vec![first, other]);
    }

    #[test]
    fn test_custom_profile_is_threaded_explicitly() {
        let profile = FilterProfile {
            include_roles: vec!["Data Engineer".to_string()],
            location_include: vec!["Lisbon".to_string()],
            ..FilterProfile::default()
        };
        let listing = job("Acme", "Senior Data Engineer", Source::Remotive, "Lisbon", "");
        assert!(profile.rejection(&listing).is_none());
        assert!(FilterProfile::default().rejection(&listing).is_some());
    }
}
