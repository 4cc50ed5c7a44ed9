//! Sort/Rank: location tiers and the final listing order.
//!
//! Tier 0 is the closest to home. A location matching no tier falls into the
//! fallback tier, which always sorts last.

use std::cmp::Ordering;

use crate::filter::contains_term;
use crate::models::JobListing;

#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub label: String,
    pub badge: String,
    pub needles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: Vec<Tier>,
    fallback: Tier,
}

impl TierTable {
    pub fn new(tiers: Vec<Tier>, fallback: Tier) -> Self {
        Self { tiers, fallback }
    }

    /// Home city, then home country, then the wider region, then everything else.
    pub fn for_home(
        city: &str,
        country: &str,
        country_aliases: &[String],
        region: &[String],
    ) -> Self {
        let mut country_needles = vec![country.to_lowercase()];
        country_needles.extend(country_aliases.iter().map(|a| a.to_lowercase()));

        Self::new(
            vec![
                Tier {
                    label: city.to_string(),
                    badge: format!("🏠 {city}"),
                    needles: vec![city.to_lowercase()],
                },
                Tier {
                    label: country.to_string(),
                    badge: format!("📌 {country}"),
                    needles: country_needles,
                },
                Tier {
                    label: "EMEA".to_string(),
                    badge: "🌍 EMEA".to_string(),
                    needles: region.iter().map(|r| r.to_lowercase()).collect(),
                },
            ],
            Tier {
                label: "Other".to_string(),
                badge: "📍 Other".to_string(),
                needles: Vec::new(),
            },
        )
    }

    /// Index of the first tier with a needle starting a word of `location`.
    pub fn tier_of(&self, location: &str) -> usize {
        let location = location.to_lowercase();
        self.tiers
            .iter()
            .position(|tier| {
                tier.needles
                    .iter()
                    .any(|n| contains_term(&location, n))
            })
            .unwrap_or(self.tiers.len())
    }

    pub fn tier(&self, index: usize) -> &Tier {
        self.tiers.get(index).unwrap_or(&self.fallback)
    }

    pub fn tier_for(&self, location: &str) -> &Tier {
        self.tier(self.tier_of(location))
    }
}

/// Stable sort by tier only; used to pick backfill candidates.
pub fn sort_by_tier(listings: &mut [JobListing], tiers: &TierTable) {
    listings.sort_by_key(|job| tiers.tier_of(&job.location));
}

/// Report order: tier ascending, then (for remote searches) explicitly remote
/// listings first, then newest `posted_date` first.
pub fn sort_listings(listings: &mut [JobListing], tiers: &TierTable, remote_search: bool) {
    listings.sort_by(|a, b| {
        tiers
            .tier_of(&a.location)
            .cmp(&tiers.tier_of(&b.location))
            .then_with(|| {
                if remote_search {
                    b.is_explicit_remote().cmp(&a.is_explicit_remote())
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| b.posted_date.cmp(&a.posted_date))
    });
}
