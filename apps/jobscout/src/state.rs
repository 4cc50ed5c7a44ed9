use crate::config::Config;
use crate::errors::AppError;
use crate::http::HttpFetcher;
use crate::profile::SearchProfile;
use crate::ranking::TierTable;

/// Everything a command needs, built once at startup.
pub struct AppState {
    pub config: Config,
    pub profile: SearchProfile,
    /// Location tiers derived from the home city/country and the profile.
    pub tiers: TierTable,
    pub http: HttpFetcher,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let profile = SearchProfile::load(
            config.search_profile.as_deref(),
            &config.home_city,
            &config.home_country,
        )?;
        let tiers = profile.tier_table(&config.home_city, &config.home_country);
        let http = HttpFetcher::new(config.http_timeout)?;
        Ok(Self {
            config,
            profile,
            tiers,
            http,
        })
    }
}
