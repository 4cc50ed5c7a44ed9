//! HTTP Fetcher: the single outbound HTTP client shared by every job source.
//!
//! Providers are called anonymously; a browser User-Agent keeps the basic bot
//! filters (LinkedIn guest pages, RemoteOK) from rejecting the request.
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feed parse error: {0}")]
    Feed(#[from] quick_xml::DeError),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` and returns the body. Non-2xx responses are errors.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("GET {} -> {} bytes", url, body.len());
        Ok(body)
    }
}
