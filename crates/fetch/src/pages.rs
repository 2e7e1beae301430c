//! Product page downloads.

use pricewatch_core::scrape::ScrapeError;
use pricewatch_core::tracker::PageFetcher;
use pricewatch_shared::Settings;
use reqwest::blocking::Client;
use tracing::debug;

use crate::client::{build_client, header_map};
use crate::error::FetchError;

/// Fetches product pages with the headers configured in settings.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Builds a fetcher sending `settings.headers` with every request.
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let client = build_client(settings, header_map(&settings.headers)?)?;
        Ok(Self::with_client(client))
    }

    /// Uses a preconfigured client, e.g. one with a proxy or custom TLS.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScrapeError::fetch(url, e))?;

        let status = response.status();
        debug!(url, %status, "Fetched product page");
        if !status.is_success() {
            return Err(ScrapeError::fetch(url, status));
        }

        response.text().map_err(|e| ScrapeError::fetch(url, e))
    }
}
