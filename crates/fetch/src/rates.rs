//! Exchange-rate lookups over HTTP.

use pricewatch_core::currency::{ConversionError, ExchangeRate, RateProvider};
use pricewatch_shared::{Currency, Settings};
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::client::build_client;
use crate::error::FetchError;

/// Queries `GET {rates_url}?base=EUR&symbols=USD` for every lookup.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    client: Client,
    rates_url: Url,
}

impl HttpRateProvider {
    /// Builds a provider for `settings.rates_url`.
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let rates_url = Url::parse(&settings.rates_url).map_err(|e| FetchError::InvalidUrl {
            url: settings.rates_url.clone(),
            reason: e.to_string(),
        })?;
        let client = build_client(settings, HeaderMap::new())?;
        Ok(Self::with_client(client, rates_url))
    }

    /// Uses a preconfigured client, e.g. one with a proxy or custom TLS.
    #[must_use]
    pub const fn with_client(client: Client, rates_url: Url) -> Self {
        Self { client, rates_url }
    }

    /// Request URL for the `base -> target` rate.
    #[must_use]
    pub fn request_url(&self, base: Currency, target: Currency) -> Url {
        let mut url = self.rates_url.clone();
        url.query_pairs_mut()
            .append_pair("base", base.code())
            .append_pair("symbols", target.code());
        url
    }
}

impl RateProvider for HttpRateProvider {
    fn lookup_rate(&self, base: Currency, target: Currency) -> Result<Decimal, ConversionError> {
        let url = self.request_url(base, target);
        let response = self.client.get(url.clone()).send().map_err(|e| {
            warn!(%url, error = %e, "Exchange-rate request failed");
            ConversionError::failed(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Exchange-rate service returned an error");
            return Err(ConversionError::failed(format!(
                "rate service returned {status}"
            )));
        }

        let body = response
            .text()
            .map_err(|e| ConversionError::failed(e.to_string()))?;
        let rate = ExchangeRate::from_response(&body, base, target)?;
        debug!(
            base = base.code(),
            target = target.code(),
            rate = %rate.rate,
            date = ?rate.effective_date,
            "Fetched exchange rate"
        );
        Ok(rate.rate)
    }
}
