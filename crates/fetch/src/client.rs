//! Shared blocking client construction.

use std::collections::BTreeMap;
use std::time::Duration;

use pricewatch_shared::Settings;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::FetchError;

/// Converts configured headers into a `HeaderMap`.
pub(crate) fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FetchError::invalid_header(name, e))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| FetchError::invalid_header(name, e))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Builds a client with the settings' timeout; no timeout unless configured.
pub(crate) fn build_client(settings: &Settings, headers: HeaderMap) -> Result<Client, FetchError> {
    let timeout = settings.request_timeout_secs.map(Duration::from_secs);
    Ok(Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()?)
}
