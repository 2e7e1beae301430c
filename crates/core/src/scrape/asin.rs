//! Amazon Standard Identification Numbers.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use pricewatch_shared::Settings;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::ScrapeError;

/// `/dp/` followed by the 10 character product id.
static ASIN_IN_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/dp/(\w{10})").expect("Invalid regex pattern"));

static ASIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w{10}$").expect("Invalid regex pattern"));

/// Product identifier used as the catalog key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asin(String);

impl Asin {
    /// Extracts the ASIN from a product page URL.
    ///
    /// ```
    /// use pricewatch_core::scrape::Asin;
    ///
    /// let asin = Asin::from_url("https://www.amazon.de/Some-Product/dp/B07XJ8C8F5/ref=sr_1_1").unwrap();
    /// assert_eq!(asin.as_str(), "B07XJ8C8F5");
    /// ```
    pub fn from_url(url: &str) -> Result<Self, ScrapeError> {
        ASIN_IN_URL
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| ScrapeError::MissingAsin(url.to_string()))
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Product page URL on the shop configured in `settings`.
    #[must_use]
    pub fn product_url(&self, settings: &Settings) -> String {
        format!("{}{}/dp/{}", settings.base_url, settings.tld, self.0)
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Asin {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if ASIN.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ScrapeError::InvalidAsin(s.to_string()))
        }
    }
}

impl TryFrom<String> for Asin {
    type Error = ScrapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Asin> for String {
    fn from(asin: Asin) -> Self {
        asin.0
    }
}
