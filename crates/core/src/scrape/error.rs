//! Scraping error types.

use pricewatch_shared::MoneyError;
use thiserror::Error;

use crate::currency::ConversionError;

/// Errors raised while fetching or reading a product page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Page could not be downloaded.
    #[error("Could not get product information from {url}: {reason}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Transport error or HTTP status.
        reason: String,
    },

    /// URL does not contain a `/dp/<ASIN>` segment.
    #[error("No product identifier in URL: {0}")]
    MissingAsin(String),

    /// Text is not a 10 character ASIN.
    #[error("Invalid product identifier: {0}")]
    InvalidAsin(String),

    /// Page has no price element.
    #[error("No price on product page")]
    MissingPrice,

    /// Price element text is not `<amount> <symbol>`.
    #[error("Unrecognized price label: {0}")]
    UnrecognizedPrice(String),

    /// `date_format` setting is not a valid `strftime` pattern.
    #[error("Invalid date format: {0}")]
    DateFormat(String),

    /// Price label could not be turned into money.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Price could not be converted to the tracking currency.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl ScrapeError {
    /// Create a fetch error.
    #[must_use]
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
