//! Conversion error types.

use pricewatch_shared::MoneyError;
use thiserror::Error;

/// Errors raised while exchanging money into another currency.
///
/// None of these are retried; a failed conversion never turns into a zero or
/// an unchanged amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Currency outside the supported set.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// The rate service could not be reached or answered with an error.
    #[error("Currency conversion failed: {0}")]
    ConversionFailed(String),

    /// The rate service answered without a usable rate.
    #[error("Exchange rate not available for {base}/{target}")]
    RateUnavailable {
        /// Base currency code.
        base: String,
        /// Target currency code.
        target: String,
    },
}

impl ConversionError {
    /// Create a conversion failure error.
    #[must_use]
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::ConversionFailed(msg.into())
    }

    /// Create a rate unavailable error.
    #[must_use]
    pub fn rate_unavailable(base: impl Into<String>, target: impl Into<String>) -> Self {
        Self::RateUnavailable {
            base: base.into(),
            target: target.into(),
        }
    }

    /// Returns a stable code for logs and CLI output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::ConversionFailed(_) => "CONVERSION_FAILED",
            Self::RateUnavailable { .. } => "RATE_UNAVAILABLE",
        }
    }
}

impl From<MoneyError> for ConversionError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::InvalidCurrency(symbol) => Self::InvalidCurrency(symbol),
            other => Self::ConversionFailed(other.to_string()),
        }
    }
}
