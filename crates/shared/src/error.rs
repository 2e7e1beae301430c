//! Error types for money handling and settings.

use thiserror::Error;

use crate::types::Currency;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised while building or combining monetary values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Currency symbol or code outside the supported set.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// Amount text that does not parse as a number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Comparison against something that is not a monetary value.
    #[error("Incomparable operand: {0}")]
    IncomparableType(String),

    /// Checked arithmetic between different currencies.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        expected: Currency,
        /// Currency of the right operand.
        got: Currency,
    },

    /// Arithmetic result outside the range of `Decimal`.
    #[error("Amount overflow: {0}")]
    Overflow(String),
}

impl MoneyError {
    /// Create an invalid currency error.
    #[must_use]
    pub fn invalid_currency(symbol: impl Into<String>) -> Self {
        Self::InvalidCurrency(symbol.into())
    }

    /// Create an invalid amount error.
    #[must_use]
    pub fn invalid_amount(text: impl Into<String>) -> Self {
        Self::InvalidAmount(text.into())
    }

    /// Create an incomparable operand error.
    #[must_use]
    pub fn incomparable(what: impl Into<String>) -> Self {
        Self::IncomparableType(what.into())
    }

    /// Create a currency mismatch error.
    #[must_use]
    pub const fn currency_mismatch(expected: Currency, got: Currency) -> Self {
        Self::CurrencyMismatch { expected, got }
    }

    /// Create an overflow error.
    #[must_use]
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow(operation.into())
    }

    /// Returns a stable code for logs and CLI output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::IncomparableType(_) => "INCOMPARABLE_TYPE",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::Overflow(_) => "AMOUNT_OVERFLOW",
        }
    }
}

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings sources could not be merged or deserialized.
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// Settings file could not be written.
    #[error("Failed to write settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be encoded as JSON.
    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}
