//! Currency conversion logic.
//!
//! CRITICAL: Conversion does not round. The converted amount is the exact
//! product of amount and rate; callers that need a display value call
//! `Money::round` themselves.

use pricewatch_shared::{Currency, Money};
use rust_decimal::Decimal;

use super::error::ConversionError;

/// Source of spot exchange rates.
///
/// Implemented over HTTP by `pricewatch-fetch`; tests substitute fixed rates.
pub trait RateProvider {
    /// Returns how many units of `target` one unit of `base` buys.
    fn lookup_rate(&self, base: Currency, target: Currency) -> Result<Decimal, ConversionError>;
}

impl<P: RateProvider + ?Sized> RateProvider for &P {
    fn lookup_rate(&self, base: Currency, target: Currency) -> Result<Decimal, ConversionError> {
        (**self).lookup_rate(base, target)
    }
}

/// Exchanges money into other currencies using a [`RateProvider`].
///
/// Holds no rate cache: every cross-currency conversion asks the provider.
#[derive(Debug, Clone)]
pub struct CurrencyConverter<P> {
    provider: P,
}

impl<P: RateProvider> CurrencyConverter<P> {
    /// Creates a converter backed by `provider`.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying rate provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Converts `value` into `target`.
    ///
    /// Same-currency conversion returns `value` unchanged without a lookup.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`ConversionError`], and returns
    /// `ConversionFailed` if the converted amount overflows.
    pub fn convert(&self, value: Money, target: Currency) -> Result<Money, ConversionError> {
        if value.currency() == target {
            return Ok(value);
        }

        let rate = self.provider.lookup_rate(value.currency(), target)?;
        let amount = value.amount().checked_mul(rate).ok_or_else(|| {
            ConversionError::failed(format!("{value} * {rate} overflows"))
        })?;

        Ok(Money::new(amount, target))
    }

    /// Converts `value` into the currency with display symbol `symbol`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCurrency` for a symbol outside the supported set,
    /// otherwise the same errors as [`CurrencyConverter::convert`].
    pub fn convert_symbol(&self, value: Money, symbol: &str) -> Result<Money, ConversionError> {
        let target = Currency::from_symbol(symbol)?;
        self.convert(value, target)
    }
}
