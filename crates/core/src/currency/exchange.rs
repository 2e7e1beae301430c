//! Exchange rate types and rate-service response parsing.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use pricewatch_shared::Currency;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::value::RawValue;

use super::error::ConversionError;

/// Spot exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRate {
    /// Source currency.
    pub base: Currency,
    /// Target currency.
    pub target: Currency,
    /// Exchange rate (1 base = rate target).
    pub rate: Decimal,
    /// Date the service reports for this rate, if any.
    pub effective_date: Option<NaiveDate>,
}

/// Body of `GET {rates_url}?base=EUR&symbols=USD`.
///
/// Only `rates` is required. Each rate is kept as its raw JSON text and parsed
/// straight into a `Decimal`, so no digit is lost to an `f64`.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    rates: HashMap<String, Box<RawValue>>,
    #[serde(default)]
    date: Option<String>,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(base: Currency, target: Currency, rate: Decimal) -> Self {
        Self {
            base,
            target,
            rate,
            effective_date: None,
        }
    }

    /// Parses a rate-service response body for the `base -> target` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::RateUnavailable`] if the body is not JSON, has
    /// no entry for `target`, or the entry is not a positive number.
    pub fn from_response(
        body: &str,
        base: Currency,
        target: Currency,
    ) -> Result<Self, ConversionError> {
        let unavailable = || ConversionError::rate_unavailable(base.code(), target.code());

        let response: RatesResponse = serde_json::from_str(body).map_err(|_| unavailable())?;
        let rate = response
            .rates
            .get(target.code())
            .and_then(|raw| decimal_from_json(raw))
            .filter(|rate| rate.is_sign_positive() && !rate.is_zero())
            .ok_or_else(unavailable)?;

        Ok(Self {
            base,
            target,
            rate,
            effective_date: response
                .date
                .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        })
    }
}

/// Reads a JSON number literal or a numeric string.
fn decimal_from_json(raw: &RawValue) -> Option<Decimal> {
    let raw = raw.get().trim();
    let text = if raw.starts_with('"') {
        serde_json::from_str::<String>(raw).ok()?.trim().to_string()
    } else {
        raw.to_string()
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_number_rate() {
        let body = r#"{"amount":1.0,"base":"EUR","date":"2024-03-01","rates":{"USD":1.0841}}"#;
        let rate = ExchangeRate::from_response(body, Currency::Eur, Currency::Usd).unwrap();
        assert_eq!(rate.rate, dec!(1.0841));
        assert_eq!(rate.base, Currency::Eur);
        assert_eq!(rate.target, Currency::Usd);
        assert_eq!(
            rate.effective_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_parse_string_rate() {
        let body = r#"{"rates":{"GBP":"0.8567"}}"#;
        let rate = ExchangeRate::from_response(body, Currency::Eur, Currency::Gbp).unwrap();
        assert_eq!(rate.rate, dec!(0.8567));
        assert_eq!(rate.effective_date, None);
    }

    #[test]
    fn test_parse_rate_keeps_all_digits() {
        let body = r#"{"rates":{"USD":1.0841000000000000123}}"#;
        let rate = ExchangeRate::from_response(body, Currency::Eur, Currency::Usd).unwrap();
        assert_eq!(rate.rate, dec!(1.0841000000000000123));
        assert_eq!(rate.rate.to_string(), "1.0841000000000000123");
    }

    #[test]
    fn test_parse_scientific_rate() {
        let body = r#"{"rates":{"USD":1.5e-3}}"#;
        let rate = ExchangeRate::from_response(body, Currency::Eur, Currency::Usd).unwrap();
        assert_eq!(rate.rate, dec!(0.0015));
    }

    #[rstest]
    #[case::not_json("<html>busy</html>")]
    #[case::no_rates(r#"{"error":"base not supported"}"#)]
    #[case::wrong_symbol(r#"{"rates":{"GBP":0.85}}"#)]
    #[case::null_rate(r#"{"rates":{"USD":null}}"#)]
    #[case::text_rate(r#"{"rates":{"USD":"n/a"}}"#)]
    #[case::zero_rate(r#"{"rates":{"USD":0}}"#)]
    #[case::negative_rate(r#"{"rates":{"USD":-1.2}}"#)]
    fn test_malformed_response_is_rate_unavailable(#[case] body: &str) {
        let err = ExchangeRate::from_response(body, Currency::Eur, Currency::Usd).unwrap_err();
        assert_eq!(err, ConversionError::rate_unavailable("EUR", "USD"));
    }
}
