//! Property-based tests for currency conversion.

use proptest::prelude::*;
use pricewatch_shared::{Currency, Money};
use rust_decimal::Decimal;

use super::conversion::{CurrencyConverter, RateProvider};
use super::error::ConversionError;

/// Strategy to generate amounts (-1,000,000.00 to 1,000,000.00).
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

struct Fixed(Decimal);

impl RateProvider for Fixed {
    fn lookup_rate(&self, _: Currency, _: Currency) -> Result<Decimal, ConversionError> {
        Ok(self.0)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting into the value's own currency is the identity, whatever the rate.
    #[test]
    fn prop_same_currency_identity(
        amount in any_amount(),
        rate in positive_rate(),
        currency in any_currency(),
    ) {
        let value = Money::new(amount, currency);
        let converted = CurrencyConverter::new(Fixed(rate)).convert(value, currency).unwrap();
        prop_assert_eq!(converted.amount(), amount);
        prop_assert_eq!(converted.currency(), currency);
    }

    /// Cross-currency conversion is the exact product of amount and rate.
    #[test]
    fn prop_cross_currency_exact_product(
        amount in any_amount(),
        rate in positive_rate(),
    ) {
        let value = Money::new(amount, Currency::Eur);
        let converted = CurrencyConverter::new(Fixed(rate)).convert(value, Currency::Gbp).unwrap();
        prop_assert_eq!(converted.amount(), amount * rate);
        prop_assert_eq!(converted.currency(), Currency::Gbp);
    }

    /// Conversion preserves the sign of the amount.
    #[test]
    fn prop_sign_preserved(amount in any_amount(), rate in positive_rate()) {
        let value = Money::new(amount, Currency::Usd);
        let converted = CurrencyConverter::new(Fixed(rate)).convert(value, Currency::Eur).unwrap();
        prop_assert_eq!(converted.amount() < Decimal::ZERO, amount < Decimal::ZERO);
    }
}
