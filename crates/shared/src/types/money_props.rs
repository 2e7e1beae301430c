//! Property-based tests for money formatting and rounding.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::money::{Currency, Money};
use super::number_format::NumberFormat;

/// Amounts with up to 6 fractional digits, positive and negative.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000_000i64..10_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Reparsing the display form gives back the value rounded to 2 decimals.
    #[test]
    fn prop_display_roundtrip(amount in any_amount(), currency in any_currency()) {
        let money = Money::new(amount, currency);
        let reparsed = Money::from_display(&money.to_string()).unwrap();
        prop_assert_eq!(reparsed, money.round());
        prop_assert_eq!(reparsed.currency(), currency);
    }

    /// The symbol-based constructor accepts its own display amount.
    #[test]
    fn prop_parse_display_amount(amount in any_amount(), currency in any_currency()) {
        let money = Money::new(amount, currency).round();
        let shown = money.to_string();
        let amount_text = shown.trim_end_matches(currency.symbol());
        let parsed = Money::parse(amount_text, currency.symbol(), &NumberFormat::DOT_DECIMAL).unwrap();
        prop_assert_eq!(parsed, money);
    }

    /// Rounding always leaves exactly two fractional digits and is idempotent.
    #[test]
    fn prop_round_scale(amount in any_amount()) {
        let rounded = Money::new(amount, Currency::Eur).round();
        prop_assert_eq!(rounded.amount().scale(), 2);
        prop_assert_eq!(rounded.round(), rounded);
        prop_assert!((rounded.amount() - amount).abs() <= Decimal::new(5, 3));
    }

    /// Addition and subtraction are exact inverses.
    #[test]
    fn prop_add_sub_inverse(a in any_amount(), b in any_amount()) {
        let left = Money::new(a, Currency::Usd);
        let right = Money::new(b, Currency::Usd);
        prop_assert_eq!((left + right) - right, left);
    }

    /// Comma-decimal and dot-decimal renderings of the same number agree.
    #[test]
    fn prop_locale_agnostic(whole in 0u64..10_000_000, cents in 0u32..100) {
        let grouped = |group: char, decimal: char| {
            let digits = whole.to_string();
            let mut out = String::new();
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(group);
                }
                out.push(ch);
            }
            format!("{out}{decimal}{cents:02}")
        };
        let dot = Money::parse(&grouped(',', '.'), "€", &NumberFormat::DOT_DECIMAL).unwrap();
        let comma = Money::parse(&grouped('.', ','), "€", &NumberFormat::COMMA_DECIMAL).unwrap();
        prop_assert_eq!(dot, comma);
    }
}
