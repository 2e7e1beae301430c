//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.
//!
//! Equality and ordering look at the amount only, and the `+`/`-` operators
//! keep the left operand's currency without checking the right one. Callers
//! that must not mix currencies use [`Money::checked_add`] and
//! [`Money::checked_sub`], which fail with [`MoneyError::CurrencyMismatch`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::number_format::NumberFormat;
use crate::error::{MoneyError, MoneyResult};

/// Fractional digits kept by [`Money::round`] and shown by `Display`.
pub const DISPLAY_SCALE: u32 = 2;

/// Currencies supported by the system.
///
/// The set is closed: each variant maps a display symbol to the code used by
/// the exchange-rate service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    /// Euro (`€`)
    Eur,
    /// US Dollar (`$`)
    Usd,
    /// Pound Sterling (`£`)
    Gbp,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Self; 3] = [Self::Eur, Self::Usd, Self::Gbp];

    /// Display symbol, e.g. `€`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
        }
    }

    /// ISO 4217 code understood by the exchange-rate service.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
        }
    }

    /// Looks up a currency by its display symbol.
    pub fn from_symbol(symbol: &str) -> MoneyResult<Self> {
        let symbol = symbol.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.symbol() == symbol)
            .ok_or_else(|| MoneyError::invalid_currency(symbol))
    }

    /// Looks up a currency by its ISO code (case-insensitive).
    pub fn from_code(code: &str) -> MoneyResult<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| MoneyError::invalid_currency(code))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    /// Accepts a symbol (`€`) or an ISO code (`EUR`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).or_else(|_| Self::from_code(s))
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Represents a monetary amount with currency.
///
/// Immutable: every operation returns a new value.
#[derive(Debug, Clone, Copy)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money instance from a decimal amount, used verbatim.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Creates Money from a decimal amount and a currency symbol.
    pub fn from_decimal(amount: Decimal, symbol: &str) -> MoneyResult<Self> {
        Ok(Self::new(amount, Currency::from_symbol(symbol)?))
    }

    /// Parses localized amount text, e.g. `"1.234,56"` with
    /// [`NumberFormat::COMMA_DECIMAL`], paired with a currency symbol.
    pub fn parse(text: &str, symbol: &str, format: &NumberFormat) -> MoneyResult<Self> {
        let amount = format.parse_decimal(text)?;
        Self::from_decimal(amount, symbol)
    }

    /// Parses the canonical display form produced by `Display`, e.g. `"19.99$"`.
    pub fn from_display(text: &str) -> MoneyResult<Self> {
        let text = text.trim();
        let currency = Currency::ALL
            .into_iter()
            .find(|c| text.ends_with(c.symbol()))
            .ok_or_else(|| MoneyError::invalid_currency(text))?;
        let amount_text = &text[..text.len() - currency.symbol().len()];
        let amount = NumberFormat::DOT_DECIMAL.parse_decimal(amount_text)?;
        Ok(Self::new(amount, currency))
    }

    /// The exact, unrounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency of this amount.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Quantizes to exactly two fractional digits, ties away from zero.
    ///
    /// `2.005` becomes `2.01`, not the `2.00` banker's rounding would give.
    #[must_use]
    pub fn round(&self) -> Self {
        Self::new(round_half_up(self.amount), self.currency)
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies, `Overflow` when the sum
    /// does not fit a `Decimal`.
    pub fn checked_add(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| MoneyError::overflow(format!("{} + {}", self.amount, other.amount)))?;
        Ok(Self::new(amount, self.currency))
    }

    /// Subtracts an amount of the same currency.
    ///
    /// # Errors
    ///
    /// Same as [`Money::checked_add`].
    pub fn checked_sub(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| MoneyError::overflow(format!("{} - {}", self.amount, other.amount)))?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiplies the amounts and rounds, keeping this value's currency.
    ///
    /// # Errors
    ///
    /// `Overflow` when the product does not fit a `Decimal`.
    pub fn checked_mul(&self, other: &Self) -> MoneyResult<Self> {
        let amount = self
            .amount
            .checked_mul(other.amount)
            .ok_or_else(|| MoneyError::overflow(format!("{} * {}", self.amount, other.amount)))?;
        Ok(Self::new(amount, self.currency).round())
    }

    /// Orders two recorded prices, where `None` stands for a price that could
    /// not be extracted.
    ///
    /// A missing side is not a monetary operand and yields
    /// [`MoneyError::IncomparableType`].
    pub fn compare_recorded(left: Option<&Self>, right: Option<&Self>) -> MoneyResult<Ordering> {
        match (left, right) {
            (Some(left), Some(right)) => Ok(left.cmp(right)),
            _ => Err(MoneyError::incomparable("missing price")),
        }
    }

    fn ensure_same_currency(&self, other: &Self) -> MoneyResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::currency_mismatch(self.currency, other.currency))
        }
    }
}

fn round_half_up(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Rounds like [`Money::round`] (ties away from zero, no `-0.00`), not half-to-even.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", round_half_up(self.amount), self.currency.symbol())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount
    }
}

impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount.cmp(&other.amount)
    }
}

/// # Panics
///
/// Panics if the sum overflows `Decimal`; use [`Money::checked_add`] for
/// untrusted amounts.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.amount + rhs.amount, self.currency)
    }
}

/// # Panics
///
/// Panics if the difference overflows `Decimal`; use [`Money::checked_sub`]
/// for untrusted amounts.
impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.amount - rhs.amount, self.currency)
    }
}

/// Scales one amount by another and rounds the result.
///
/// Meant for rate/tax style scaling; the result keeps the left currency.
///
/// # Panics
///
/// Panics if the product overflows `Decimal`; use [`Money::checked_mul`]
/// for untrusted amounts.
impl Mul for Money {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.amount * rhs.amount, self.currency).round()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_display(&raw).map_err(de::Error::custom)
    }
}
