//! Explicit decimal/grouping conventions for parsing localized amounts.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MoneyError, MoneyResult};

/// Separators used when reading amount text such as `"1.234,56"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Character separating the integer part from the fraction.
    pub decimal_separator: char,
    /// Character grouping thousands; removed before parsing.
    pub group_separator: char,
}

impl NumberFormat {
    /// `1,234.56`
    pub const DOT_DECIMAL: Self = Self {
        decimal_separator: '.',
        group_separator: ',',
    };

    /// `1.234,56`
    pub const COMMA_DECIMAL: Self = Self {
        decimal_separator: ',',
        group_separator: '.',
    };

    /// Rewrites localized text into the plain `1234.56` form.
    #[must_use]
    pub fn delocalize(&self, text: &str) -> String {
        text.trim()
            .chars()
            .filter_map(|c| {
                if c == self.decimal_separator {
                    Some('.')
                } else if c == self.group_separator {
                    None
                } else {
                    Some(c)
                }
            })
            .collect()
    }

    /// Parses localized text into an exact decimal.
    pub fn parse_decimal(&self, text: &str) -> MoneyResult<Decimal> {
        let plain = self.delocalize(text);
        Decimal::from_str(&plain).map_err(|_| MoneyError::invalid_amount(text))
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::DOT_DECIMAL
    }
}
