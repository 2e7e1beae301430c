//! Exchange rates and currency conversion.

pub mod conversion;
pub mod error;
pub mod exchange;

#[cfg(test)]
mod props;

pub use conversion::{CurrencyConverter, RateProvider};
pub use error::ConversionError;
pub use exchange::ExchangeRate;
