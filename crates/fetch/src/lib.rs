//! Blocking HTTP adapters for Pricewatch.
//!
//! - `HttpPageFetcher` implements `PageFetcher` for product pages
//! - `HttpRateProvider` implements `RateProvider` against the exchange-rate service
//!
//! Both issue one request per call, with no retry and no caching.

mod client;
mod error;
mod pages;
mod rates;

pub use error::FetchError;
pub use pages::HttpPageFetcher;
pub use rates::HttpRateProvider;
