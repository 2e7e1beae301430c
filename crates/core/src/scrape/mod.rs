//! Product page extraction and ASIN handling.
//!
//! Pages are parsed offline from HTML text; fetching happens behind the
//! `tracker::PageFetcher` trait.

pub mod asin;
pub mod error;
pub mod page;

pub use asin::Asin;
pub use error::ScrapeError;
pub use page::{PriceLabel, ProductPage};
