//! Product catalog with price histories.
//!
//! This module ties the pieces together:
//! - `Product` and `Catalog` as persisted by `pricewatch-store`
//! - `Tracker`, which fetches a page, reads name/price/seller and updates the catalog
//! - `PageFetcher`, the seam for the HTTP client

pub mod product;
pub mod service;

#[cfg(test)]
mod tests;

pub use product::{Catalog, PricePoint, Product};
pub use service::{PageFetcher, TrackOutcome, Tracker};
