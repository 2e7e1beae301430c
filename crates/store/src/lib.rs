//! JSON file persistence for the product catalog.
//!
//! The whole catalog lives in one pretty-printed JSON object keyed by ASIN,
//! at `settings.db_path / settings.db_name`.

mod error;
mod json;

pub use error::StoreError;
pub use json::JsonProductStore;
