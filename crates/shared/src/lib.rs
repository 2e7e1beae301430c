//! Money types, errors, and settings for Pricewatch.
//!
//! This crate provides the value types every other crate builds on:
//! - `Money` with exact decimal amounts and a closed `Currency` set
//! - `NumberFormat` for reading localized price labels
//! - Error types for money handling and settings
//! - Scraper settings management

pub mod config;
pub mod error;
pub mod types;

pub use config::{DEFAULT_SETTINGS_PATH, Settings};
pub use error::{MoneyError, MoneyResult, SettingsError};
pub use types::{Currency, Money, NumberFormat};
