//! Core price tracking logic for Pricewatch.
//!
//! This crate contains pure logic with ZERO network or filesystem dependencies.
//! Page fetching and rate lookups are reached through traits that the
//! `pricewatch-fetch` crate implements.
//!
//! # Modules
//!
//! - `currency` - Exchange rates and currency conversion
//! - `scrape` - Product page extraction and ASIN handling
//! - `tracker` - Product catalog with price histories

pub mod currency;
pub mod scrape;
pub mod tracker;
