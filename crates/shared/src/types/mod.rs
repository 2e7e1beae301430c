//! Common types used across the application.

pub mod money;
pub mod number_format;

#[cfg(test)]
mod money_props;

pub use money::{Currency, DISPLAY_SCALE, Money};
pub use number_format::NumberFormat;
