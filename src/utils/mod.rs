//! Shared utilities: decimal arithmetic and display formatting.

pub mod decimal;
pub mod format;

pub use decimal::{floor_units, safe_div, to_percent};
pub use format::{format_currency, format_percent};
