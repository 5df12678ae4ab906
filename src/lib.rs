//! # Dip Allocator
//!
//! Splits a fixed capital budget across a descending ladder of share
//! prices, giving exponentially more capital to cheaper levels, and rounds
//! each level down to whole board lots.
//!
//! ## Architecture
//!
//! - `allocation`: Price ladder, exponential weights, allotment and report
//! - `config`: Configuration management and validation
//! - `error`: Input validation errors
//! - `utils`: Decimal arithmetic and display formatting

pub mod allocation;
pub mod config;
pub mod error;
pub mod utils;

pub use allocation::{compute, AllocationReport, AllocationRequest};
pub use config::Config;
pub use error::InputError;
