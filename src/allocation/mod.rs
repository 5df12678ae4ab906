//! Buy-the-dip capital allocation.
//!
//! Contains the core logic for:
//! - Price ladder generation between a low and high bound
//! - Exponential weighting of ladder levels
//! - Cash distribution, board-lot rounding and cumulative averaging
//! - The tabular report handed to the presentation layer

mod allotment;
mod ladder;
mod report;
pub mod weights;

pub use allotment::{
    allot_cash, calculate_exponential_allotment, AllocationResult, ExponentialAllotment, Purchase,
};
pub use ladder::{generate_ladder, level_count, PriceLadder};
pub use report::{compute, AllocationReport, AllocationRequest, AllocationRow, AllocationSummary};
