//! Price ladder generation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Descending sequence of candidate purchase prices.
///
/// Level `i` of the ascending construction is `low + i * tick`, so
/// consecutive prices always differ by exactly one tick. The high bound
/// is only included when the range is a whole number of ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceLadder {
    prices: Vec<Decimal>,
}

impl PriceLadder {
    /// Build the ladder from `low` up to `high` (inclusive) in steps of `tick`.
    ///
    /// Degenerate input never panics: a non-positive tick or `high < low`
    /// yields an empty ladder, `high == low` yields `[low]`.
    pub fn generate(low: Decimal, high: Decimal, tick: Decimal) -> Self {
        let Some(steps) = step_count(low, high, tick) else {
            debug!(%low, %high, %tick, "Degenerate ladder bounds, returning empty ladder");
            return Self { prices: Vec::new() };
        };

        let mut prices: Vec<Decimal> = (0..=steps)
            .map(|i| low + tick * Decimal::from(i))
            .collect();
        prices.reverse();

        debug!(
            %low,
            %high,
            %tick,
            levels = prices.len(),
            "Generated price ladder"
        );

        Self { prices }
    }

    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn into_inner(self) -> Vec<Decimal> {
        self.prices
    }
}

/// Number of ladder levels the bounds would produce, without building it.
pub fn level_count(low: Decimal, high: Decimal, tick: Decimal) -> u64 {
    step_count(low, high, tick).map_or(0, |steps| steps.saturating_add(1))
}

/// Whole ticks that fit between `low` and `high`.
fn step_count(low: Decimal, high: Decimal, tick: Decimal) -> Option<u64> {
    if tick <= Decimal::ZERO || high < low {
        return None;
    }
    let steps = (high - low).checked_div(tick)?.floor();
    steps.to_u64()
}

/// Convenience wrapper returning the descending prices directly.
pub fn generate_ladder(low: Decimal, high: Decimal, tick: Decimal) -> Vec<Decimal> {
    PriceLadder::generate(low, high, tick).into_inner()
}
