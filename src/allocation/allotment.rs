//! Exponential allotment of capital across a price ladder.

use super::weights::cash_shares;
use crate::utils::decimal::{floor_units, safe_div};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Planned buy at a single ladder level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Ladder price
    pub price: Decimal,
    /// Cash the weighting assigned to this level
    pub allotted_cash: Decimal,
    /// Whole board lots affordable with `allotted_cash`
    pub lots: u64,
    /// Actual cost: `lots * lot_size * price`
    pub total: Decimal,
    /// Running volume-weighted average price up to and including this level
    pub average: Decimal,
    /// `total / available_capital` as a fraction
    pub percentage: Decimal,
}

/// Outcome of one allotment pass, in ladder order (highest price first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub purchases: Vec<Purchase>,
    /// Sum of every `total`
    pub total_sum: Decimal,
    /// Blended average across the whole ladder, zero when nothing is bought
    pub final_average: Decimal,
}

impl AllocationResult {
    /// Zero-valued result for an empty ladder.
    pub fn empty() -> Self {
        Self {
            purchases: Vec::new(),
            total_sum: Decimal::ZERO,
            final_average: Decimal::ZERO,
        }
    }

    pub fn total_lots(&self) -> u64 {
        self.purchases
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.lots))
    }
}

/// Distributes capital over ladder levels with exponentially growing
/// weights, then rounds each level down to whole board lots.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialAllotment {
    lot_size: u64,
}

impl ExponentialAllotment {
    /// Create an allotment engine for the given board lot size (shares per lot).
    pub fn new(lot_size: u64) -> Self {
        Self { lot_size }
    }

    /// Allot `available_capital` across `prices` (descending ladder order).
    ///
    /// Runs weighting, cash distribution, lot rounding and cumulative
    /// averaging in sequence. Never fails: an empty ladder gives
    /// [`AllocationResult::empty`] and a ladder where every level rounds to
    /// zero lots gives a zero total and a zero average.
    pub fn allot(&self, available_capital: Decimal, prices: &[Decimal]) -> AllocationResult {
        if prices.is_empty() {
            debug!("Empty ladder, nothing to allot");
            return AllocationResult::empty();
        }

        let cashes = allot_cash(available_capital, prices.len());
        let lots = self.round_lots(&cashes, prices);
        let result = self.assemble(available_capital, prices, &cashes, &lots);

        debug!(
            %available_capital,
            levels = prices.len(),
            total_lots = result.total_lots(),
            total_sum = %result.total_sum,
            final_average = %result.final_average,
            "Allotment complete"
        );

        if result.total_lots() == 0 {
            warn!(
                %available_capital,
                lot_size = self.lot_size,
                "Capital too small to buy a single lot at any ladder price"
            );
        }

        result
    }

    /// Whole lots affordable at each level: `floor(cash / (price * lot_size))`.
    ///
    /// Counts beyond `u64::MAX` saturate; requests that passed
    /// `AllocationRequest::validate` never reach that bound.
    pub fn round_lots(&self, cashes: &[Decimal], prices: &[Decimal]) -> Vec<u64> {
        let lot_size = Decimal::from(self.lot_size);

        cashes
            .iter()
            .zip(prices)
            .map(|(cash, price)| {
                floor_units(*cash, price.saturating_mul(lot_size))
                    .and_then(|lots| lots.to_u64())
                    .unwrap_or_else(|| {
                        warn!(%cash, %price, "Lot count exceeds u64 range, saturating");
                        u64::MAX
                    })
            })
            .collect()
    }

    /// Build purchases in ladder order, tracking the running average as if
    /// buying from the highest price downwards.
    fn assemble(
        &self,
        available_capital: Decimal,
        prices: &[Decimal],
        cashes: &[Decimal],
        lots: &[u64],
    ) -> AllocationResult {
        let lot_size = Decimal::from(self.lot_size);

        let mut purchases = Vec::with_capacity(prices.len());
        let mut total_sum = Decimal::ZERO;
        let mut cost_basis = Decimal::ZERO;
        let mut lots_held = Decimal::ZERO;
        let mut average = Decimal::ZERO;

        for ((&price, &allotted_cash), &lot) in prices.iter().zip(cashes).zip(lots) {
            let lot_dec = Decimal::from(lot);
            let total = lot_dec.saturating_mul(lot_size).saturating_mul(price);
            total_sum = total_sum.saturating_add(total);

            // Weighted by lot count; shares per lot is common to every level.
            cost_basis = cost_basis.saturating_add(price.saturating_mul(lot_dec));
            lots_held = lots_held.saturating_add(lot_dec);
            average = safe_div(cost_basis, lots_held);

            purchases.push(Purchase {
                price,
                allotted_cash,
                lots: lot,
                total,
                average,
                percentage: safe_div(total, available_capital),
            });
        }

        AllocationResult {
            purchases,
            total_sum,
            final_average: average,
        }
    }
}

/// Split capital across `levels` positions in proportion to their weights.
pub fn allot_cash(available_capital: Decimal, levels: usize) -> Vec<Decimal> {
    cash_shares(levels)
        .into_iter()
        .map(|share| {
            let share = Decimal::from_f64_retain(share).unwrap_or(Decimal::ZERO);
            available_capital * share
        })
        .collect()
}

/// Run the allotment with an explicit lot size.
pub fn calculate_exponential_allotment(
    available_capital: Decimal,
    prices: &[Decimal],
    lot_size: u64,
) -> AllocationResult {
    ExponentialAllotment::new(lot_size).allot(available_capital, prices)
}
