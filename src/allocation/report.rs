//! Request validation and the tabular allocation report.

use super::allotment::ExponentialAllotment;
use super::ladder::{level_count, PriceLadder};
use crate::error::InputError;
use crate::utils::decimal::to_percent;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The four caller-supplied inputs of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub low_price: Decimal,
    pub high_price: Decimal,
    pub price_tick: Decimal,
    pub available_capital: Decimal,
}

impl AllocationRequest {
    pub fn new(
        low_price: Decimal,
        high_price: Decimal,
        price_tick: Decimal,
        available_capital: Decimal,
    ) -> Self {
        Self {
            low_price,
            high_price,
            price_tick,
            available_capital,
        }
    }

    /// Check inputs before handing them to [`compute`].
    ///
    /// All values must be positive, the low price strictly below the high
    /// price, and the ladder no longer than `max_levels`. The capital must
    /// also buy no more than `u64::MAX` shares at the low price, which bounds
    /// every lot and share count the report produces.
    pub fn validate(&self, max_levels: usize, lot_size: u64) -> Result<(), InputError> {
        let fields = [
            ("low price", self.low_price),
            ("high price", self.high_price),
            ("price tick", self.price_tick),
            ("available capital", self.available_capital),
        ];
        for (field, value) in fields {
            if value <= Decimal::ZERO {
                return Err(InputError::NonPositive { field, value });
            }
        }

        if self.low_price >= self.high_price {
            return Err(InputError::InvertedRange {
                low: self.low_price,
                high: self.high_price,
            });
        }

        let levels = level_count(self.low_price, self.high_price, self.price_tick);
        if levels > max_levels as u64 {
            return Err(InputError::TooManyLevels {
                levels,
                max: max_levels,
            });
        }

        let max_shares = self.available_capital.checked_div(self.low_price);
        if !max_shares.is_some_and(|shares| shares <= Decimal::from(u64::MAX)) {
            return Err(InputError::CapitalTooLarge {
                capital: self.available_capital,
                low: self.low_price,
            });
        }

        if self.high_price.checked_mul(Decimal::from(lot_size)).is_none() {
            return Err(InputError::LotCostOverflow {
                high: self.high_price,
                lot_size,
            });
        }

        Ok(())
    }

    pub fn ladder(&self) -> PriceLadder {
        PriceLadder::generate(self.low_price, self.high_price, self.price_tick)
    }
}

/// One table row, highest price first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRow {
    pub price: Decimal,
    /// Share of available capital spent at this price, in percent
    pub allocation_percentage: Decimal,
    pub lots: u64,
    pub shares: u64,
    pub total_cost: Decimal,
    pub average_purchase_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub total_capital_utilized: Decimal,
    pub remaining_cash: Decimal,
    pub weighted_average_price: Decimal,
    pub total_shares: u64,
    pub total_lots: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub rows: Vec<AllocationRow>,
    pub summary: AllocationSummary,
}

/// Generate the ladder and allot capital across it.
///
/// Assumes `request` already passed [`AllocationRequest::validate`]; invalid
/// bounds still produce a (possibly empty) report rather than a failure.
pub fn compute(request: &AllocationRequest, lot_size: u64) -> AllocationReport {
    let ladder = request.ladder();
    let result = ExponentialAllotment::new(lot_size).allot(request.available_capital, ladder.prices());

    let rows: Vec<AllocationRow> = result
        .purchases
        .iter()
        .map(|p| AllocationRow {
            price: p.price,
            allocation_percentage: to_percent(p.percentage),
            lots: p.lots,
            shares: p.lots.saturating_mul(lot_size),
            total_cost: p.total,
            average_purchase_price: p.average,
        })
        .collect();

    let total_lots = result.total_lots();
    let summary = AllocationSummary {
        total_capital_utilized: result.total_sum,
        remaining_cash: request.available_capital - result.total_sum,
        weighted_average_price: result.final_average,
        total_shares: total_lots.saturating_mul(lot_size),
        total_lots,
    };

    debug!(
        levels = rows.len(),
        utilized = %summary.total_capital_utilized,
        remaining = %summary.remaining_cash,
        "Allocation report built"
    );

    AllocationReport { rows, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sci(value: &str) -> Decimal {
        Decimal::from_scientific(value).unwrap()
    }

    fn dip_request() -> AllocationRequest {
        AllocationRequest::new(dec!(90), dec!(100), dec!(5), dec!(100_000))
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_valid_request_passes() {
        assert!(dip_request().validate(1000, 100).is_ok());
    }

    #[test]
    fn test_non_positive_fields_rejected() {
        let mut request = dip_request();
        request.price_tick = Decimal::ZERO;
        assert_eq!(
            request.validate(1000, 100),
            Err(InputError::NonPositive {
                field: "price tick",
                value: Decimal::ZERO
            })
        );

        let mut request = dip_request();
        request.available_capital = dec!(-1);
        assert!(matches!(
            request.validate(1000, 100),
            Err(InputError::NonPositive { field: "available capital", .. })
        ));
    }

    #[test]
    fn test_equal_or_inverted_bounds_rejected() {
        let equal = AllocationRequest::new(dec!(100), dec!(100), dec!(5), dec!(100_000));
        assert!(matches!(
            equal.validate(1000, 100),
            Err(InputError::InvertedRange { .. })
        ));

        let inverted = AllocationRequest::new(dec!(110), dec!(100), dec!(5), dec!(100_000));
        assert!(matches!(
            inverted.validate(1000, 100),
            Err(InputError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_too_many_levels_rejected() {
        let request = AllocationRequest::new(dec!(1), dec!(1000), dec!(0.01), dec!(100_000));
        assert_eq!(
            request.validate(1000, 100),
            Err(InputError::TooManyLevels {
                levels: 99_901,
                max: 1000
            })
        );
    }

    #[test]
    fn test_share_count_beyond_u64_rejected() {
        let request = AllocationRequest::new(dec!(0.01), dec!(0.02), dec!(0.01), sci("1e20"));
        assert_eq!(
            request.validate(1000, 1000),
            Err(InputError::CapitalTooLarge {
                capital: sci("1e20"),
                low: dec!(0.01)
            })
        );

        let request = AllocationRequest::new(dec!(1), dec!(2), dec!(1), sci("1e23"));
        assert!(matches!(
            request.validate(1000, 100),
            Err(InputError::CapitalTooLarge { .. })
        ));
    }

    #[test]
    fn test_large_capital_within_bound_accepted() {
        // 1e18 shares at the low price, below u64::MAX
        let request = AllocationRequest::new(dec!(1), dec!(2), dec!(1), sci("1e18"));
        assert!(request.validate(1000, 100).is_ok());

        let report = compute(&request, 100);
        assert!(report.summary.total_lots > 0);
        assert!(report.summary.total_capital_utilized <= request.available_capital);
        assert_eq!(report.summary.total_shares, report.summary.total_lots * 100);
    }

    #[test]
    fn test_lot_cost_overflow_rejected() {
        let request = AllocationRequest::new(sci("1e27"), sci("2e27"), sci("1e27"), sci("1e28"));
        assert!(matches!(
            request.validate(1000, 1000),
            Err(InputError::LotCostOverflow { lot_size: 1000, .. })
        ));
    }

    // =========================================================================
    // Report Tests
    // =========================================================================

    #[test]
    fn test_report_rows_and_summary() {
        let report = compute(&dip_request(), 100);

        let prices: Vec<Decimal> = report.rows.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![dec!(100), dec!(95), dec!(90)]);

        assert_eq!(report.rows[0].allocation_percentage, dec!(10));
        assert_eq!(report.rows[1].allocation_percentage, dec!(28.5));
        assert_eq!(report.rows[2].allocation_percentage, dec!(45));
        assert_eq!(report.rows[2].shares, 500);

        assert_eq!(report.summary.total_capital_utilized, dec!(83_500));
        assert_eq!(report.summary.remaining_cash, dec!(16_500));
        assert_eq!(report.summary.total_shares, 900);
        assert_eq!(report.summary.total_lots, 9);
        assert_eq!(
            report.summary.weighted_average_price,
            report.rows[2].average_purchase_price
        );
    }

    #[test]
    fn test_total_cost_sums_to_utilized() {
        let request = AllocationRequest::new(dec!(4000), dec!(5000), dec!(25), dec!(250_000_000));
        let report = compute(&request, 100);

        let total: Decimal = report.rows.iter().map(|r| r.total_cost).sum();
        assert_eq!(total, report.summary.total_capital_utilized);
        assert!(report.summary.total_capital_utilized <= request.available_capital);
        assert!(report.summary.remaining_cash >= Decimal::ZERO);
    }

    #[test]
    fn test_unvalidated_inverted_request_is_empty() {
        let request = AllocationRequest::new(dec!(110), dec!(100), dec!(5), dec!(100_000));
        let report = compute(&request, 100);

        assert!(report.rows.is_empty());
        assert_eq!(report.summary.total_capital_utilized, Decimal::ZERO);
        assert_eq!(report.summary.remaining_cash, dec!(100_000));
        assert_eq!(report.summary.weighted_average_price, Decimal::ZERO);
    }

    #[test]
    fn test_unvalidated_share_overflow_saturates() {
        let request = AllocationRequest::new(dec!(0.01), dec!(0.02), dec!(0.01), sci("1e20"));
        let report = compute(&request, 1000);

        assert!(report.rows.iter().all(|r| r.lots > 0));
        assert_eq!(report.summary.total_shares, u64::MAX);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = compute(&dip_request(), 100);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["rows"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["summary"]["total_shares"], 900);
        assert_eq!(json["summary"]["remaining_cash"], "16500");
    }
}
