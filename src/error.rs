//! Input validation errors raised by the calling layer before the
//! allocation core runs.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: Decimal },

    #[error("low price {low} must be below high price {high}")]
    InvertedRange { low: Decimal, high: Decimal },

    #[error("price range produces {levels} ladder levels, limit is {max}")]
    TooManyLevels { levels: u64, max: usize },

    #[error("capital {capital} at low price {low} buys more shares than can be counted")]
    CapitalTooLarge { capital: Decimal, low: Decimal },

    #[error("high price {high} times lot size {lot_size} overflows")]
    LotCostOverflow { high: Decimal, lot_size: u64 },
}
