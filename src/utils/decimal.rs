//! Decimal arithmetic utilities for financial calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Round down to a whole number of units (e.g. board lots).
///
/// Returns `None` when the count does not fit in a `Decimal`.
pub fn floor_units(amount: Decimal, unit_cost: Decimal) -> Option<Decimal> {
    if unit_cost <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    amount
        .checked_div(unit_cost)
        .map(|units| units.floor().max(Decimal::ZERO))
}

/// Convert a fraction (0.25) into percent (25).
pub fn to_percent(fraction: Decimal) -> Decimal {
    fraction * dec!(100)
}

/// Safe division that returns zero if divisor is zero or the quotient
/// overflows.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}
