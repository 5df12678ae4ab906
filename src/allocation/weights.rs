//! Exponential weighting scheme for ladder levels.
//!
//! Level `i` (0 = highest price) carries weight `A1 * E^(K * (i - 1))`, so
//! the cheapest level always receives the largest share of capital.

/// Scale coefficient of the weight curve.
pub const A1: f64 = 1.63;
/// Base of the exponential, truncated to five places.
pub const E: f64 = 2.71828;
/// Growth rate per ladder level.
pub const K: f64 = 0.5;

/// Raw weight for ladder position `index`.
pub fn weight(index: usize) -> f64 {
    A1 * E.powf(K * (index as f64 - 1.0))
}

/// Raw weights for a ladder of `levels` positions.
///
/// Overflows to infinity beyond roughly 1400 levels; use [`cash_shares`]
/// for normalization.
pub fn weights(levels: usize) -> Vec<f64> {
    (0..levels).map(weight).collect()
}

/// Fraction of capital assigned to each of `levels` positions.
///
/// Equal to `weight(i) / sum(weights)`. Every weight is first divided by the
/// largest one (`A1` cancels), which keeps the terms in `(0, 1]` for any
/// ladder length.
pub fn cash_shares(levels: usize) -> Vec<f64> {
    if levels == 0 {
        return Vec::new();
    }

    let top = (levels - 1) as f64;
    let relative: Vec<f64> = (0..levels)
        .map(|i| E.powf(K * (i as f64 - top)))
        .collect();
    let total: f64 = relative.iter().sum();

    relative.into_iter().map(|w| w / total).collect()
}
