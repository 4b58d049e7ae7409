//! Volatility proxy from recent high/low ranges.

use rust_decimal::prelude::ToPrimitive;
use statrs::statistics::Statistics;

use crate::models::Kline;

/// Largest relative high-low range across the window.
///
/// Bars with a non-positive low are ignored. `None` when no bar is usable.
pub fn max_swing(klines: &[Kline]) -> Option<f64> {
    let swings: Vec<f64> = klines
        .iter()
        .filter_map(Kline::swing)
        .filter_map(|s| s.to_f64())
        .collect();

    if swings.is_empty() {
        return None;
    }

    Some(Statistics::max(swings))
}
