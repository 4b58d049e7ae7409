//! Error types for position sizing.

use thiserror::Error;

use crate::models::DirectionMode;

/// Errors raised by the sizing calculators.
///
/// Degenerate numeric input (zero stop distance, non-positive entry or
/// leverage) is not an error: the affected fields come back as `None` or zero.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    /// Stop and target do not sit on opposite sides of the entry price
    /// in a way that matches a long or short trade.
    #[error(
        "prices do not form a valid {direction} trade: entry {entry}, stop {stop}, target {target} \
         (long needs stop < entry < target, short needs target < entry < stop)"
    )]
    InvalidDirection {
        direction: DirectionMode,
        entry: f64,
        stop: f64,
        target: f64,
    },
}
