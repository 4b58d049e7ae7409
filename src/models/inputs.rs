//! Trade parameters entered by the user.

use serde::{Deserialize, Serialize};

use super::direction::DirectionMode;

/// Snapshot of the parameters for one sizing calculation.
///
/// Built fresh from user input every time something changes; nothing
/// derived from it is cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeInputs {
    /// Account equity in quote currency
    pub capital: f64,

    /// Planned entry price
    pub entry_price: f64,

    /// Stop-loss price
    pub stop_price: f64,

    /// Take-profit price
    pub target_price: f64,

    /// Probability of hitting the target before the stop (0.0 to 1.0)
    pub win_rate: f64,

    /// Leverage multiple applied to the nominal position
    pub leverage: f64,

    /// Halve the Kelly fraction for a more conservative size
    pub use_half_kelly: bool,

    /// Explicit side, or inferred from the prices
    pub direction: DirectionMode,
}

impl TradeInputs {
    /// Create inputs with a coin-flip win rate, no leverage and direction inference.
    pub fn new(capital: f64, entry_price: f64, stop_price: f64, target_price: f64) -> Self {
        Self {
            capital,
            entry_price,
            stop_price,
            target_price,
            win_rate: 0.5,
            leverage: 1.0,
            use_half_kelly: false,
            direction: DirectionMode::Auto,
        }
    }

    pub fn with_win_rate(mut self, win_rate: f64) -> Self {
        self.win_rate = win_rate;
        self
    }

    pub fn with_leverage(mut self, leverage: f64) -> Self {
        self.leverage = leverage;
        self
    }

    pub fn with_half_kelly(mut self, use_half_kelly: bool) -> Self {
        self.use_half_kelly = use_half_kelly;
        self
    }

    pub fn with_direction(mut self, direction: impl Into<DirectionMode>) -> Self {
        self.direction = direction.into();
        self
    }
}
