//! Kelly position calculator: prices, win rate and capital to a sized position.

use tracing::debug;

use crate::error::SizingError;
use crate::models::{DerivedMetrics, Direction, PriceLevels, TradeInputs};

use super::kelly::kelly_fraction;

/// Calculator for Kelly-sized leveraged positions.
pub struct PositionCalculator;

impl PositionCalculator {
    /// Validate the direction and derive all sizing metrics.
    ///
    /// Stop and target must sit strictly on opposite sides of the entry
    /// price, matching the explicit direction when one is given.
    pub fn compute(inputs: &TradeInputs) -> Result<DerivedMetrics, SizingError> {
        let direction =
            inputs
                .direction
                .resolve(inputs.entry_price, inputs.stop_price, inputs.target_price)?;

        Ok(Self::derive(inputs, direction))
    }

    /// Derive sizing metrics for an already resolved direction.
    ///
    /// Degenerate prices never panic: an undefined quantity comes back as
    /// `None` and anything sized from it as zero.
    pub fn derive(inputs: &TradeInputs, direction: Direction) -> DerivedMetrics {
        let entry = inputs.entry_price;
        let stop_diff = (inputs.stop_price - entry).abs();
        let target_diff = (entry - inputs.target_price).abs();

        let stop_loss_pct = (entry > 0.0).then(|| stop_diff / entry);
        let risk_reward = (stop_diff > 0.0).then(|| target_diff / stop_diff);

        let kelly_fraction = kelly_fraction(risk_reward, inputs.win_rate, inputs.use_half_kelly);
        let risk_amount = inputs.capital * kelly_fraction;

        let nominal_position = match stop_loss_pct {
            Some(pct) if pct > 0.0 => risk_amount / pct,
            _ => 0.0,
        };
        let quantity = if entry > 0.0 {
            nominal_position / entry
        } else {
            0.0
        };
        let margin = (inputs.leverage > 0.0).then(|| nominal_position / inputs.leverage);

        let levels = match (stop_loss_pct, risk_reward) {
            (Some(pct), Some(b)) => Some(PriceLevels::project(entry, pct, b, direction)),
            _ => None,
        };

        debug!(
            direction = %direction,
            b = ?risk_reward,
            f = kelly_fraction,
            nominal = nominal_position,
            "Derived position metrics"
        );

        DerivedMetrics {
            direction,
            stop_diff,
            target_diff,
            stop_loss_pct,
            risk_reward,
            kelly_fraction,
            risk_amount,
            nominal_position,
            quantity,
            margin,
            loss_amount: quantity * stop_diff,
            profit_amount: quantity * target_diff,
            levels,
            half_kelly: inputs.use_half_kelly,
        }
    }
}
