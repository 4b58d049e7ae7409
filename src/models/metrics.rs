//! Derived sizing metrics, price levels and the risk profile.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Risk/reward ratio at or above which a setup counts as favorable.
pub const FAVORABLE_RISK_REWARD: f64 = 1.5;

/// Above this risk/reward ratio, half Kelly is recommended.
pub const HALF_KELLY_ADVISORY_RATIO: f64 = 2.0;

/// Stop, break-even and target prices for a trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    pub stop_loss: f64,
    pub break_even: f64,
    pub target: f64,
}

impl PriceLevels {
    /// Project stop and target from the entry price.
    ///
    /// Long subtracts the stop-loss percentage and adds `pct * risk_reward`;
    /// short is the mirror image. Break-even is the entry itself.
    pub fn project(
        entry_price: f64,
        stop_loss_pct: f64,
        risk_reward: f64,
        direction: Direction,
    ) -> Self {
        let (stop_loss, target) = match direction {
            Direction::Long => (
                entry_price * (1.0 - stop_loss_pct),
                entry_price * (1.0 + stop_loss_pct * risk_reward),
            ),
            Direction::Short => (
                entry_price * (1.0 + stop_loss_pct),
                entry_price * (1.0 - stop_loss_pct * risk_reward),
            ),
        };

        Self {
            stop_loss,
            break_even: entry_price,
            target,
        }
    }
}

/// Everything derived from a [`TradeInputs`](super::TradeInputs) snapshot.
///
/// Fields that cannot be computed from degenerate input are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub direction: Direction,

    /// Absolute distance from entry to stop
    pub stop_diff: f64,

    /// Absolute distance from entry to target
    pub target_diff: f64,

    /// Stop distance relative to entry; `None` when entry <= 0
    pub stop_loss_pct: Option<f64>,

    /// Risk/reward ratio b; `None` when the stop distance is zero
    pub risk_reward: Option<f64>,

    /// Fraction of capital to risk (0.0 to 1.0)
    pub kelly_fraction: f64,

    /// Capital at risk if the stop is hit
    pub risk_amount: f64,

    /// Notional exposure before leverage
    pub nominal_position: f64,

    /// Position size in units of the instrument
    pub quantity: f64,

    /// Capital committed as margin; `None` when leverage <= 0
    pub margin: Option<f64>,

    /// Loss if the stop is hit
    pub loss_amount: f64,

    /// Profit if the target is hit
    pub profit_amount: f64,

    pub levels: Option<PriceLevels>,

    /// Whether half Kelly was applied
    pub half_kelly: bool,
}

impl DerivedMetrics {
    pub fn is_favorable(&self) -> bool {
        self.risk_reward
            .map(|b| b >= FAVORABLE_RISK_REWARD)
            .unwrap_or(false)
    }

    /// Full Kelly on a wide target is aggressive; advise halving.
    pub fn suggests_half_kelly(&self) -> bool {
        !self.half_kelly
            && self
                .risk_reward
                .map(|b| b > HALF_KELLY_ADVISORY_RATIO)
                .unwrap_or(false)
    }
}

/// Labelled point on the risk profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    StopLoss,
    BreakEven,
    Target,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::StopLoss => "Stop Loss",
            Outcome::BreakEven => "Break Even",
            Outcome::Target => "Target",
        }
    }
}

/// P&L and price at one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    pub outcome: Outcome,
    pub pnl: f64,
    pub price: f64,
}

/// P&L at stop, break-even and target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub points: [RiskPoint; 3],
}

impl RiskProfile {
    pub fn new(risk_amount: f64, risk_reward: f64, levels: PriceLevels) -> Self {
        Self {
            points: [
                RiskPoint {
                    outcome: Outcome::StopLoss,
                    pnl: -risk_amount,
                    price: levels.stop_loss,
                },
                RiskPoint {
                    outcome: Outcome::BreakEven,
                    pnl: 0.0,
                    price: levels.break_even,
                },
                RiskPoint {
                    outcome: Outcome::Target,
                    pnl: risk_amount * risk_reward,
                    price: levels.target,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_long_and_short_mirror() {
        let long = PriceLevels::project(2000.0, 0.05, 1.5, Direction::Long);
        assert!((long.stop_loss - 1900.0).abs() < 1e-9);
        assert!((long.target - 2150.0).abs() < 1e-9);
        assert_eq!(long.break_even, 2000.0);

        let short = PriceLevels::project(2000.0, 0.05, 1.5, Direction::Short);
        assert!((short.stop_loss - 2100.0).abs() < 1e-9);
        assert!((short.target - 1850.0).abs() < 1e-9);
    }

    #[test]
    fn test_risk_profile_points() {
        let levels = PriceLevels::project(2000.0, 0.05, 2.0, Direction::Long);
        let profile = RiskProfile::new(50.0, 2.0, levels);

        assert_eq!(profile.points[0].pnl, -50.0);
        assert_eq!(profile.points[1].pnl, 0.0);
        assert_eq!(profile.points[2].pnl, 100.0);
        assert_eq!(profile.points[1].price, 2000.0);
        assert_eq!(profile.points[2].outcome.label(), "Target");
    }
}
