//! Kelly sizing with the stop distance taken from recent volatility.
//!
//! Instead of deriving the risk/reward ratio from explicit prices, the
//! caller supplies a target ratio and the stop-loss percentage comes from
//! the maximum recent high-low swing of the instrument.

use serde::{Deserialize, Serialize};

use crate::models::{Direction, PriceLevels, RiskProfile};

use super::kelly::kelly_fraction;

/// Parameters for a volatility-driven plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingInputs {
    pub capital: f64,
    /// Target risk/reward ratio b
    pub risk_reward: f64,
    pub win_rate: f64,
    pub leverage: f64,
    pub entry_price: f64,
    pub use_half_kelly: bool,
    pub direction: Direction,
    /// Stop distance as a fraction of entry, usually the max recent swing
    pub stop_loss_pct: f64,
}

/// Sized position with projected levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPlan {
    pub direction: Direction,
    pub kelly_fraction: f64,
    pub risk_amount: f64,
    pub stop_loss_pct: f64,
    pub nominal_position: f64,
    /// `None` when leverage <= 0
    pub margin: Option<f64>,
    pub levels: PriceLevels,
    pub profile: RiskProfile,
}

/// Build a plan from a risk/reward target and a volatility stop.
pub fn plan(inputs: &SwingInputs) -> SwingPlan {
    let kelly_fraction = kelly_fraction(
        Some(inputs.risk_reward),
        inputs.win_rate,
        inputs.use_half_kelly,
    );
    let risk_amount = inputs.capital * kelly_fraction;

    let nominal_position = if inputs.stop_loss_pct > 0.0 {
        risk_amount / inputs.stop_loss_pct
    } else {
        0.0
    };
    let margin = (inputs.leverage > 0.0).then(|| nominal_position / inputs.leverage);

    let levels = PriceLevels::project(
        inputs.entry_price,
        inputs.stop_loss_pct,
        inputs.risk_reward,
        inputs.direction,
    );

    SwingPlan {
        direction: inputs.direction,
        kelly_fraction,
        risk_amount,
        stop_loss_pct: inputs.stop_loss_pct,
        nominal_position,
        margin,
        levels,
        profile: RiskProfile::new(risk_amount, inputs.risk_reward, levels),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> SwingInputs {
        SwingInputs {
            capital: 1000.0,
            risk_reward: 1.5,
            win_rate: 0.5,
            leverage: 20.0,
            entry_price: 2000.0,
            use_half_kelly: true,
            direction: Direction::Long,
            stop_loss_pct: 0.05,
        }
    }

    #[test]
    fn test_half_kelly_plan() {
        let p = plan(&inputs());

        assert!((p.kelly_fraction - 0.25 / 3.0).abs() < 1e-12);
        assert!((p.risk_amount - 83.333).abs() < 1e-3);
        assert!((p.nominal_position - 1666.667).abs() < 1e-3);
        assert!((p.margin.unwrap() - 83.333).abs() < 1e-3);
        assert!((p.levels.stop_loss - 1900.0).abs() < 1e-9);
        assert!((p.levels.target - 2150.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_scales_with_ratio() {
        let p = plan(&inputs());
        let [stop, even, target] = p.profile.points;

        assert_eq!(stop.pnl, -p.risk_amount);
        assert_eq!(even.pnl, 0.0);
        assert_eq!(target.pnl, p.risk_amount * 1.5);
        assert_eq!(even.price, 2000.0);
    }

    #[test]
    fn test_short_levels() {
        let p = plan(&SwingInputs {
            direction: Direction::Short,
            ..inputs()
        });
        assert!((p.levels.stop_loss - 2100.0).abs() < 1e-9);
        assert!((p.levels.target - 1850.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_stop_and_leverage() {
        let p = plan(&SwingInputs {
            stop_loss_pct: 0.0,
            leverage: 0.0,
            ..inputs()
        });
        assert_eq!(p.nominal_position, 0.0);
        assert_eq!(p.margin, None);
        assert!(p.risk_amount > 0.0);
    }

    #[test]
    fn test_no_edge_risks_nothing() {
        let p = plan(&SwingInputs {
            win_rate: 0.2,
            ..inputs()
        });
        assert_eq!(p.kelly_fraction, 0.0);
        assert_eq!(p.nominal_position, 0.0);
    }
}
