//! Sizing logic: Kelly fraction, position calculator, risk/reward, volatility plans.

mod calculator;
mod config;
mod kelly;
mod risk_reward;
mod swing;

pub use calculator::PositionCalculator;
pub use config::CalculatorConfig;
pub use risk_reward::risk_reward;
pub use swing::{plan as swing_plan, SwingInputs, SwingPlan};
