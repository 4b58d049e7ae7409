//! Data models for trade inputs, derived metrics and price bars.

mod direction;
mod inputs;
mod kline;
mod metrics;

pub use direction::{Direction, DirectionMode};
pub use inputs::TradeInputs;
pub use kline::Kline;
pub use metrics::{DerivedMetrics, PriceLevels, RiskProfile, FAVORABLE_RISK_REWARD};
