//! Text rendering of sizing results.

use std::fmt;

use crate::models::{DerivedMetrics, TradeInputs, FAVORABLE_RISK_REWARD};
use crate::sizing::SwingPlan;

/// Format with fixed decimals; undefined or non-finite values print as `-`.
pub fn fmt_num(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => "-".to_string(),
    }
}

/// Fraction rendered as a percentage.
pub fn fmt_pct(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}%", decimals, v * 100.0),
        _ => "-".to_string(),
    }
}

/// Position calculator output.
pub struct PositionReport<'a> {
    pub inputs: &'a TradeInputs,
    pub metrics: &'a DerivedMetrics,
}

impl fmt::Display for PositionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metrics;
        let rating = if m.is_favorable() { "favorable" } else { "unfavorable" };

        writeln!(f, "\n{:=^56}", " KELLY POSITION ")?;
        writeln!(f, "Direction:         {} (entry {})", m.direction, fmt_num(Some(self.inputs.entry_price), 2))?;
        writeln!(f)?;
        writeln!(f, "--- Edge ---")?;
        writeln!(f, "Risk/Reward (b):   {} ({}, threshold {:.1})", fmt_num(m.risk_reward, 2), rating, FAVORABLE_RISK_REWARD)?;
        writeln!(
            f,
            "Kelly Fraction:    {}{}",
            fmt_pct(Some(m.kelly_fraction), 2),
            if m.half_kelly { " (half Kelly)" } else { "" }
        )?;
        writeln!(f, "Risk Amount:       {} USDT", fmt_num(Some(m.risk_amount), 2))?;
        writeln!(f, "Stop Loss:         {}", fmt_pct(m.stop_loss_pct, 3))?;
        writeln!(f)?;
        writeln!(f, "--- Position ---")?;
        writeln!(f, "Nominal Position:  {} USDT", fmt_num(Some(m.nominal_position), 2))?;
        writeln!(f, "Margin:            {} USDT (x{})", fmt_num(m.margin, 2), fmt_num(Some(self.inputs.leverage), 0))?;
        writeln!(f, "Quantity:          {}", fmt_num(Some(m.quantity), 4))?;
        writeln!(f, "Stop/Target Diff:  {} / {} USDT", fmt_num(Some(m.stop_diff), 2), fmt_num(Some(m.target_diff), 2))?;
        writeln!(f, "Loss at Stop:      {} USDT", fmt_num(Some(m.loss_amount), 2))?;
        writeln!(f, "Profit at Target:  {} USDT", fmt_num(Some(m.profit_amount), 2))?;

        if let Some(levels) = m.levels {
            writeln!(f)?;
            writeln!(f, "--- Levels ---")?;
            writeln!(f, "Stop Loss:         {}", fmt_num(Some(levels.stop_loss), 2))?;
            writeln!(f, "Break Even:        {}", fmt_num(Some(levels.break_even), 2))?;
            writeln!(f, "Target:            {}", fmt_num(Some(levels.target), 2))?;
        }

        if m.suggests_half_kelly() {
            writeln!(f)?;
            writeln!(f, "Note: b is above 2.0, consider half Kelly (--half-kelly) to limit risk.")?;
        }
        writeln!(f, "{:=^56}", "")?;
        Ok(())
    }
}

/// Volatility-based plan output.
pub struct SwingReport<'a> {
    pub symbol: &'a str,
    pub plan: &'a SwingPlan,
}

impl fmt::Display for SwingReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.plan;

        writeln!(f, "\n{:=^56}", format!(" KELLY PLAN {} ", self.symbol))?;
        writeln!(f, "Direction:         {}", p.direction)?;
        writeln!(f, "Kelly Fraction:    {}", fmt_pct(Some(p.kelly_fraction), 2))?;
        writeln!(f, "Risk Amount:       {} USDT", fmt_num(Some(p.risk_amount), 2))?;
        writeln!(f, "Stop Loss:         {}", fmt_pct(Some(p.stop_loss_pct), 2))?;
        writeln!(f, "Nominal Position:  {} USDT", fmt_num(Some(p.nominal_position), 2))?;
        writeln!(f, "Margin Used:       {} USDT", fmt_num(p.margin, 2))?;
        writeln!(f)?;
        writeln!(f, "{:<12} {:>14} {:>14}", "STATUS", "P&L (USDT)", "PRICE")?;
        writeln!(f, "{}", "-".repeat(42))?;
        for point in &p.profile.points {
            writeln!(
                f,
                "{:<12} {:>14} {:>14}",
                point.outcome.label(),
                fmt_num(Some(point.pnl), 2),
                fmt_num(Some(point.price), 2)
            )?;
        }
        writeln!(f, "{:=^56}", "")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::PositionCalculator;

    #[test]
    fn test_fmt_helpers() {
        assert_eq!(fmt_num(Some(1.66666), 4), "1.6667");
        assert_eq!(fmt_num(None, 2), "-");
        assert_eq!(fmt_num(Some(f64::INFINITY), 2), "-");
        assert_eq!(fmt_pct(Some(0.05), 3), "5.000%");
        assert_eq!(fmt_pct(Some(0.25 / 1.5), 2), "16.67%");
    }

    #[test]
    fn test_position_report_fields() {
        let inputs = TradeInputs::new(1000.0, 2000.0, 1900.0, 2150.0).with_leverage(20.0);
        let metrics = PositionCalculator::compute(&inputs).unwrap();
        let text = PositionReport {
            inputs: &inputs,
            metrics: &metrics,
        }
        .to_string();

        assert!(text.contains("Risk/Reward (b):   1.50 (favorable"));
        assert!(text.contains("Kelly Fraction:    16.67%"));
        assert!(text.contains("Risk Amount:       166.67 USDT"));
        assert!(text.contains("Stop Loss:         5.000%"));
        assert!(text.contains("Quantity:          1.6667"));
        assert!(!text.contains("consider half Kelly"));
    }
}
