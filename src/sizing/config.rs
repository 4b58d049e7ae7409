//! Calculator configuration.

use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Defaults for the calculators and the price-history source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Base URL of the kline endpoint host
    pub api_base_url: String,

    /// Symbol whose recent swing sets the stop distance
    pub symbol: String,

    /// Kline interval (e.g. "1h", "4h", "1d")
    pub interval: String,

    /// Number of bars in the volatility window
    pub bar_limit: u32,

    /// Account equity in quote currency
    pub capital: Decimal,

    /// Leverage multiple
    pub leverage: Decimal,

    /// Win rate (0.0 to 1.0)
    pub win_rate: f64,

    /// Target risk/reward ratio for volatility-based plans
    pub risk_reward: f64,

    /// Use half Kelly by default
    pub half_kelly: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.binance.com".to_string(),
            symbol: "ETHUSDT".to_string(),
            interval: "4h".to_string(),
            bar_limit: 50,
            capital: dec!(1000),
            leverage: dec!(20),
            win_rate: 0.5,
            risk_reward: 1.5,
            half_kelly: true,
        }
    }
}

impl CalculatorConfig {
    /// Defaults overridden by `KELLY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = env_var::<String>("KELLY_API_BASE")? {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(symbol) = env_var::<String>("KELLY_SYMBOL")? {
            config.symbol = symbol.to_uppercase();
        }
        if let Some(interval) = env_var("KELLY_INTERVAL")? {
            config.interval = interval;
        }
        if let Some(limit) = env_var("KELLY_BAR_LIMIT")? {
            config.bar_limit = limit;
        }
        if let Some(capital) = env_var("KELLY_CAPITAL")? {
            config.capital = capital;
        }
        if let Some(leverage) = env_var("KELLY_LEVERAGE")? {
            config.leverage = leverage;
        }
        if let Some(win_rate) = env_var("KELLY_WIN_RATE")? {
            config.win_rate = win_rate;
        }

        Ok(config)
    }
}

fn env_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {}", key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.symbol, "ETHUSDT");
        assert_eq!(config.interval, "4h");
        assert_eq!(config.bar_limit, 50);
        assert_eq!(config.capital, dec!(1000));
        assert!(config.half_kelly);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("KELLY_BAR_LIMIT", "120");
        std::env::set_var("KELLY_SYMBOL", "btcusdt");
        std::env::set_var("KELLY_CAPITAL", "2500.50");

        let config = CalculatorConfig::from_env().unwrap();
        assert_eq!(config.bar_limit, 120);
        assert_eq!(config.symbol, "BTCUSDT");
        assert_eq!(config.capital, dec!(2500.50));

        std::env::set_var("KELLY_BAR_LIMIT", "lots");
        assert!(CalculatorConfig::from_env().is_err());

        std::env::remove_var("KELLY_BAR_LIMIT");
        std::env::remove_var("KELLY_SYMBOL");
        std::env::remove_var("KELLY_CAPITAL");
    }
}
