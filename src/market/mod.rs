//! Price history: Binance klines, swing estimation and the volatility tracker.

mod binance;
mod tracker;
mod types;
mod volatility;

use std::future::Future;

use anyhow::Result;

use crate::models::Kline;

pub use binance::BinanceClient;
pub use tracker::{FetchOutcome, VolatilityTracker};

/// Source of recent candlesticks for a symbol.
pub trait PriceHistory: Send + Sync + 'static {
    /// Fetch up to `limit` bars of `interval`, oldest first.
    fn recent_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Kline>>> + Send;
}
