//! Binance spot market-data client for recent candlesticks.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::Kline;

use super::types::{ApiErrorResponse, KlineRow, KlinesParams};
use super::PriceHistory;

const BINANCE_API_BASE: &str = "https://api.binance.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_KLINES: u32 = 1000;

/// Client for the public Binance klines endpoint (read-only).
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    /// Create a new client against the public API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(BINANCE_API_BASE.to_string())
    }

    /// Create with custom base URL (mirrors, testnet).
    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the most recent `limit` bars for a symbol, oldest first.
    pub async fn get_klines(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Kline>> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let params = KlinesParams {
            symbol,
            interval,
            limit: limit.clamp(1, MAX_KLINES),
        };

        debug!(url = %url, symbol = %symbol, interval = %interval, limit = params.limit, "Fetching klines");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("Failed to fetch klines")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(err) => anyhow::bail!("Klines request failed: {} - {} ({})", status, err.msg, err.code),
                Err(_) => anyhow::bail!("Klines request failed: {} - {}", status, body),
            }
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .context("Failed to parse klines response")?;

        Ok(parse_rows(rows))
    }
}

/// Decode raw rows, dropping any that do not parse.
fn parse_rows(rows: Vec<serde_json::Value>) -> Vec<Kline> {
    let mut klines: Vec<Kline> = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<KlineRow>(row) {
            Ok(parsed) => parsed.into_kline(),
            Err(e) => {
                warn!(error = %e, "Skipping malformed kline row");
                None
            }
        })
        .collect();

    klines.sort_by_key(|k| k.open_time);
    klines
}

impl PriceHistory for BinanceClient {
    async fn recent_klines(&self, symbol: &str, interval: &str, limit: u32) -> Result<Vec<Kline>> {
        self.get_klines(symbol, interval, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_rows_skips_malformed_and_sorts() {
        let rows = vec![
            json!([1700014400000i64, "2050", "2080", "2040", "2070", "10", 1700028799999i64, "0", 5, "0", "0", "0"]),
            json!(["not", "a", "kline"]),
            json!([1700000000000i64, "2000", "2100", "1990", "2050", "10", 1700014399999i64, "0", 5, "0", "0", "0"]),
        ];

        let klines = parse_rows(rows);
        assert_eq!(klines.len(), 2);
        assert_eq!(klines[0].high, dec!(2100));
        assert!(klines[0].open_time < klines[1].open_time);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = BinanceClient::with_base_url("http://localhost:9000/".to_string()).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
