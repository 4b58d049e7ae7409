//! Wire types for the Binance klines endpoint.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Kline;

/// One row of `/api/v3/klines`.
///
/// Binance sends each bar as a positional array:
/// `[openTime, open, high, low, close, volume, closeTime,
///   quoteVolume, trades, takerBuyBase, takerBuyQuote, ignore]`
/// with prices and volumes as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct KlineRow(
    pub i64,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub Decimal,
    pub i64,
    pub Decimal,
    pub u64,
    pub Decimal,
    pub Decimal,
    pub serde_json::Value,
);

impl KlineRow {
    /// Convert to a [`Kline`]; `None` when a timestamp is out of range.
    pub fn into_kline(self) -> Option<Kline> {
        Some(Kline {
            open_time: DateTime::<Utc>::from_timestamp_millis(self.0)?,
            open: self.1,
            high: self.2,
            low: self.3,
            close: self.4,
            volume: self.5,
            close_time: DateTime::<Utc>::from_timestamp_millis(self.6)?,
        })
    }
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}

/// Query parameters for the klines endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct KlinesParams<'a> {
    pub symbol: &'a str,
    pub interval: &'a str,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_row() {
        let json = r#"[1700000000000,"2000.10","2105.00","1990.50","2050.00","1234.5",1700014399999,"2500000.0",4321,"600.1","1200000.0","0"]"#;
        let row: KlineRow = serde_json::from_str(json).unwrap();
        let kline = row.into_kline().unwrap();

        assert_eq!(kline.high, dec!(2105.00));
        assert_eq!(kline.low, dec!(1990.50));
        assert_eq!(kline.open_time.timestamp_millis(), 1_700_000_000_000);
        assert!(kline.close_time > kline.open_time);
    }

    #[test]
    fn test_parse_error_body() {
        let body: ApiErrorResponse =
            serde_json::from_str(r#"{"code":-1121,"msg":"Invalid symbol."}"#).unwrap();
        assert_eq!(body.code, -1121);
        assert_eq!(body.msg, "Invalid symbol.");
    }
}
