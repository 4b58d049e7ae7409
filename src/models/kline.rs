//! Candlestick bar returned by the price-history source.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub close_time: DateTime<Utc>,
}

impl Kline {
    /// Relative high-low range of the bar: (high - low) / low.
    ///
    /// `None` when the low is not positive.
    pub fn swing(&self) -> Option<Decimal> {
        if self.low <= Decimal::ZERO {
            return None;
        }
        Some((self.high - self.low) / self.low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(high: Decimal, low: Decimal) -> Kline {
        Kline {
            open_time: Utc::now(),
            open: low,
            high,
            low,
            close: high,
            volume: dec!(1),
            close_time: Utc::now(),
        }
    }

    #[test]
    fn test_swing() {
        assert_eq!(bar(dec!(2100), dec!(2000)).swing(), Some(dec!(0.05)));
        assert_eq!(bar(dec!(10), dec!(0)).swing(), None);
    }
}
