//! OHLCV (candlestick) data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed OHLCV candle for one fixed time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time (start of the period).
    pub open_time: DateTime<Utc>,
    /// Ticker symbol the candle was built from.
    pub symbol: String,
    /// Opening price (first trade of the bucket).
    pub open: f64,
    /// Highest price during the bucket.
    pub high: f64,
    /// Lowest price during the bucket.
    pub low: f64,
    /// Closing price (last trade of the bucket).
    pub close: f64,
    /// Total traded quantity (ticks without a quantity contribute zero).
    pub volume: f64,
    /// Number of price-bearing ticks in the candle.
    pub tick_count: u32,
}

impl Candle {
    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) candle.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) candle.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

impl std::fmt::Display for Candle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} o:{} h:{} l:{} c:{} v:{}",
            self.open_time, self.symbol, self.open, self.high, self.low, self.close, self.volume
        )
    }
}
