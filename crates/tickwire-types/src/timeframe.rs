//! OHLCV aggregation timeframe definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Candle aggregation timeframe.
///
/// The set is fixed to the bucket widths the streaming aggregator
/// supports, so an unsupported timeframe is unrepresentable rather than
/// a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1-minute candles.
    #[default]
    #[serde(rename = "1m")]
    Minute1,
    /// 5-minute candles.
    #[serde(rename = "5m")]
    Minute5,
    /// 1-hour candles.
    #[serde(rename = "1h")]
    Hour1,
}

impl Timeframe {
    /// Returns the bucket width in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        match self {
            Self::Minute1 => 60,
            Self::Minute5 => 300,
            Self::Hour1 => 3600,
        }
    }

    /// Returns the bucket width in milliseconds.
    #[must_use]
    pub const fn milliseconds(&self) -> u64 {
        self.seconds() * 1000
    }

    /// Returns the timeframe as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute5 => "5m",
            Self::Hour1 => "1h",
        }
    }

    /// Returns all available timeframes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Minute1, Self::Minute5, Self::Hour1]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "m1" | "minute" | "minute1" => Ok(Self::Minute1),
            "5m" | "m5" | "minute5" => Ok(Self::Minute5),
            "1h" | "h1" | "hour" | "hour1" => Ok(Self::Hour1),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timeframe '{}', expected one of: 1m, 5m, 1h",
            self.0
        )
    }
}

impl std::error::Error for TimeframeParseError {}
