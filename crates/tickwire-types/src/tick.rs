//! Stream tick representation.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A single decoded message from the push feed.
///
/// The feed's message schema is sparse and endpoint-dependent: a trade
/// tick carries symbol, timestamp, price and quantity; a quote tick
/// carries ask/bid instead of a trade price; some messages carry only a
/// symbol. Every field is therefore optional and absent keys decode to
/// `None` rather than failing.
///
/// Numeric fields tolerate both JSON numbers and numeric strings, since
/// the crypto feed quotes its prices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tick {
    /// Ticker symbol.
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Timestamp in milliseconds since the Unix epoch.
    #[serde(
        rename = "t",
        default,
        deserialize_with = "de_opt_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp_ms: Option<i64>,
    /// Trade price.
    #[serde(
        rename = "p",
        default,
        deserialize_with = "de_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    /// Trade quantity.
    #[serde(
        rename = "q",
        default,
        deserialize_with = "de_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<f64>,
    /// Ask price (quote and forex feeds).
    #[serde(
        rename = "a",
        alias = "ap",
        default,
        deserialize_with = "de_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub ask: Option<f64>,
    /// Bid price (quote and forex feeds).
    #[serde(
        rename = "b",
        alias = "bp",
        default,
        deserialize_with = "de_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub bid: Option<f64>,
}

impl Tick {
    /// Creates a trade tick. Primarily useful in tests and examples.
    #[must_use]
    pub fn trade(
        symbol: impl Into<String>,
        timestamp_ms: i64,
        price: f64,
        quantity: Option<f64>,
    ) -> Self {
        Self {
            symbol: Some(symbol.into()),
            timestamp_ms: Some(timestamp_ms),
            price: Some(price),
            quantity,
            ask: None,
            bid: None,
        }
    }

    /// Creates a tick carrying only a symbol.
    #[must_use]
    pub fn symbol_only(symbol: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            symbol: Some(symbol.into()),
            timestamp_ms: Some(timestamp_ms),
            ..Self::default()
        }
    }

    /// Returns the timestamp as a UTC datetime, if present and in range.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp_ms.and_then(DateTime::from_timestamp_millis)
    }

    /// Returns true if the tick carries a trade price.
    #[must_use]
    pub const fn has_price(&self) -> bool {
        self.price.is_some()
    }

    /// Returns true if the tick carries no recognized fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.symbol.is_none()
            && self.timestamp_ms.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.ask.is_none()
            && self.bid.is_none()
    }
}

/// Deserializes an optional f64 from a JSON number, numeric string, or null.
fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64()),
        Some(serde_json::Value::String(s)) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid numeric string: {s}"))),
        Some(other) => Err(D::Error::custom(format!(
            "expected number or string, got {other}"
        ))),
    }
}

/// Deserializes an optional millisecond timestamp from a JSON number,
/// numeric string, or null.
fn de_opt_ms<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_f64(deserializer)?.map(|ms| ms as i64))
}
