//! Stream client configuration.

use std::time::Duration;

use tickwire_types::Timeframe;

use crate::Subscription;
use crate::url::feed_url;

/// Configuration for a [`StreamClient`](crate::StreamClient).
///
/// Everything beyond the subscription itself has a working default:
///
/// ```
/// use tickwire_stream::{StreamConfig, Subscription};
/// use tickwire_types::Timeframe;
///
/// let subscription = Subscription::parse("demo", "us", ["AAPL", "TSLA"]).unwrap();
/// let config = StreamConfig::new(subscription)
///     .with_timeframes(vec![Timeframe::Minute1, Timeframe::Minute5])
///     .with_store_ticks(true);
/// assert_eq!(config.ping_interval, std::time::Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// What to subscribe to.
    pub subscription: Subscription,
    /// Timeframes to aggregate candles for. Empty disables aggregation.
    pub timeframes: Vec<Timeframe>,
    /// Keep every received tick in an in-memory buffer.
    pub store_ticks: bool,
    /// Emit a log event for every received tick.
    pub log_ticks: bool,
    /// Keepalive ping cadence.
    pub ping_interval: Duration,
    /// Optional pause after each processed message. Stopping the
    /// client interrupts an in-progress pause; keepalive pings wait
    /// for it.
    pub throttle: Option<Duration>,
    /// Connection URL override, used by tests against a local server.
    pub url: Option<String>,
}

impl StreamConfig {
    /// Creates a configuration with default switches.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        Self {
            subscription,
            timeframes: Vec::new(),
            store_ticks: false,
            log_ticks: false,
            ping_interval: Duration::from_secs(30),
            throttle: None,
            url: None,
        }
    }

    /// Sets the candle timeframes to aggregate.
    #[must_use]
    pub fn with_timeframes(mut self, timeframes: Vec<Timeframe>) -> Self {
        self.timeframes = timeframes;
        self
    }

    /// Enables or disables the in-memory tick buffer.
    #[must_use]
    pub fn with_store_ticks(mut self, store_ticks: bool) -> Self {
        self.store_ticks = store_ticks;
        self
    }

    /// Enables or disables per-tick log events.
    #[must_use]
    pub fn with_log_ticks(mut self, log_ticks: bool) -> Self {
        self.log_ticks = log_ticks;
        self
    }

    /// Sets the keepalive ping cadence.
    #[must_use]
    pub fn with_ping_interval(mut self, ping_interval: Duration) -> Self {
        self.ping_interval = ping_interval;
        self
    }

    /// Sets a pause applied after each processed message.
    #[must_use]
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Overrides the connection URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The URL this configuration will connect to.
    #[must_use]
    pub fn feed_url(&self) -> String {
        self.url.clone().unwrap_or_else(|| {
            feed_url(self.subscription.endpoint(), self.subscription.api_key())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription() -> Subscription {
        Subscription::parse("demo", "crypto", ["BTC-USD"]).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = StreamConfig::new(subscription());
        assert!(config.timeframes.is_empty());
        assert!(!config.store_ticks);
        assert!(!config.log_ticks);
        assert_eq!(config.ping_interval, Duration::from_secs(30));
        assert_eq!(config.throttle, None);
        assert_eq!(
            config.feed_url(),
            "wss://ws.eodhistoricaldata.com/ws/crypto?api_token=demo"
        );
    }

    #[test]
    fn test_url_override() {
        let config = StreamConfig::new(subscription()).with_url("ws://127.0.0.1:9001");
        assert_eq!(config.feed_url(), "ws://127.0.0.1:9001");
    }
}
