//! Rust client for streaming live market data and aggregating ticks
//! into OHLCV candles.
//!
//! This is a facade crate that re-exports functionality from the
//! tickwire workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tickwire::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subscription = Subscription::parse("demo", "us", ["AAPL", "TSLA"])?;
//!     let config = StreamConfig::new(subscription)
//!         .with_timeframes(vec![Timeframe::Minute1, Timeframe::Minute5]);
//!
//!     let (client, mut events) = StreamClient::connect(config).await?;
//!     while let Some(event) = events.recv().await {
//!         match event {
//!             StreamEvent::Candle { timeframe, candle } => {
//!                 println!("{} candle: {candle}", timeframe.as_str());
//!             }
//!             StreamEvent::Tick(_) | StreamEvent::Status { .. } => {}
//!         }
//!     }
//!
//!     client.stop().await;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tickwire/tickwire/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickwire_types::*;

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use tickwire_aggregate::{AggregatorSet, Candle, CandleAggregator};

// Re-export streaming
#[cfg(feature = "stream")]
pub use tickwire_stream::{
    Frame, StatusMessage, StreamClient, StreamConfig, StreamError, StreamEvent, Subscription,
    decode_frame,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickwire::prelude::*;
/// ```
pub mod prelude {
    pub use tickwire_types::{
        ApiKey, Endpoint, Result, SubscriptionError, Symbol, Tick, TickwireError, Timeframe,
    };

    #[cfg(feature = "aggregate")]
    pub use tickwire_aggregate::{AggregatorSet, Candle, CandleAggregator};

    #[cfg(feature = "stream")]
    pub use tickwire_stream::{
        StreamClient, StreamConfig, StreamError, StreamEvent, Subscription,
    };
}
