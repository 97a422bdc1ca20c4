//! Core types for the tickwire streaming market data client.
//!
//! This crate provides the fundamental data structures used throughout
//! tickwire:
//!
//! - [`ApiKey`] - Validated API token for the vendor feed
//! - [`Endpoint`] - Named feed channel (us, us-quote, forex, crypto)
//! - [`Symbol`] - Validated ticker symbol
//! - [`Tick`] - A sparse decoded inbound streaming message
//! - [`Timeframe`] - OHLCV aggregation timeframe

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tickwire/tickwire/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod auth;
mod endpoint;
mod error;
mod symbol;
mod tick;
mod timeframe;

pub use auth::ApiKey;
pub use endpoint::{Endpoint, EndpointParseError};
pub use error::{Result, SubscriptionError, TickwireError};
pub use symbol::{MAX_SUBSCRIPTION_SYMBOLS, MAX_SYMBOL_LEN, Symbol};
pub use tick::Tick;
pub use timeframe::{Timeframe, TimeframeParseError};
