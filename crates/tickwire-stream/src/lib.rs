//! WebSocket streaming client for the tickwire market data feed.
//!
//! This crate provides the live data pipeline:
//!
//! - [`Subscription`] - Validated subscribe request (key, endpoint, symbols)
//! - [`url::feed_url`] - Constructs the feed connection URL
//! - [`decode_frame`] - Defensive decoding of inbound frames
//! - [`StreamConfig`] - Client configuration and switches
//! - [`StreamClient`] - The connection manager and its event channel

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tickwire/tickwire/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod decode;
mod error;
mod subscription;
pub mod url;

pub use client::{StreamClient, StreamEvent};
pub use config::StreamConfig;
pub use decode::{Frame, StatusMessage, decode_frame};
pub use error::StreamError;
pub use subscription::Subscription;
