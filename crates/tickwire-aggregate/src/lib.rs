//! Streaming tick-to-OHLCV aggregation for tickwire.
//!
//! This crate turns an unbounded tick stream into completed candles:
//!
//! - [`Candle`] - OHLCV candle data structure
//! - [`CandleAggregator`] - Running accumulator for one timeframe
//! - [`AggregatorSet`] - Independent accumulators for several timeframes

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tickwire/tickwire/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod candle;
mod multi;

pub use aggregator::CandleAggregator;
pub use candle::Candle;
pub use multi::AggregatorSet;
