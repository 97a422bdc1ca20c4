//! Running candle accumulator for a single timeframe.

use chrono::{DateTime, Utc};
use tickwire_types::{Tick, Timeframe};

use crate::Candle;

/// Streaming candle aggregator for one timeframe.
///
/// Folds ticks into a single open candle and emits it when a tick's
/// floored timestamp advances past the current bucket. There is no
/// lookahead: emission happens synchronously on the triggering tick, so
/// a completed candle lags the bucket boundary by exactly one tick.
///
/// Lifecycle per bucket: Empty -> Forming -> (rollover) Emit -> Empty.
/// At most one candle is open at any time.
#[derive(Debug)]
pub struct CandleAggregator {
    timeframe: Timeframe,
    /// Last symbol seen on the stream; ticks without a price still
    /// update this bookkeeping field.
    symbol: Option<String>,
    /// Floored start of the bucket the accumulator currently tracks.
    bucket_start_ms: Option<i64>,
    bar: Option<Bar>,
}

impl CandleAggregator {
    /// Creates an empty aggregator for the given timeframe.
    #[must_use]
    pub const fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            symbol: None,
            bucket_start_ms: None,
            bar: None,
        }
    }

    /// Returns the timeframe being aggregated to.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Returns true if a candle is currently forming.
    #[must_use]
    pub const fn is_forming(&self) -> bool {
        self.bar.is_some()
    }

    /// Processes a tick, emitting a completed candle on bucket rollover.
    ///
    /// A tick without a timestamp cannot be bucketed and only updates
    /// the tracked symbol. A tick with a timestamp but no price moves
    /// the bucket bookkeeping (and can therefore trigger emission of an
    /// open candle) without opening or updating OHLC values. Ticks
    /// without a quantity contribute zero volume.
    pub fn process(&mut self, tick: &Tick) -> Option<Candle> {
        if let Some(symbol) = &tick.symbol {
            self.symbol = Some(symbol.clone());
        }

        let timestamp_ms = tick.timestamp_ms?;
        let bucket = bucket_start_ms(timestamp_ms, self.timeframe);

        let mut completed = None;
        if self.bucket_start_ms != Some(bucket) {
            if let Some(bar) = self.bar.take() {
                completed = Some(self.close_bar(bar));
            }
            self.bucket_start_ms = Some(bucket);
        }

        if let Some(price) = tick.price {
            let quantity = tick.quantity.unwrap_or(0.0);
            match &mut self.bar {
                Some(bar) => bar.update(price, quantity),
                None => self.bar = Some(Bar::open(bucket, price, quantity)),
            }
        }

        completed
    }

    /// Finishes aggregation, returning the in-progress candle if any.
    ///
    /// Call this on shutdown to flush the final partial bucket, which is
    /// otherwise never emitted.
    #[must_use]
    pub fn finish(mut self) -> Option<Candle> {
        self.bar.take().map(|bar| self.close_bar(bar))
    }

    fn close_bar(&self, bar: Bar) -> Candle {
        Candle {
            open_time: ms_to_datetime(bar.start_ms),
            symbol: self.symbol.clone().unwrap_or_default(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            tick_count: bar.tick_count,
        }
    }
}

/// An open candle under construction.
#[derive(Debug)]
struct Bar {
    start_ms: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    tick_count: u32,
}

impl Bar {
    /// Opens a bar from the first price-bearing tick of a bucket.
    const fn open(start_ms: i64, price: f64, quantity: f64) -> Self {
        Self {
            start_ms,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: quantity,
            tick_count: 1,
        }
    }

    /// Folds another price-bearing tick into the bar.
    fn update(&mut self, price: f64, quantity: f64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.volume += quantity;
        self.tick_count += 1;
    }
}

/// Floors a millisecond timestamp to the start of its bucket.
///
/// `bucket = floor(t / 1000 / W) * W * 1000`, using euclidean division
/// so pre-epoch timestamps floor toward negative infinity.
fn bucket_start_ms(timestamp_ms: i64, timeframe: Timeframe) -> i64 {
    let width = timeframe.seconds() as i64;
    timestamp_ms.div_euclid(1000).div_euclid(width) * width * 1000
}

fn ms_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(timestamp_ms: i64, price: f64, quantity: f64) -> Tick {
        Tick::trade("BTC-USD", timestamp_ms, price, Some(quantity))
    }

    #[test]
    fn test_bucket_flooring() {
        assert_eq!(bucket_start_ms(0, Timeframe::Minute1), 0);
        assert_eq!(bucket_start_ms(59_999, Timeframe::Minute1), 0);
        assert_eq!(bucket_start_ms(60_000, Timeframe::Minute1), 60_000);
        assert_eq!(bucket_start_ms(299_999, Timeframe::Minute5), 0);
        assert_eq!(bucket_start_ms(3_600_001, Timeframe::Hour1), 3_600_000);
        // Pre-epoch timestamps floor toward negative infinity.
        assert_eq!(bucket_start_ms(-1, Timeframe::Minute1), -60_000);
    }

    #[test]
    fn test_rollover_scenario() {
        // Spec'd behavior: prices 100,105,95,102 inside the first minute
        // form one candle; the tick at 60000 emits it and opens the next.
        let mut agg = CandleAggregator::new(Timeframe::Minute1);

        assert!(agg.process(&trade(0, 100.0, 1.0)).is_none());
        assert!(agg.process(&trade(15_000, 105.0, 2.0)).is_none());
        assert!(agg.process(&trade(30_000, 95.0, 1.5)).is_none());
        assert!(agg.process(&trade(59_999, 102.0, 0.5)).is_none());

        let candle = agg.process(&trade(60_000, 110.0, 1.0)).unwrap();
        assert_eq!(candle.open_time, DateTime::UNIX_EPOCH);
        assert_eq!(candle.symbol, "BTC-USD");
        assert!((candle.open - 100.0).abs() < 1e-10);
        assert!((candle.high - 105.0).abs() < 1e-10);
        assert!((candle.low - 95.0).abs() < 1e-10);
        assert!((candle.close - 102.0).abs() < 1e-10);
        assert!((candle.volume - 5.0).abs() < 1e-10);
        assert_eq!(candle.tick_count, 4);

        // The triggering tick opened the new bucket.
        assert!(agg.is_forming());
        let next = agg.finish().unwrap();
        assert!((next.open - 110.0).abs() < 1e-10);
        assert!((next.high - 110.0).abs() < 1e-10);
        assert!((next.low - 110.0).abs() < 1e-10);
        assert!((next.close - 110.0).abs() < 1e-10);
    }

    fn assert_ohlc_consistent(candle: &Candle) {
        assert!(candle.high >= candle.open.max(candle.close));
        assert!(candle.low <= candle.open.min(candle.close));
        assert!(candle.high >= candle.low);
    }

    #[test]
    fn test_ohlc_consistency_invariant() {
        // Spread the sequence across several 1-minute buckets so the
        // invariant is checked on every emitted candle, after every
        // update, not just on the final flush.
        let prices = [100.0, 97.5, 103.2, 101.0, 96.4, 104.9, 100.1, 99.0, 102.3];
        let mut agg = CandleAggregator::new(Timeframe::Minute1);

        let mut emitted = 0;
        for (i, price) in prices.iter().enumerate() {
            if let Some(candle) = agg.process(&trade(i as i64 * 20_000, *price, 1.0)) {
                assert_ohlc_consistent(&candle);
                emitted += 1;
            }
        }
        assert_eq!(emitted, 2);

        assert_ohlc_consistent(&agg.finish().unwrap());
    }

    #[test]
    fn test_determinism() {
        let ticks: Vec<Tick> = (0..500)
            .map(|i| trade(i * 700, 100.0 + (i % 7) as f64, 0.1))
            .collect();

        let run = || {
            let mut agg = CandleAggregator::new(Timeframe::Minute1);
            let mut candles: Vec<Candle> =
                ticks.iter().filter_map(|t| agg.process(t)).collect();
            candles.extend(agg.finish());
            candles
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_duplicate_tick_updates_in_place() {
        let mut agg = CandleAggregator::new(Timeframe::Minute1);
        agg.process(&trade(1000, 100.0, 1.0));
        agg.process(&trade(1000, 100.0, 1.0));

        let candle = agg.finish().unwrap();
        assert_eq!(candle.tick_count, 2);
        assert!((candle.volume - 2.0).abs() < 1e-10);
        assert!((candle.high - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_symbol_only_tick_does_not_touch_ohlcv() {
        let mut agg = CandleAggregator::new(Timeframe::Minute1);
        agg.process(&trade(0, 100.0, 1.0));
        assert!(agg.process(&Tick::symbol_only("BTC-USD", 30_000)).is_none());

        let candle = agg.finish().unwrap();
        assert!((candle.close - 100.0).abs() < 1e-10);
        assert!((candle.volume - 1.0).abs() < 1e-10);
        assert_eq!(candle.tick_count, 1);
    }

    #[test]
    fn test_symbol_only_tick_can_trigger_rollover() {
        let mut agg = CandleAggregator::new(Timeframe::Minute1);
        agg.process(&trade(0, 100.0, 1.0));

        // Bucket advances on a timestamped tick even without a price.
        let candle = agg
            .process(&Tick::symbol_only("BTC-USD", 60_000))
            .unwrap();
        assert!((candle.close - 100.0).abs() < 1e-10);

        // Nothing is forming in the new bucket yet.
        assert!(!agg.is_forming());
        assert!(agg.finish().is_none());
    }

    #[test]
    fn test_missing_quantity_contributes_zero_volume() {
        let mut agg = CandleAggregator::new(Timeframe::Minute1);
        agg.process(&Tick::trade("AAPL", 0, 100.0, None));
        agg.process(&Tick::trade("AAPL", 1000, 101.0, Some(5.0)));
        agg.process(&Tick::trade("AAPL", 2000, 102.0, None));

        let candle = agg.finish().unwrap();
        assert!((candle.volume - 5.0).abs() < 1e-10);
        assert_eq!(candle.tick_count, 3);
    }

    #[test]
    fn test_tick_without_timestamp_is_ignored() {
        let mut agg = CandleAggregator::new(Timeframe::Minute1);
        let tick = Tick {
            symbol: Some("AAPL".to_string()),
            price: Some(100.0),
            ..Tick::default()
        };
        assert!(agg.process(&tick).is_none());
        assert!(!agg.is_forming());
    }

    #[test]
    fn test_finish_empty_returns_none() {
        let agg = CandleAggregator::new(Timeframe::Hour1);
        assert!(agg.finish().is_none());
    }

    #[test]
    fn test_gap_spanning_multiple_buckets_emits_once() {
        // A quiet market can skip buckets entirely; only the candle that
        // was actually forming is emitted.
        let mut agg = CandleAggregator::new(Timeframe::Minute1);
        agg.process(&trade(0, 100.0, 1.0));
        let candle = agg.process(&trade(10 * 60_000, 105.0, 1.0)).unwrap();
        assert_eq!(candle.open_time, DateTime::UNIX_EPOCH);
        assert!((candle.close - 100.0).abs() < 1e-10);
    }
}
