//! Independent accumulators for several timeframes.

use tickwire_types::{Tick, Timeframe};

use crate::{Candle, CandleAggregator};

/// A set of independent per-timeframe candle aggregators.
///
/// Each tick is folded into every enabled timeframe; rollovers are
/// independent, so one tick can complete several candles at once (e.g.
/// on the hour, when the 1m, 5m, and 1h buckets all close).
#[derive(Debug, Default)]
pub struct AggregatorSet {
    aggregators: Vec<CandleAggregator>,
}

impl AggregatorSet {
    /// Creates aggregators for the given timeframes, ignoring duplicates.
    #[must_use]
    pub fn new(timeframes: impl IntoIterator<Item = Timeframe>) -> Self {
        let mut aggregators: Vec<CandleAggregator> = Vec::new();
        for timeframe in timeframes {
            if !aggregators.iter().any(|a| a.timeframe() == timeframe) {
                aggregators.push(CandleAggregator::new(timeframe));
            }
        }
        Self { aggregators }
    }

    /// Returns the enabled timeframes in configuration order.
    #[must_use]
    pub fn timeframes(&self) -> Vec<Timeframe> {
        self.aggregators.iter().map(CandleAggregator::timeframe).collect()
    }

    /// Returns true if no timeframes are enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aggregators.is_empty()
    }

    /// Folds a tick into every timeframe, returning completed candles.
    pub fn process(&mut self, tick: &Tick) -> Vec<(Timeframe, Candle)> {
        self.aggregators
            .iter_mut()
            .filter_map(|agg| agg.process(tick).map(|candle| (agg.timeframe(), candle)))
            .collect()
    }

    /// Flushes all in-progress candles.
    #[must_use]
    pub fn finish(self) -> Vec<(Timeframe, Candle)> {
        self.aggregators
            .into_iter()
            .filter_map(|agg| {
                let timeframe = agg.timeframe();
                agg.finish().map(|candle| (timeframe, candle))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(timestamp_ms: i64, price: f64) -> Tick {
        Tick::trade("EURUSD", timestamp_ms, price, Some(1.0))
    }

    #[test]
    fn test_duplicates_ignored() {
        let set = AggregatorSet::new([
            Timeframe::Minute1,
            Timeframe::Minute1,
            Timeframe::Hour1,
        ]);
        assert_eq!(set.timeframes(), vec![Timeframe::Minute1, Timeframe::Hour1]);
    }

    #[test]
    fn test_empty_set_is_inert() {
        let mut set = AggregatorSet::new([]);
        assert!(set.is_empty());
        assert!(set.process(&trade(0, 100.0)).is_empty());
        assert!(set.finish().is_empty());
    }

    #[test]
    fn test_independent_rollovers() {
        let mut set = AggregatorSet::new([Timeframe::Minute1, Timeframe::Minute5]);

        set.process(&trade(0, 100.0));
        // 90s in: only the 1m bucket has rolled over.
        let completed = set.process(&trade(90_000, 101.0));
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].0, Timeframe::Minute1);

        // 5m in: both roll over at once.
        let completed = set.process(&trade(300_000, 102.0));
        let timeframes: Vec<Timeframe> = completed.iter().map(|(tf, _)| *tf).collect();
        assert_eq!(timeframes, vec![Timeframe::Minute1, Timeframe::Minute5]);

        // The 5m candle spans both earlier trades.
        let five_min = &completed[1].1;
        assert!((five_min.open - 100.0).abs() < 1e-10);
        assert!((five_min.close - 101.0).abs() < 1e-10);
        assert!((five_min.volume - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_finish_flushes_every_timeframe() {
        let mut set = AggregatorSet::new([Timeframe::Minute1, Timeframe::Hour1]);
        set.process(&trade(0, 100.0));

        let flushed = set.finish();
        assert_eq!(flushed.len(), 2);
        assert!(flushed.iter().all(|(_, c)| (c.close - 100.0).abs() < 1e-10));
    }
}
