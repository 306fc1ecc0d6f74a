//! Bullish-alignment detection.
//!
//! An instrument is "aligned" when EMA21 > EMA55 > EMA144 at its most
//! recent closed candle, strict inequalities throughout. The detector
//! keeps a short per-instrument history of observations and fires a
//! [`Signal`] only on the cycle where a known not-aligned state flips to
//! aligned — never retroactively for instruments that were already
//! aligned when first observed.

use std::collections::VecDeque;

use market::types::Candle;

use crate::ema::latest_ema;
use crate::types::Signal;

/// EMA periods: short / medium / long.
pub const EMA_SHORT: usize = 21;
pub const EMA_MEDIUM: usize = 55;
pub const EMA_LONG: usize = 144;

/// Observations retained per instrument. Only the immediately-previous
/// one is consulted; the cap bounds memory.
const HISTORY_CAP: usize = 10;

/// One recorded observation: the candle it was computed on and whether
/// the EMAs were bullishly aligned there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Observation {
    ts_ms: u64,
    aligned: bool,
}

/// Outcome of one detector evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Window too short for the longest EMA; nothing recorded.
    NotReady,

    /// Alignment computed, no transition fired.
    Steady { aligned: bool },

    /// Bullish alignment newly formed on this candle.
    Crossed(Signal),
}

/// Per-instrument alignment state machine.
#[derive(Debug, Default)]
pub struct AlignmentDetector {
    history: VecDeque<Observation>,
}

impl AlignmentDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the newest candle of an ascending window.
    ///
    /// Re-evaluating the candle already at the head of the history (a
    /// stale poll) can never fire a second signal.
    pub fn evaluate(&mut self, address: &str, candles: &[Candle], detected_at_ms: u64) -> Verdict {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let (Some(short), Some(medium), Some(long)) = (
            latest_ema(&closes, EMA_SHORT),
            latest_ema(&closes, EMA_MEDIUM),
            latest_ema(&closes, EMA_LONG),
        ) else {
            return Verdict::NotReady;
        };

        // latest_ema returned Some, so the window is non-empty.
        let newest = candles.last().expect("non-empty window");
        let aligned = short > medium && medium > long;

        let previous = match self.history.back().copied() {
            Some(last) if last.ts_ms == newest.ts_ms => {
                self.record(newest.ts_ms, aligned);
                return Verdict::Steady { aligned };
            }
            Some(last) => Some(last.aligned),
            None => None,
        };

        self.record(newest.ts_ms, aligned);

        if previous == Some(false) && aligned {
            Verdict::Crossed(Signal {
                address: address.to_string(),
                price: newest.close,
                ema_short: short,
                ema_medium: medium,
                ema_long: long,
                candle_ts_ms: newest.ts_ms,
                detected_at_ms,
            })
        } else {
            Verdict::Steady { aligned }
        }
    }

    /// Most recent recorded observation, if any.
    pub fn last_alignment(&self) -> Option<bool> {
        self.history.back().map(|o| o.aligned)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn record(&mut self, ts_ms: u64, aligned: bool) {
        match self.history.back_mut() {
            Some(last) if last.ts_ms == ts_ms => last.aligned = aligned,
            _ => self.history.push_back(Observation { ts_ms, aligned }),
        }

        while self.history.len() > HISTORY_CAP {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR_MS: u64 = 300_000;

    fn candles_from(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                ts_ms: (i as u64 + 1) * BAR_MS,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
                volume_usd: 1.0,
            })
            .collect()
    }

    /// Flat window of ones: every EMA equals 1.0 exactly, so the strict
    /// ordering does not hold.
    fn flat_series() -> Vec<f64> {
        vec![1.0; EMA_LONG]
    }

    /// The last `EMA_LONG` candles of a series, as the cache would hold.
    fn window(series: &[Candle]) -> &[Candle] {
        &series[series.len() - EMA_LONG..]
    }

    #[test]
    fn short_window_is_not_ready_and_records_nothing() {
        let mut detector = AlignmentDetector::new();
        let candles = candles_from(&vec![1.0; EMA_LONG - 1]);

        assert_eq!(detector.evaluate("mintA", &candles, 1), Verdict::NotReady);
        assert_eq!(detector.last_alignment(), None);
        assert_eq!(detector.history_len(), 0);
    }

    #[test]
    fn equal_emas_are_not_aligned() {
        let mut detector = AlignmentDetector::new();
        let candles = candles_from(&flat_series());

        assert_eq!(
            detector.evaluate("mintA", &candles, 1),
            Verdict::Steady { aligned: false }
        );
        assert_eq!(detector.last_alignment(), Some(false));
    }

    #[test]
    fn transition_fires_exactly_once_on_the_crossing_candle() {
        let mut detector = AlignmentDetector::new();

        let mut series_closes = flat_series();
        series_closes.extend([2.0, 2.0, 2.0]);
        let series = candles_from(&series_closes);

        // Cycle 1: all-flat window, alignment known false.
        let verdict = detector.evaluate("mintA", &series[..EMA_LONG], 1);
        assert_eq!(verdict, Verdict::Steady { aligned: false });

        // Cycle 2: first stepped candle enters the window.
        let verdict = detector.evaluate("mintA", window(&series[..EMA_LONG + 1]), 2);
        let Verdict::Crossed(signal) = verdict else {
            panic!("expected a signal, got {verdict:?}");
        };
        assert_eq!(signal.address, "mintA");
        assert_eq!(signal.price, 2.0);
        assert_eq!(signal.candle_ts_ms, (EMA_LONG as u64 + 1) * BAR_MS);
        assert_eq!(signal.detected_at_ms, 2);
        assert!(signal.ema_short > signal.ema_medium);
        assert!(signal.ema_medium > signal.ema_long);

        // Cycles 3 and 4: still aligned, no further signals.
        for (cycle, end) in [(3u64, EMA_LONG + 2), (4, EMA_LONG + 3)] {
            let verdict = detector.evaluate("mintA", window(&series[..end]), cycle);
            assert_eq!(verdict, Verdict::Steady { aligned: true });
        }
    }

    #[test]
    fn already_aligned_first_observation_never_fires() {
        let mut detector = AlignmentDetector::new();

        // 100 flat candles then 44 stepped ones: aligned from the start.
        let mut closes = vec![1.0; 100];
        closes.extend(vec![2.0; 44]);
        let candles = candles_from(&closes);

        assert_eq!(
            detector.evaluate("mintA", &candles, 1),
            Verdict::Steady { aligned: true }
        );

        // A later candle keeps the alignment; still no signal.
        let mut longer = closes.clone();
        longer.push(2.0);
        let series = candles_from(&longer);
        assert_eq!(
            detector.evaluate("mintA", window(&series), 2),
            Verdict::Steady { aligned: true }
        );
    }

    #[test]
    fn stale_reevaluation_of_the_same_candle_cannot_double_fire() {
        let mut detector = AlignmentDetector::new();

        let mut closes = flat_series();
        closes.push(2.0);
        let series = candles_from(&closes);

        detector.evaluate("mintA", &series[..EMA_LONG], 1);
        let first = detector.evaluate("mintA", window(&series), 2);
        assert!(matches!(first, Verdict::Crossed(_)));

        // Same newest candle polled again before a new one closes.
        let again = detector.evaluate("mintA", window(&series), 3);
        assert_eq!(again, Verdict::Steady { aligned: true });
        assert_eq!(detector.history_len(), 2);
    }

    #[test]
    fn losing_alignment_and_regaining_it_fires_again() {
        let mut detector = AlignmentDetector::new();

        let mut closes = flat_series();
        closes.push(2.0); // aligned
        closes.push(0.1); // crash: short EMA collapses below the others
        closes.push(5.0); // aligned again
        let series = candles_from(&closes);

        detector.evaluate("mintA", &series[..EMA_LONG], 1);

        let up = detector.evaluate("mintA", window(&series[..EMA_LONG + 1]), 2);
        assert!(matches!(up, Verdict::Crossed(_)));

        let down = detector.evaluate("mintA", window(&series[..EMA_LONG + 2]), 3);
        assert_eq!(down, Verdict::Steady { aligned: false });

        let up_again = detector.evaluate("mintA", window(&series[..EMA_LONG + 3]), 4);
        assert!(matches!(up_again, Verdict::Crossed(_)));
    }

    #[test]
    fn history_is_pruned_to_its_cap() {
        let mut detector = AlignmentDetector::new();

        let mut closes = flat_series();
        for _ in 0..25 {
            closes.push(1.0);
        }
        let series = candles_from(&closes);

        for end in EMA_LONG..=closes.len() {
            detector.evaluate("mintA", window(&series[..end]), end as u64);
        }

        assert_eq!(detector.history_len(), 10);
    }
}
