use std::collections::VecDeque;

use crate::types::Candle;

/// Outcome of offering the newest candle to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Append {
    /// Strictly newer candle accepted; the single oldest was evicted.
    Accepted,
    /// Timestamp not newer than the current head; nothing changed.
    /// Duplicate/stale polls are expected and harmless.
    Stale,
}

/// Fixed-capacity, chronologically ascending window of closed candles.
///
/// Once built the window holds exactly `capacity` candles and never
/// shrinks below it.
#[derive(Debug)]
pub struct CandleWindow {
    candles: VecDeque<Candle>,
    capacity: usize,
}

impl CandleWindow {
    /// Build from an ascending bulk fetch. Keeps only the newest
    /// `capacity` candles; returns `None` (not ready) when fewer are
    /// supplied.
    pub fn from_history(capacity: usize, candles: Vec<Candle>) -> Option<Self> {
        if capacity == 0 || candles.len() < capacity {
            return None;
        }

        let skip = candles.len() - capacity;
        Some(Self {
            candles: candles.into_iter().skip(skip).collect(),
            capacity,
        })
    }

    /// Offer the newest candle from a poll.
    pub fn append_latest(&mut self, candle: Candle) -> Append {
        let newest = self.candles.back().map(|c| c.ts_ms).unwrap_or(0);
        if candle.ts_ms <= newest {
            return Append::Stale;
        }

        self.candles.pop_front();
        self.candles.push_back(candle);
        Append::Accepted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Newest candle in the window.
    pub fn newest(&self) -> &Candle {
        // from_history guarantees at least one candle
        self.candles.back().expect("window is never empty")
    }

    /// Closing prices, ascending.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Full ascending copy of the window.
    pub fn snapshot(&self) -> Vec<Candle> {
        self.candles.iter().cloned().collect()
    }
}
