//! Keyed store of per-contract candle windows.
//!
//! The monitor engine owns one `CandleStore` for the lifetime of the
//! process and is its only writer: instruments are processed on a single
//! flow of control, so no interior locking is needed. All mutation is
//! funneled through `initialize` / `append_latest`.

use std::collections::HashMap;

use crate::types::Candle;
use crate::window::{Append, CandleWindow};

pub struct CandleStore {
    windows: HashMap<String, CandleWindow>,
    capacity: usize,
}

impl CandleStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            windows: HashMap::new(),
            capacity,
        }
    }

    /// Seed a contract from a bulk fetch of ascending candles.
    ///
    /// Returns `false` (not ready) when the history is too short; the
    /// contract stays absent and is retried on a later cycle.
    pub fn initialize(&mut self, address: &str, candles: Vec<Candle>) -> bool {
        match CandleWindow::from_history(self.capacity, candles) {
            Some(window) => {
                self.windows.insert(address.to_string(), window);
                true
            }
            None => false,
        }
    }

    /// Offer the newest candle for a contract. `None` when the contract
    /// was never initialized.
    pub fn append_latest(&mut self, address: &str, candle: Candle) -> Option<Append> {
        self.windows
            .get_mut(address)
            .map(|w| w.append_latest(candle))
    }

    pub fn is_ready(&self, address: &str) -> bool {
        self.windows.contains_key(address)
    }

    /// Ascending candles for a contract, if initialized.
    pub fn snapshot(&self, address: &str) -> Option<Vec<Candle>> {
        self.windows.get(address).map(|w| w.snapshot())
    }

    pub fn window(&self, address: &str) -> Option<&CandleWindow> {
        self.windows.get(address)
    }
}
