//! Test doubles for the monitor engine: a scripted market-data source and
//! collecting/failing alert sinks.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use market::okx::{CandleApi, MarketError};
use market::types::{Candle, TokenMeta};
use notifier::{AlertSink, NotifyError};

pub const BAR_MS: u64 = 300_000;

pub fn candle(ts_ms: u64, close: f64) -> Candle {
    Candle {
        ts_ms,
        open: close,
        high: close,
        low: close,
        close,
        volume: 10.0,
        volume_usd: 100.0,
    }
}

/// `flat` candles at 1.0 followed by `step` candles at 2.0, with
/// consecutive bar timestamps.
pub fn flat_then_step(flat: usize, step: usize) -> Vec<Candle> {
    (0..flat + step)
        .map(|i| {
            let close = if i < flat { 1.0 } else { 2.0 };
            candle((i as u64 + 1) * BAR_MS, close)
        })
        .collect()
}

struct SeriesState {
    candles: Vec<Candle>,
    visible: usize,
}

/// Scripted market-data source. Each contract has a full candle series of
/// which only a prefix is "visible"; tests advance the prefix between
/// cycles to simulate new candles closing upstream.
#[derive(Clone, Default)]
pub struct SeriesApi {
    inner: Arc<Mutex<HashMap<String, SeriesState>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl SeriesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(self, address: &str, candles: Vec<Candle>, visible: usize) -> Self {
        self.inner
            .lock()
            .unwrap()
            .insert(address.to_string(), SeriesState { candles, visible });
        self
    }

    /// Every fetch for this contract fails at the transport/API layer.
    pub fn with_failure(self, address: &str) -> Self {
        self.failing.lock().unwrap().insert(address.to_string());
        self
    }

    /// Reveal `n` more candles of the contract's series.
    pub fn advance(&self, address: &str, n: usize) {
        let mut guard = self.inner.lock().unwrap();
        let state = guard.get_mut(address).expect("unknown contract in mock");
        state.visible = (state.visible + n).min(state.candles.len());
    }
}

#[async_trait]
impl CandleApi for SeriesApi {
    async fn fetch_candles(
        &self,
        address: &str,
        _bar: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketError> {
        if self.failing.lock().unwrap().contains(address) {
            return Err(MarketError::Api {
                code: "50011".to_string(),
                msg: "rate limit".to_string(),
            });
        }

        let guard = self.inner.lock().unwrap();
        let state = guard.get(address).ok_or(MarketError::EmptyResponse)?;

        let upto = &state.candles[..state.visible.min(state.candles.len())];
        Ok(upto[upto.len().saturating_sub(limit)..].to_vec())
    }

    async fn fetch_token_meta(&self, _address: &str) -> Result<TokenMeta, MarketError> {
        Ok(TokenMeta {
            symbol: "TEST".to_string(),
            name: "Test Token".to_string(),
        })
    }
}

/// Records every delivered alert.
#[derive(Clone, Default)]
pub struct CollectingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for CollectingSink {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Always fails delivery; the engine must shrug it off.
#[derive(Clone, Default)]
pub struct FailingSink;

#[async_trait]
impl AlertSink for FailingSink {
    async fn send(&self, _text: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Rejected("chat unreachable".to_string()))
    }
}
