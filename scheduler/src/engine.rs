//! The polling monitor engine.
//!
//! Once per tick it walks the instrument universe in a fixed order:
//!   1. Seeds or advances each instrument's candle window.
//!   2. Runs the alignment detector on the refreshed window.
//!   3. Dispatches an alert for every newly-formed bullish alignment.
//!
//! Instruments are processed sequentially on one task. A failure for one
//! instrument is contained and never aborts the rest of the cycle; only
//! startup configuration errors are ever fatal to the process.

use std::collections::HashMap;

use anyhow::Context as _;
use tokio::time::{MissedTickBehavior, interval, sleep};
use tracing::{Instrument, debug, info, warn};

use common::logger::TraceId;
use common::time::now_ms;
use market::okx::CandleApi;
use market::store::CandleStore;
use market::types::TokenMeta;
use market::window::Append;
use notifier::AlertSink;
use notifier::format::format_alert;
use signal::alignment::{AlignmentDetector, Verdict};

use crate::types::MonitorConfig;

/// Page size for steady-state polls: the newest closed candle plus one
/// for overlap with the window head.
const LATEST_PAGE: usize = 2;

pub struct MonitorEngine<C, S> {
    cfg: MonitorConfig,
    universe: Vec<String>,
    client: C,
    sink: S,

    /// Candle windows and alignment histories, keyed by contract address.
    /// This engine is their only writer for the process lifetime.
    store: CandleStore,
    detectors: HashMap<String, AlignmentDetector>,

    /// Symbol/name cache; `None` marks a lookup that already failed its
    /// bounded retries.
    meta: HashMap<String, Option<TokenMeta>>,
}

impl<C: CandleApi, S: AlertSink> MonitorEngine<C, S> {
    pub fn new(cfg: MonitorConfig, universe: Vec<String>, client: C, sink: S) -> Self {
        let store = CandleStore::new(cfg.window_size);

        Self {
            cfg,
            universe,
            client,
            sink,
            store,
            detectors: HashMap::new(),
            meta: HashMap::new(),
        }
    }

    /// Fixed-cadence polling loop. Runs until the task is dropped.
    pub async fn run(mut self) {
        let mut ticker = interval(self.cfg.poll_interval);
        // A slow cycle must not stack a second one behind it.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            instruments = self.universe.len(),
            bar = %self.cfg.bar,
            every_ms = self.cfg.poll_interval.as_millis() as u64,
            "monitor engine started"
        );

        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// One sequential pass over the whole universe.
    pub async fn run_cycle(&mut self) {
        let trace_id = TraceId::default();
        let span = tracing::info_span!("cycle", trace_id = %trace_id.as_str());

        let universe = self.universe.clone();
        async {
            for (idx, address) in universe.iter().enumerate() {
                if idx > 0 {
                    sleep(self.cfg.request_delay).await;
                }

                if let Err(e) = self.process_instrument(address).await {
                    warn!(instrument = %address, error = ?e, "instrument skipped this cycle");
                }
            }
        }
        .instrument(span)
        .await;
    }

    /// Candle-cache update, then detection, then (possibly) notification.
    async fn process_instrument(&mut self, address: &str) -> anyhow::Result<()> {
        if !self.store.is_ready(address) {
            let history = self
                .client
                .fetch_candles(address, &self.cfg.bar, self.cfg.window_size)
                .await
                .context("bulk candle fetch")?;

            if !self.store.initialize(address, history) {
                debug!(instrument = %address, "insufficient history, retrying next cycle");
                return Ok(());
            }

            info!(
                instrument = %address,
                window = self.cfg.window_size,
                "candle window seeded"
            );
        } else {
            let latest = self
                .client
                .fetch_candles(address, &self.cfg.bar, LATEST_PAGE)
                .await
                .context("latest candle fetch")?;

            match latest.into_iter().last() {
                Some(candle) => {
                    if self.store.append_latest(address, candle) == Some(Append::Stale) {
                        debug!(instrument = %address, "no new candle this cycle");
                    }
                }
                None => {
                    debug!(instrument = %address, "empty candle page");
                    return Ok(());
                }
            }
        }

        self.detect_and_alert(address).await;
        Ok(())
    }

    async fn detect_and_alert(&mut self, address: &str) {
        let Some(candles) = self.store.snapshot(address) else {
            return;
        };

        let verdict = self
            .detectors
            .entry(address.to_string())
            .or_default()
            .evaluate(address, &candles, now_ms());

        match verdict {
            Verdict::NotReady => {
                debug!(instrument = %address, "EMAs not ready");
            }
            Verdict::Steady { aligned } => {
                debug!(instrument = %address, aligned, "no transition");
            }
            Verdict::Crossed(signal) => {
                info!(
                    instrument = %address,
                    price = signal.price,
                    ema_short = signal.ema_short,
                    ema_medium = signal.ema_medium,
                    ema_long = signal.ema_long,
                    candle_ts = signal.candle_ts_ms,
                    "bullish alignment formed"
                );

                let meta = self.token_meta(address).await;
                let text = format_alert(&signal, meta.as_ref());

                if let Err(e) = self.sink.send(&text).await {
                    warn!(instrument = %address, error = ?e, "alert delivery failed");
                }
            }
        }
    }

    /// Cached symbol/name lookup with a bounded retry; a lookup that
    /// keeps failing is cached as absent so alerts fall back to the
    /// contract address.
    async fn token_meta(&mut self, address: &str) -> Option<TokenMeta> {
        if let Some(cached) = self.meta.get(address) {
            return cached.clone();
        }

        let mut last_err = None;
        for attempt in 0..self.cfg.meta_retries.max(1) {
            match self.client.fetch_token_meta(address).await {
                Ok(meta) => {
                    self.meta.insert(address.to_string(), Some(meta.clone()));
                    return Some(meta);
                }
                Err(e) => {
                    debug!(instrument = %address, attempt, error = ?e, "token metadata fetch failed");
                    last_err = Some(e);
                }
            }
        }

        if let Some(e) = last_err {
            warn!(instrument = %address, error = ?e, "token metadata unavailable");
        }
        self.meta.insert(address.to_string(), None);
        None
    }

    /// Read-only view of the candle store, for tests and diagnostics.
    pub fn store(&self) -> &CandleStore {
        &self.store
    }
}
