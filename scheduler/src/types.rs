use std::time::Duration;

/// Tunables for the polling monitor.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// One pass over the whole instrument universe per tick.
    pub poll_interval: Duration,

    /// Enforced pause between per-instrument fetches.
    ///
    /// Respects upstream rate limits and keeps the cycle strictly
    /// sequential; the candle store never sees two writers.
    pub request_delay: Duration,

    /// Candles held per instrument. Must cover the longest EMA period or
    /// every instrument stays not-ready forever.
    pub window_size: usize,

    /// Candle granularity passed to the market API (e.g. "5m").
    pub bar: String,

    /// Attempts for the symbol/name lookup before an alert falls back to
    /// the contract address.
    pub meta_retries: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(300),
            request_delay: Duration::from_millis(1_000),
            window_size: 144,
            bar: "5m".to_string(),
            meta_retries: 2,
        }
    }
}
