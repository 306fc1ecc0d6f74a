/// Emitted exactly once per bullish-alignment transition.
///
/// Immutable once created; consumed by the notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Token contract address the signal fired for.
    pub address: String,

    /// Close of the candle that completed the alignment.
    pub price: f64,

    pub ema_short: f64,
    pub ema_medium: f64,
    pub ema_long: f64,

    /// Timestamp of that candle, ms since epoch.
    pub candle_ts_ms: u64,

    /// Wall-clock detection time, ms since epoch.
    pub detected_at_ms: u64,
}
