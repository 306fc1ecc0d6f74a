/// One closed OHLCV bucket for a token contract.
///
/// Within a single contract's series timestamps are unique and strictly
/// increasing once the client has normalized the API's newest-first order.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Bucket open time, ms since epoch.
    pub ts_ms: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Base-token volume.
    pub volume: f64,
    /// Volume in USD terms.
    pub volume_usd: f64,
}

/// Symbol/name pair used when formatting alerts.
///
/// Purely cosmetic: a contract with no metadata is still monitored and
/// alerts fall back to its address.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMeta {
    pub symbol: String,
    pub name: String,
}
