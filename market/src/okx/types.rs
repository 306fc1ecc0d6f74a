use serde::Deserialize;

/// Standard response envelope: `code == "0"` signals success and `data`
/// carries the payload rows.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub code: String,

    #[serde(default)]
    pub msg: String,

    #[serde(default)]
    pub data: Vec<T>,
}

/// Candle rows arrive as positional string arrays:
/// `[ts, open, high, low, close, volume, volumeUsd, confirm]`.
pub type RawCandle = Vec<String>;

/// Token metadata row.
#[derive(Debug, Deserialize)]
pub struct RawTokenMeta {
    #[serde(rename = "tokenSymbol", alias = "symbol")]
    pub symbol: String,

    #[serde(rename = "tokenName", alias = "name")]
    pub name: String,
}
