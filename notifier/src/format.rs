use chrono::{TimeZone, Utc};

use market::types::TokenMeta;
use signal::Signal;

/// Render a bullish-alignment signal as a Telegram HTML message.
///
/// Metadata is cosmetic: without it the header falls back to a shortened
/// contract address.
pub fn format_alert(signal: &Signal, meta: Option<&TokenMeta>) -> String {
    let label = match meta {
        Some(m) => format!("{} ({})", m.name, m.symbol),
        None => short_address(&signal.address),
    };

    let candle_time = Utc
        .timestamp_millis_opt(signal.candle_ts_ms as i64)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| signal.candle_ts_ms.to_string());

    format!(
        "\u{1F4C8} <b>Bullish EMA alignment</b>\n\
         <b>{label}</b>\n\
         <code>{address}</code>\n\
         \n\
         Price: {price}\n\
         EMA21: {short}\n\
         EMA55: {medium}\n\
         EMA144: {long}\n\
         Candle: {candle_time}\n\
         \n\
         <a href=\"https://dexscreener.com/search?q={address}\">Chart</a>",
        address = signal.address,
        price = trim_price(signal.price),
        short = trim_price(signal.ema_short),
        medium = trim_price(signal.ema_medium),
        long = trim_price(signal.ema_long),
    )
}

/// `Abcd…wxyz` form for addresses with no known symbol.
fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}\u{2026}{}", &address[..4], &address[address.len() - 4..])
}

/// Fixed-precision price with trailing zeros removed; micro-cap tokens
/// need the full eight decimals, majors do not.
fn trim_price(value: f64) -> String {
    let raw = format!("{value:.8}");
    let trimmed = raw.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
