//! Exponential moving averages over closing prices.
//!
//! Insufficient data is a defined "not ready" output, never an error:
//! downstream detection simply skips the cycle and retries once enough
//! candles have accumulated.

/// EMA series aligned to the input.
///
/// Indices `0..period-1` are `None`, index `period-1` seeds with the
/// simple average of the first `period` values, and each later index
/// follows `ema[i] = close[i] * k + ema[i-1] * (1 - k)` with
/// `k = 2 / (period + 1)`. Output depends only on the inputs.
pub fn compute_ema(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || closes.len() < period {
        return vec![None; closes.len()];
    }

    let mut out = vec![None; closes.len()];

    let seed = closes[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(seed);

    let k = 2.0 / (period as f64 + 1.0);
    let mut prev = seed;
    for i in period..closes.len() {
        let next = closes[i] * k + prev * (1.0 - k);
        out[i] = Some(next);
        prev = next;
    }

    out
}

/// EMA at the latest index only, or `None` when the series is too short.
pub fn latest_ema(closes: &[f64], period: usize) -> Option<f64> {
    compute_ema(closes, period).pop().flatten()
}
