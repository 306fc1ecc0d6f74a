//! Signed market-data access for the OKX-style DEX API.
//!
//! The engine only ever sees the [`CandleApi`] trait; the production
//! implementation signs every request and normalizes candle pages to
//! ascending, closed-candles-only order.

mod client;
mod sign;

pub mod errors;
pub mod types;

pub use client::{OkxCredentials, OkxDexClient};
pub use errors::MarketError;

use async_trait::async_trait;

use crate::types::{Candle, TokenMeta};

#[async_trait]
pub trait CandleApi: Send + Sync {
    /// Newest `limit` *closed* candles for a contract, ascending by
    /// timestamp. May return fewer than `limit` for young contracts.
    async fn fetch_candles(
        &self,
        address: &str,
        bar: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketError>;

    /// Symbol/name lookup used for alert formatting.
    async fn fetch_token_meta(&self, address: &str) -> Result<TokenMeta, MarketError>;
}
