use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::okx::CandleApi;
use crate::okx::errors::MarketError;
use crate::okx::sign::{iso_timestamp, sign_request};
use crate::okx::types::{ApiEnvelope, RawCandle, RawTokenMeta};
use crate::types::{Candle, TokenMeta};

/// Credentials for signed requests.
#[derive(Clone)]
pub struct OkxCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub passphrase: String,
}

/// Signed HTTP client for the DEX market-data API.
#[derive(Clone)]
pub struct OkxDexClient {
    http: Client,
    base_url: String,
    chain_index: String,
    credentials: OkxCredentials,
}

impl OkxDexClient {
    pub fn new(
        base_url: String,
        chain_index: String,
        credentials: OkxCredentials,
    ) -> Result<Self, MarketError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url,
            chain_index,
            credentials,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path_with_query: &str,
    ) -> Result<ApiEnvelope<T>, MarketError> {
        let timestamp = iso_timestamp();
        let signature = sign_request(
            &self.credentials.api_secret,
            &timestamp,
            "GET",
            path_with_query,
            "",
        );

        let url = format!("{}{}", self.base_url, path_with_query);

        let resp = self
            .http
            .get(&url)
            .header("OK-ACCESS-KEY", &self.credentials.api_key)
            .header("OK-ACCESS-SIGN", signature)
            .header("OK-ACCESS-TIMESTAMP", timestamp)
            .header("OK-ACCESS-PASSPHRASE", &self.credentials.passphrase)
            .send()
            .await?
            .error_for_status()?;

        let envelope: ApiEnvelope<T> = resp.json().await?;
        if envelope.code != "0" {
            return Err(MarketError::Api {
                code: envelope.code,
                msg: envelope.msg,
            });
        }

        Ok(envelope)
    }
}

/// Parse one positional candle row. The forming bucket (confirm != "1")
/// is dropped — detection only ever runs on closed candles.
fn parse_candle(row: &[String]) -> Result<Option<Candle>, MarketError> {
    if row.len() < 8 {
        return Err(MarketError::MalformedCandle(format!(
            "expected 8 fields, got {}",
            row.len()
        )));
    }

    if row[7] != "1" {
        return Ok(None);
    }

    Ok(Some(Candle {
        ts_ms: row[0].parse()?,
        open: row[1].parse()?,
        high: row[2].parse()?,
        low: row[3].parse()?,
        close: row[4].parse()?,
        volume: row[5].parse()?,
        volume_usd: row[6].parse()?,
    }))
}

/// Normalize a candle page: drop unconfirmed rows, order ascending,
/// de-duplicate timestamps. The API returns newest first.
fn normalize_candles(rows: &[RawCandle]) -> Result<Vec<Candle>, MarketError> {
    let mut candles = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(candle) = parse_candle(row)? {
            candles.push(candle);
        }
    }

    candles.sort_by_key(|c| c.ts_ms);
    candles.dedup_by_key(|c| c.ts_ms);

    Ok(candles)
}

#[async_trait]
impl CandleApi for OkxDexClient {
    #[instrument(skip(self), fields(address = %address), level = "debug")]
    async fn fetch_candles(
        &self,
        address: &str,
        bar: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketError> {
        let path = format!(
            "/api/v5/dex/market/candles?chainIndex={}&tokenContractAddress={}&bar={}&limit={}",
            self.chain_index, address, bar, limit
        );

        let envelope: ApiEnvelope<RawCandle> = self.get_json(&path).await?;
        let candles = normalize_candles(&envelope.data)?;

        debug!(count = candles.len(), "candles fetched");
        Ok(candles)
    }

    #[instrument(skip(self), fields(address = %address), level = "debug")]
    async fn fetch_token_meta(&self, address: &str) -> Result<TokenMeta, MarketError> {
        let path = format!(
            "/api/v5/dex/market/token-info?chainIndex={}&tokenContractAddress={}",
            self.chain_index, address
        );

        let envelope: ApiEnvelope<RawTokenMeta> = self.get_json(&path).await?;
        let raw = envelope
            .data
            .into_iter()
            .next()
            .ok_or(MarketError::EmptyResponse)?;

        Ok(TokenMeta {
            symbol: raw.symbol,
            name: raw.name,
        })
    }
}
