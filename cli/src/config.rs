use std::time::Duration;

use anyhow::Context as _;

use market::okx::OkxCredentials;

/// Contracts watched when TOKEN_CONTRACTS is not set.
const DEFAULT_CONTRACTS: &[&str] = &[
    "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", // BONK
    "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm", // WIF
    "27G8MtK7VtTcCHkpASjSDdkWWYfoqT6ggEuKidVJidD4", // JLP
];

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub okx_api_key: String,
    pub okx_api_secret: String,
    pub okx_passphrase: String,

    pub telegram_bot_token: String,
    pub telegram_chat_id: String,

    /// Market-data API base URL.
    pub base_url: String,

    /// Chain selector for the DEX market API ("501" = Solana).
    pub chain_index: String,

    /// Instrument universe, in processing order.
    pub contracts: Vec<String>,

    pub poll_interval: Duration,
    pub request_delay: Duration,
    pub bar: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Missing credentials are fatal here, before the scheduler starts;
    /// a running monitor never hits a configuration error.
    pub fn from_env() -> anyhow::Result<Self> {
        let poll_interval_secs = optional_parsed("POLL_INTERVAL_SECS", 300)?;
        let request_delay_ms = optional_parsed("REQUEST_DELAY_MS", 1_000)?;

        let contracts = match std::env::var("TOKEN_CONTRACTS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => DEFAULT_CONTRACTS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            okx_api_key: required("OKX_API_KEY")?,
            okx_api_secret: required("OKX_API_SECRET")?,
            okx_passphrase: required("OKX_API_PASSPHRASE")?,
            telegram_bot_token: required("TELEGRAM_BOT_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            base_url: std::env::var("OKX_BASE_URL")
                .unwrap_or_else(|_| "https://web3.okx.com".to_string()),
            chain_index: std::env::var("CHAIN_INDEX").unwrap_or_else(|_| "501".to_string()),
            contracts,
            poll_interval: Duration::from_secs(poll_interval_secs),
            request_delay: Duration::from_millis(request_delay_ms),
            bar: std::env::var("CANDLE_BAR").unwrap_or_else(|_| "5m".to_string()),
        })
    }

    pub fn credentials(&self) -> OkxCredentials {
        OkxCredentials {
            api_key: self.okx_api_key.clone(),
            api_secret: self.okx_api_secret.clone(),
            passphrase: self.okx_passphrase.clone(),
        }
    }
}

fn required(name: &'static str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("missing required env var {name}"))
}

fn optional_parsed(name: &'static str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid {name}: {raw}")),
        Err(_) => Ok(default),
    }
}
