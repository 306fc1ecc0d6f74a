use clap::Parser;

/// EMA bullish-alignment monitor for DEX token contracts.
#[derive(Debug, Parser)]
#[clap(name = "crossline", version)]
pub struct Cli {
    /// Seconds between polling cycles (overrides POLL_INTERVAL_SECS)
    #[clap(long)]
    pub interval_secs: Option<u64>,

    /// Candle granularity, e.g. 1m, 5m, 15m (overrides CANDLE_BAR)
    #[clap(long)]
    pub bar: Option<String>,

    /// Token contract addresses to monitor (comma-separated,
    /// overrides TOKEN_CONTRACTS)
    #[clap(long, value_delimiter = ',')]
    pub contracts: Option<Vec<String>>,

    /// Run a single polling cycle and exit
    #[clap(long)]
    pub once: bool,

    /// Emit line-delimited JSON logs
    #[clap(long)]
    pub json_logs: bool,
}
