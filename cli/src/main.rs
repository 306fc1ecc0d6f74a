pub mod cli;
pub mod config;

use clap::Parser;

use cli::Cli;
use common::logger::init_logger;
use config::AppConfig;
use market::okx::OkxDexClient;
use notifier::telegram::TelegramNotifier;
use scheduler::{MonitorConfig, MonitorEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logger("crossline", cli.json_logs);

    let mut cfg = AppConfig::from_env()?;

    // CLI overrides for operational use.
    if let Some(secs) = cli.interval_secs {
        cfg.poll_interval = std::time::Duration::from_secs(secs);
    }
    if let Some(bar) = cli.bar {
        cfg.bar = bar;
    }
    if let Some(contracts) = cli.contracts {
        cfg.contracts = contracts;
    }

    let client = OkxDexClient::new(
        cfg.base_url.clone(),
        cfg.chain_index.clone(),
        cfg.credentials(),
    )?;

    let sink = TelegramNotifier::new(
        cfg.telegram_bot_token.clone(),
        cfg.telegram_chat_id.clone(),
    )?;

    let monitor_cfg = MonitorConfig {
        poll_interval: cfg.poll_interval,
        request_delay: cfg.request_delay,
        bar: cfg.bar.clone(),
        ..MonitorConfig::default()
    };

    tracing::info!(
        instruments = cfg.contracts.len(),
        bar = %monitor_cfg.bar,
        interval_secs = monitor_cfg.poll_interval.as_secs(),
        "starting crossline monitor"
    );

    let mut engine = MonitorEngine::new(monitor_cfg, cfg.contracts.clone(), client, sink);

    if cli.once {
        engine.run_cycle().await;
        return Ok(());
    }

    tokio::spawn(engine.run());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");

    Ok(())
}
