//! pacstatus CLI - Pactus network status bot

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use pacstatus::{
    status, supply, ClientManager, ConfigFile, EndpointConfig, PriceClient, TelegramClient,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pacstatus")]
#[command(
    version,
    about = "Pactus network status bot with multi-endpoint RPC failover"
)]
#[command(after_help = r#"EXAMPLES:
    # Run with the default config file
    pacstatus

    # Override the endpoint pool from the command line
    pacstatus --rpc http://127.0.0.1:8545 --rpc http://bootstrap1.pactus.org:8545

    # Post a single update and exit
    pacstatus --once

ENVIRONMENT VARIABLES:
    TELEGRAM_BOT_TOKEN    Bot token used to post updates (required)

CONFIG FILE:
    Default: ~/.config/pacstatus/config.toml
"#)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use only this RPC endpoint (can be repeated; replaces the config pool)
    #[arg(long = "rpc", action = clap::ArgAction::Append)]
    rpc_urls: Vec<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    token: String,

    /// Run one update cycle and exit
    #[arg(long)]
    once: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn,pacstatus=info",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::load_default()?.unwrap_or_default(),
    };

    if !cli.rpc_urls.is_empty() {
        config.endpoints = cli
            .rpc_urls
            .iter()
            .map(|url| EndpointConfig::new(url.clone()))
            .collect();
    }

    config.validate()?;

    let manager = ClientManager::from_endpoints(&config.endpoints, config.settings.timeout_secs);
    if manager.client_count() == 0 {
        anyhow::bail!("no usable RPC endpoints");
    }
    tracing::info!(endpoints = manager.client_count(), "client pool ready");

    let price = PriceClient::new(&config.price.endpoint, config.settings.timeout_secs)
        .context("building price client")?;
    let telegram =
        TelegramClient::new(&cli.token, config.settings.timeout_secs).context("building Telegram client")?;

    // Reuse the configured message, or post a fresh placeholder to edit
    let chat_id = config.telegram.chat_id.clone();
    let message_id = match config.telegram.message_id {
        Some(id) => id,
        None => {
            let id = telegram
                .send_message(&chat_id, ".")
                .await
                .context("posting initial message")?;
            tracing::info!(message_id = id, "posted initial message; pin telegram.message_id in the config to reuse it");
            id
        }
    };

    if cli.once {
        run_cycle(&manager, &price, &telegram, &chat_id, message_id).await?;
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.settings.interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
            _ = ticker.tick() => {}
        }

        // Shutdown aborts an in-flight cycle instead of draining the pool
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
            result = run_cycle(&manager, &price, &telegram, &chat_id, message_id) => {
                match result {
                    Ok(()) => tracing::info!("status updated"),
                    // A transient all-endpoints outage skips this cycle; the
                    // previous message stays up rather than showing zeroes.
                    Err(e) => tracing::warn!(%e, "cycle failed, skipping update"),
                }
            }
        }
    }

    Ok(())
}

/// One full update cycle: query, derive, format, publish
async fn run_cycle(
    manager: &ClientManager,
    price: &PriceClient,
    telegram: &TelegramClient,
    chat_id: &str,
    message_id: i64,
) -> pacstatus::Result<()> {
    let (block_time, height) = manager.last_block_time().await?;
    let health = status::assess_health(block_time, Utc::now().timestamp());

    let info = manager.chain_info().await?;
    let circulating = supply::circulating_supply(manager).await?;
    let quote = price.pac_price().await;

    let message = status::build_message(&info, circulating, &health, quote, height);
    telegram
        .edit_message_text(chat_id, message_id, &message)
        .await?;

    Ok(())
}
