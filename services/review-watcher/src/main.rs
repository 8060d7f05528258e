//! Review Watcher CLI
//!
//! Command-line entry point for the homework review status notifier.

use std::path::PathBuf;

use clap::Parser;
use review_watcher::config::SelectionPolicy;
use review_watcher::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "review-watcher")]
#[command(about = "Homework review status notifier for Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which homeworks to announce (overrides config file)
    #[arg(long, value_enum)]
    selection: Option<SelectionPolicy>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    tracing::debug!(
        "Parsed command line arguments: config={:?}, selection={:?}, log_level={:?}",
        args.config,
        args.selection,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Err(e) = config.resolve_secrets() {
        tracing::error!("CRITICAL: {}. Stopping.", e);
        return Err(e.into());
    }

    if let Some(selection) = args.selection {
        config.polling.selection = selection;
    }

    tracing::info!("Starting review watcher");
    tracing::debug!(
        "Endpoint: {}, retry interval: {}s, selection: {:?}",
        config.api.endpoint,
        config.polling.retry_interval_seconds,
        config.polling.selection
    );

    review_watcher::run(config).await?;

    Ok(())
}
