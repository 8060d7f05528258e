//! Review Watcher - homework review status notifications
//!
//! Polls the review service for homework status changes and forwards them to
//! a Telegram chat, along with any failure that keeps the poll from working.

pub mod api;
pub mod checkpoint;
pub mod config;
pub mod cycle;
pub mod dedup;
pub mod error;
pub mod io;
pub mod notifier;
pub mod payload;
pub mod status;
pub mod supervisor;
pub mod telegram;

pub use config::{load_config, Config};
pub use error::{Result, WatcherError};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::ReviewApi;
use crate::checkpoint::Checkpoint;
use crate::dedup::ChangeFilter;
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::supervisor::Supervisor;
use crate::telegram::TelegramNotifier;

/// Run the watcher with the given configuration.
///
/// Secrets must have been resolved with [`Config::resolve_secrets`]. Returns
/// once a shutdown signal has stopped the poll loop.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;
    let credentials = config
        .credentials
        .clone()
        .ok_or_else(|| WatcherError::Config("secrets have not been resolved".to_string()))?;

    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(Duration::from_secs(
        config.api.request_timeout_seconds,
    ))?);
    let cancel = CancellationToken::new();

    let api = ReviewApi::new(
        &config.api.endpoint,
        &credentials.api_token,
        Arc::clone(&http),
    );
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram.api_base_url,
        &credentials.bot_token,
        &credentials.chat_id,
        Arc::clone(&http),
    ));

    let mut supervisor = Supervisor::new(
        api,
        notifier,
        ChangeFilter::new(config.polling.error_message_length),
        Checkpoint::lookback_days(config.api.lookback_days),
        config.polling.selection,
        Duration::from_secs(config.polling.retry_interval_seconds),
        cancel.clone(),
    );

    spawn_shutdown_handler(cancel)?;

    tracing::info!("Review watcher started");
    supervisor.run().await;
    tracing::info!("Review watcher stopped");

    Ok(())
}

/// Cancel `cancel` on Ctrl-C or, on unix, SIGTERM.
///
/// The SIGTERM listener is installed before this returns.
fn spawn_shutdown_handler(cancel: CancellationToken) -> Result<()> {
    #[cfg(unix)]
    let mut sigterm =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async move {
            sigterm.recv().await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => tracing::info!("Ctrl-C received, finishing current cycle"),
            _ = terminate => tracing::info!("SIGTERM received, finishing current cycle"),
        }
        cancel.cancel();
    });

    Ok(())
}
