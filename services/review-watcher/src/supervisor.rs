//! Supervisor: the endless poll loop and failure reporting

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::api::ReviewApi;
use crate::checkpoint::Checkpoint;
use crate::config::SelectionPolicy;
use crate::cycle::{CycleReport, PollCycle};
use crate::dedup::ChangeFilter;
use crate::notifier::{deliver, Notifier};

/// Owns the checkpoint and dedup state and drives poll cycles until cancelled
#[derive(Debug)]
pub struct Supervisor {
    api: ReviewApi,
    notifier: Arc<dyn Notifier>,
    filter: ChangeFilter,
    checkpoint: Checkpoint,
    selection: SelectionPolicy,
    retry_interval: Duration,
    cancel: CancellationToken,
}

impl Supervisor {
    pub fn new(
        api: ReviewApi,
        notifier: Arc<dyn Notifier>,
        filter: ChangeFilter,
        checkpoint: Checkpoint,
        selection: SelectionPolicy,
        retry_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            notifier,
            filter,
            checkpoint,
            selection,
            retry_interval,
            cancel,
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn filter(&self) -> &ChangeFilter {
        &self.filter
    }

    /// Run one cycle and handle its outcome.
    ///
    /// On success the checkpoint moves to the server's `current_date`. On
    /// failure it stays put, the error is logged, and it is sent to the chat
    /// unless its prefix matches the last error delivered.
    pub async fn tick(&mut self) -> crate::Result<CycleReport> {
        let cycle = PollCycle::new(&self.api, self.notifier.as_ref(), self.selection);

        let outcome = cycle.run(self.checkpoint, &mut self.filter).await;

        match outcome {
            Ok(report) => {
                self.checkpoint.advance(report.current_date);
                tracing::debug!(
                    "Cycle finished: {} items, {} sent, next from_date={}",
                    report.items,
                    report.delivered,
                    report.current_date
                );
                Ok(report)
            }
            Err(e) => {
                self.report_failure(&e).await;
                Err(e)
            }
        }
    }

    async fn report_failure(&mut self, error: &crate::WatcherError) {
        let message = format!("Program failure: {}", error);
        tracing::error!("{}", message);

        if !self.filter.is_new_error(&message) {
            tracing::debug!("Same error already reported, not sending");
            return;
        }

        if deliver(self.notifier.as_ref(), &message).await {
            self.filter.record_error(&message);
        }
    }

    /// Poll until the cancellation token fires.
    ///
    /// A running cycle is always allowed to finish; cancellation only cuts
    /// the pause between cycles short.
    pub async fn run(&mut self) {
        tracing::info!(
            "Watching {} every {:?} ({:?}), from_date={}",
            self.api.endpoint(),
            self.retry_interval,
            self.selection,
            self.checkpoint.from_date()
        );

        loop {
            if let Err(e) = self.tick().await {
                tracing::debug!("Cycle failed, retrying in {:?}: {}", self.retry_interval, e);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.retry_interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }
    }
}
