//! One poll iteration: fetch, validate, translate, filter, notify

use crate::api::ReviewApi;
use crate::checkpoint::Checkpoint;
use crate::config::SelectionPolicy;
use crate::dedup::ChangeFilter;
use crate::notifier::{deliver, Notifier};
use crate::payload::{check_response, select};
use crate::status::parse_status;

/// What a successful cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Server time the checkpoint should advance to
    pub current_date: i64,
    /// Homeworks in the response
    pub items: usize,
    /// Messages handed to the notifier
    pub attempted: usize,
    pub delivered: usize,
}

/// A single fetch-to-notify pass over the review service
pub struct PollCycle<'a> {
    api: &'a ReviewApi,
    notifier: &'a dyn Notifier,
    selection: SelectionPolicy,
}

impl<'a> PollCycle<'a> {
    pub fn new(
        api: &'a ReviewApi,
        notifier: &'a dyn Notifier,
        selection: SelectionPolicy,
    ) -> Self {
        Self {
            api,
            notifier,
            selection,
        }
    }

    /// Run the cycle from `checkpoint`.
    ///
    /// Fetch and validation failures abort the cycle. A homework that cannot
    /// be translated is skipped; the rest are still delivered and the first
    /// such failure is returned afterwards, so the checkpoint stays put.
    /// Delivery failures are only logged.
    pub async fn run(
        &self,
        checkpoint: Checkpoint,
        filter: &mut ChangeFilter,
    ) -> crate::Result<CycleReport> {
        let payload = self.api.fetch(checkpoint.from_date()).await?;
        let snapshot = check_response(&payload)?;

        let mut report = CycleReport {
            current_date: snapshot.current_date,
            items: snapshot.homeworks.len(),
            attempted: 0,
            delivered: 0,
        };

        if snapshot.homeworks.is_empty() {
            tracing::debug!("No new statuses in the response");
            return Ok(report);
        }

        let mut first_failure = None;
        for homework in select(snapshot.homeworks, self.selection)? {
            let message = match parse_status(homework) {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!("Skipping homework: {}", e);
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                    continue;
                }
            };

            if !filter.is_new_notification(&message) {
                tracing::debug!("Status unchanged, not sending: {}", message);
                continue;
            }

            report.attempted += 1;
            if deliver(self.notifier, &message).await {
                filter.record_notification(&message);
                report.delivered += 1;
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}
