//! Notifier trait for sending chat messages

use async_trait::async_trait;

/// Outcome of a delivery the chat service answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The chat service refused the message
    Rejected(String),
}

/// Trait for sending notifications.
///
/// `Ok(Delivery::Rejected)` means the chat answered and said no;
/// `Err(WatcherError::Delivery)` means it could not be reached at all.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send one text message
    async fn send(&self, message: &str) -> crate::Result<Delivery>;
}

/// Send `message` and log the outcome. Returns true only if it was delivered.
///
/// Failures stop here; they are never turned into another notification.
pub async fn deliver(notifier: &dyn Notifier, message: &str) -> bool {
    tracing::debug!("Sending message via '{}'", notifier.type_name());
    match notifier.send(message).await {
        Ok(Delivery::Sent) => {
            tracing::info!("Message sent via '{}': {}", notifier.type_name(), message);
            true
        }
        Ok(Delivery::Rejected(reason)) => {
            tracing::error!(
                "'{}' rejected message {:?}: {}",
                notifier.type_name(),
                message,
                reason
            );
            false
        }
        Err(e) => {
            tracing::error!(
                "Could not send message {:?} via '{}': {}",
                message,
                notifier.type_name(),
                e
            );
            false
        }
    }
}
