//! Telegram Bot API notifier

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::io::{redact_bot_token, HttpClient};
use crate::notifier::{Delivery, Notifier};
use crate::WatcherError;

/// Subset of the Bot API reply envelope
#[derive(Debug, Deserialize)]
struct TelegramReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to one chat through a bot
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("send_url", &redact_bot_token(&self.send_url))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(
        api_base_url: &str,
        bot_token: &str,
        chat_id: &str,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            api_base_url.trim_end_matches('/'),
            bot_token
        );

        tracing::debug!("Created TelegramNotifier for chat {}", chat_id);

        Self {
            send_url,
            chat_id: chat_id.to_string(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, message: &str) -> crate::Result<Delivery> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];

        let response = self
            .http
            .post_form(&self.send_url, &params)
            .await
            .map_err(|e| WatcherError::Delivery(e.to_string()))?;

        let reply = serde_json::from_str::<TelegramReply>(&response.body).ok();
        match reply {
            Some(TelegramReply { ok: true, .. }) if response.status == 200 => Ok(Delivery::Sent),
            Some(TelegramReply {
                description: Some(description),
                ..
            }) => Ok(Delivery::Rejected(format!(
                "Telegram API returned status {}: {}",
                response.status, description
            ))),
            _ => Ok(Delivery::Rejected(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            ))),
        }
    }
}
