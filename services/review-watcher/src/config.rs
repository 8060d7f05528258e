//! Configuration types for the review watcher

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::WatcherError;

pub const API_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    /// Filled by [`Config::resolve_secrets`], never serialized
    #[serde(skip)]
    pub credentials: Option<Credentials>,
}

/// Review service endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// How far back the first fetch after startup looks
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u64,
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_seconds: default_request_timeout(),
            lookback_days: default_lookback_days(),
            token: None,
        }
    }
}

/// Telegram bot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_base_url")]
    pub api_base_url: String,
    #[serde(default, skip_serializing)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_telegram_base_url(),
            bot_token: None,
            chat_id: None,
        }
    }
}

/// Poll loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,
    #[serde(default)]
    pub selection: SelectionPolicy,
    /// Error texts are deduplicated on this many leading characters
    #[serde(default = "default_error_message_length")]
    pub error_message_length: usize,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_interval_seconds: default_retry_interval(),
            selection: SelectionPolicy::default(),
            error_message_length: default_error_message_length(),
        }
    }
}

/// Which homeworks of a response produce notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Only the homework with the highest id
    #[default]
    LatestOnly,
    /// Every homework, in response order
    AllItems,
}

/// Secrets required to run; resolved from the environment at startup
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"***")
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Config {
    /// Reject settings the poll loop cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.api.request_timeout_seconds == 0 {
            return Err(WatcherError::Config(
                "api.request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.polling.retry_interval_seconds == 0 {
            return Err(WatcherError::Config(
                "polling.retry_interval_seconds must be greater than 0".to_string(),
            ));
        }
        if self.polling.error_message_length == 0 {
            return Err(WatcherError::Config(
                "polling.error_message_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve secrets from the process environment
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.resolve_secrets_with(|name| std::env::var(name).ok())
    }

    /// Resolve secrets using `lookup` for environment variables.
    ///
    /// A non-empty variable wins over the value from the config file. Every
    /// secret that is still missing is named in the returned error.
    pub fn resolve_secrets_with<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |var: &str, from_file: &Option<String>| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .or_else(|| from_file.clone().filter(|v| !v.is_empty()))
        };

        let api_token = pick(API_TOKEN_VAR, &self.api.token);
        let bot_token = pick(BOT_TOKEN_VAR, &self.telegram.bot_token);
        let chat_id = pick(CHAT_ID_VAR, &self.telegram.chat_id);

        let mut missing = Vec::new();
        if api_token.is_none() {
            missing.push(API_TOKEN_VAR);
        }
        if bot_token.is_none() {
            missing.push(BOT_TOKEN_VAR);
        }
        if chat_id.is_none() {
            missing.push(CHAT_ID_VAR);
        }

        match (api_token, bot_token, chat_id) {
            (Some(api_token), Some(bot_token), Some(chat_id)) => {
                self.credentials = Some(Credentials {
                    api_token,
                    bot_token,
                    chat_id,
                });
                Ok(())
            }
            _ => Err(WatcherError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_lookback_days() -> u64 {
    30
}

fn default_telegram_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_interval() -> u64 {
    10
}

fn default_error_message_length() -> usize {
    100
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        WatcherError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
