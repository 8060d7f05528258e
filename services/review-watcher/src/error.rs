//! Error types for the review watcher

/// Errors that can occur while polling the review service and notifying
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Endpoint unavailable: {0}")]
    Connection(String),

    #[error(
        "Unexpected API response: server returned status {status} for {url}. Redirect: {}",
        if *redirect { "yes" } else { "no" }
    )]
    BadStatus {
        status: u16,
        url: String,
        redirect: bool,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing field in response: {0}")]
    MissingField(String),

    #[error("Field '{field}' has wrong type, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Undocumented homework status: {0}")]
    UnknownStatus(String),

    #[error("Message delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for watcher operations
pub type Result<T> = std::result::Result<T, WatcherError>;
