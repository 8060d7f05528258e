//! Client for the homework review status endpoint

use std::sync::Arc;

use serde_json::Value;

use crate::io::HttpClient;
use crate::WatcherError;

/// Fetches homework statuses changed since a given date
pub struct ReviewApi {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for ReviewApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewApi")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ReviewApi {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created ReviewApi for {}", endpoint);

        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the statuses changed since `from_date` and parse the JSON body.
    ///
    /// Transport failures surface as `Connection`, any non-200 reply as
    /// `BadStatus`. The body is not validated here.
    pub async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        let from_date = from_date.to_string();
        tracing::info!("Requesting homework statuses from {}", self.endpoint);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await?;

        if response.status != 200 {
            return Err(WatcherError::BadStatus {
                status: response.status,
                url: response.url,
                redirect: response.is_redirect,
            });
        }

        let payload: Value = serde_json::from_str(&response.body)?;
        tracing::info!("Homework statuses received");
        Ok(payload)
    }
}
