//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

use crate::WatcherError;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    /// Final URL of the request, including the query string
    pub url: String,
    /// Whether the response itself is a redirect (3xx)
    pub is_redirect: bool,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with form-encoded body
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatcherError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn into_response(response: reqwest::Response) -> crate::Result<HttpResponse> {
        let status = response.status();
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| WatcherError::Connection(format!("Reading response body: {}", e)))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            body,
            url,
            is_redirect: status.is_redirection(),
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        tracing::debug!("GET {}", url);
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| WatcherError::Connection(format!("GET {} failed: {}", url, e)))?;

        let response = Self::into_response(response).await?;
        tracing::debug!(
            "GET {} -> {} ({} bytes)",
            response.url,
            response.status,
            response.body.len()
        );
        Ok(response)
    }

    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse> {
        tracing::debug!("POST {}", redact_bot_token(url));
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                WatcherError::Connection(format!(
                    "POST {} failed: {}",
                    redact_bot_token(url),
                    e.without_url()
                ))
            })?;

        let response = Self::into_response(response).await?;
        tracing::debug!(
            "POST {} -> {} ({} bytes)",
            redact_bot_token(url),
            response.status,
            response.body.len()
        );
        Ok(response)
    }
}

/// Telegram puts the bot token in the URL path; keep it out of logs and errors
pub(crate) fn redact_bot_token(url: &str) -> String {
    match url.find("/bot") {
        Some(start) => {
            let token_start = start + "/bot".len();
            let token_end = url[token_start..]
                .find('/')
                .map(|i| token_start + i)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..token_start], &url[token_end..])
        }
        None => url.to_string(),
    }
}
