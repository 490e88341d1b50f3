use std::time::Duration;

use async_trait::async_trait;

use super::{FeedMessage, FeedSource};
use crate::config::FeedConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

const SERVICE: &str = "feed";

/// Polls the configured generator with an empty `POST` and reads `msg`.
pub struct HttpFeedSource {
    url: String,
    timeout: Duration,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.url.clone(), Duration::from_secs(config.request_timeout_secs))
    }

    fn make_error(message: impl Into<String>, source: Option<anyhow::Error>) -> AppError {
        AppError::ExternalApi {
            service: SERVICE.into(),
            message: message.into(),
            source,
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch_name(&self) -> AppResult<String> {
        let resp = HTTP_CLIENT
            .post(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e: reqwest::Error| {
                Self::make_error(format!("request failed: {}", e), Some(e.into()))
            })?
            .error_for_status()
            .map_err(|e: reqwest::Error| {
                Self::make_error(format!("HTTP error: {}", e), Some(e.into()))
            })?;

        let message: FeedMessage = resp.json().await.map_err(|e: reqwest::Error| {
            Self::make_error(format!("invalid JSON: {}", e), Some(e.into()))
        })?;

        Ok(message.msg)
    }
}
