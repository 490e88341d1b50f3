//! Source of generated good names for the periodic import.

mod client;
mod types;

pub use client::HttpFeedSource;
pub use types::FeedMessage;

use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Fetches one generated name. It may be blank; callers decide what to do with it.
    async fn fetch_name(&self) -> AppResult<String>;
}
