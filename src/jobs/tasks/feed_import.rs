use std::sync::Arc;

use async_trait::async_trait;

use crate::config::FeedConfig;
use crate::error::{AppError, AppResult};
use crate::external::feed::FeedSource;
use crate::jobs::types::{JobContext, JobTask};
use crate::services::GoodService;

pub const FEED_IMPORT_JOB: &str = "feed_import";

/// Pulls generated names from a feed and files them as goods under one category.
pub struct FeedImportTask {
    source: Arc<dyn FeedSource>,
    goods: GoodService,
    goods_per_cycle: u32,
    category_id: i32,
}

impl std::fmt::Debug for FeedImportTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedImportTask")
            .field("source", &self.source.name())
            .field("goods_per_cycle", &self.goods_per_cycle)
            .field("category_id", &self.category_id)
            .finish()
    }
}

impl FeedImportTask {
    pub fn new(source: Arc<dyn FeedSource>, goods: GoodService, config: &FeedConfig) -> Self {
        Self {
            source,
            goods,
            goods_per_cycle: config.goods_per_cycle,
            category_id: config.category_id,
        }
    }
}

#[async_trait]
impl JobTask for FeedImportTask {
    fn name(&self) -> &str {
        FEED_IMPORT_JOB
    }

    /// Names the service rejects are skipped. Any other failing fetch or insert
    /// ends the cycle; the next tick starts afresh.
    async fn execute(&self, ctx: JobContext) -> AppResult<()> {
        let mut added = 0u32;

        for _ in 0..self.goods_per_cycle {
            if ctx.cancellation_token.is_cancelled() {
                tracing::info!(execution_id = %ctx.execution_id, added, "Feed import cancelled");
                return Ok(());
            }

            let name = self.source.fetch_name().await?;
            if name.trim().is_empty() {
                tracing::warn!(source = self.source.name(), "Feed returned a blank name, skipping");
                continue;
            }

            match self.goods.create_good(&name, self.category_id).await {
                Ok(_) => added += 1,
                Err(AppError::Validation { reason, .. }) => {
                    tracing::warn!(source = self.source.name(), %reason, "Feed name rejected, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            execution_id = %ctx.execution_id,
            category_id = self.category_id,
            added,
            "Feed import cycle finished"
        );
        Ok(())
    }

    fn description(&self) -> Option<String> {
        Some(format!(
            "Import {} goods per cycle from {} into category {}",
            self.goods_per_cycle,
            self.source.name(),
            self.category_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tokio::sync::Mutex;
    use tokio_util::sync::CancellationToken;
    use uuid::Uuid;

    use crate::repositories::{CatalogQuery, CategoryStore, MemoryStore};

    struct ScriptedFeed {
        replies: Mutex<VecDeque<AppResult<String>>>,
    }

    impl ScriptedFeed {
        fn new(replies: Vec<AppResult<String>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl FeedSource for ScriptedFeed {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_name(&self) -> AppResult<String> {
            self.replies
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Ok("Spare".to_string()))
        }
    }

    fn ctx() -> JobContext {
        JobContext {
            execution_id: Uuid::new_v4(),
            job_name: FEED_IMPORT_JOB.to_string(),
            cancellation_token: CancellationToken::new(),
        }
    }

    async fn setup(feed: Arc<ScriptedFeed>) -> (FeedImportTask, MemoryStore) {
        let store = MemoryStore::new();
        store.create("Imported").await.unwrap();
        let shared = Arc::new(store.clone());
        let goods = GoodService::new(shared.clone(), shared);
        let task = FeedImportTask::new(feed, goods, &FeedConfig::default());
        (task, store)
    }

    #[tokio::test]
    async fn test_cycle_imports_configured_number_of_goods() {
        let feed = ScriptedFeed::new(vec![
            Ok("Copper kettle".to_string()),
            Ok("Wool scarf".to_string()),
            Ok("Desk lamp".to_string()),
        ]);
        let (task, store) = setup(feed).await;

        task.execute(ctx()).await.unwrap();

        let names: Vec<_> = store
            .list_goods(1)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.good_name)
            .collect();
        assert_eq!(names, ["Copper kettle", "Wool scarf", "Desk lamp"]);
    }

    #[tokio::test]
    async fn test_blank_names_are_skipped() {
        let feed = ScriptedFeed::new(vec![
            Ok("  ".to_string()),
            Ok("Desk lamp".to_string()),
            Ok(String::new()),
        ]);
        let (task, store) = setup(feed).await;

        task.execute(ctx()).await.unwrap();
        assert_eq!(store.good_count().await, 1);
    }

    #[tokio::test]
    async fn test_overlong_names_are_skipped() {
        let feed = ScriptedFeed::new(vec![
            Ok("w".repeat(crate::services::MAX_NAME_LEN + 1)),
            Ok("Desk lamp".to_string()),
            Ok("Wool scarf".to_string()),
        ]);
        let (task, store) = setup(feed).await;

        task.execute(ctx()).await.unwrap();
        assert_eq!(store.good_count().await, 2);
    }

    #[tokio::test]
    async fn test_first_failure_ends_cycle() {
        let feed = ScriptedFeed::new(vec![
            Ok("Desk lamp".to_string()),
            Err(AppError::ExternalApi {
                service: "feed".to_string(),
                message: "HTTP error: 502".to_string(),
                source: None,
            }),
            Ok("Never fetched".to_string()),
        ]);
        let (task, store) = setup(feed).await;

        let result = task.execute(ctx()).await;
        assert!(matches!(result, Err(AppError::ExternalApi { .. })));
        assert_eq!(store.good_count().await, 1);
    }

    #[tokio::test]
    async fn test_missing_category_fails_without_orphans() {
        let feed = ScriptedFeed::new(vec![Ok("Desk lamp".to_string())]);
        let store = MemoryStore::new();
        let shared = Arc::new(store.clone());
        let task = FeedImportTask::new(
            feed,
            GoodService::new(shared.clone(), shared),
            &FeedConfig::default(),
        );

        let result = task.execute(ctx()).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(store.good_count().await, 0);
    }

    #[tokio::test]
    async fn test_cancelled_cycle_adds_nothing() {
        let feed = ScriptedFeed::new(vec![]);
        let (task, store) = setup(feed).await;
        let ctx = ctx();
        ctx.cancellation_token.cancel();

        task.execute(ctx).await.unwrap();
        assert_eq!(store.good_count().await, 0);
    }

    struct SlowFeed {
        delay: std::time::Duration,
    }

    #[async_trait]
    impl FeedSource for SlowFeed {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch_name(&self) -> AppResult<String> {
            tokio::time::sleep(self.delay).await;
            Ok("Slow import".to_string())
        }
    }

    #[tokio::test]
    async fn test_cycle_of_slow_fetches_fits_cycle_timeout() {
        use crate::jobs::executor::JobExecutor;
        use std::time::Duration;

        let config = FeedConfig {
            enabled: true,
            goods_per_cycle: 3,
            request_timeout_secs: 1,
            timeout_secs: 3,
            ..FeedConfig::default()
        };
        config.validate().unwrap();

        let store = MemoryStore::new();
        store.create("Imported").await.unwrap();
        let shared = Arc::new(store.clone());
        let task = FeedImportTask::new(
            Arc::new(SlowFeed {
                delay: Duration::from_millis(600),
            }),
            GoodService::new(shared.clone(), shared),
            &config,
        );

        // Each fetch stays well inside its own limit; together they exceed one.
        let executor = JobExecutor::new(
            Duration::from_secs(config.timeout_secs),
            CancellationToken::new(),
        );
        executor.execute(&task).await.unwrap();

        assert_eq!(store.good_count().await, 3);
    }
}
