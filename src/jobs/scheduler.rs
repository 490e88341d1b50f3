use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler as TokioCronScheduler};
use tokio_util::sync::CancellationToken;

use crate::jobs::error::JobResult;
use crate::jobs::executor::JobExecutor;
use crate::jobs::types::JobTask;

/// Wrapper around tokio-cron-scheduler running tasks at fixed intervals.
pub struct JobScheduler {
    scheduler: Arc<Mutex<TokioCronScheduler>>,
    executor: Arc<JobExecutor>,
    shutdown: CancellationToken,
}

impl JobScheduler {
    /// `job_timeout` bounds every single run.
    pub async fn new(job_timeout: Duration) -> JobResult<Self> {
        let scheduler = TokioCronScheduler::new().await?;
        let shutdown = CancellationToken::new();

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            executor: Arc::new(JobExecutor::new(job_timeout, shutdown.clone())),
            shutdown,
        })
    }

    /// Runs `task` every `interval`. A tick arriving while the previous run is
    /// still active is skipped.
    pub async fn schedule_repeated(&self, task: Arc<dyn JobTask>, interval: Duration) -> JobResult<()> {
        let executor = Arc::clone(&self.executor);
        let job_name = task.name().to_string();

        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let executor = Arc::clone(&executor);
            let task = Arc::clone(&task);

            Box::pin(async move {
                // The executor has already logged the outcome.
                let _ = executor.execute(task.as_ref()).await;
            })
        })?;

        self.scheduler.lock().await.add(job).await?;
        tracing::info!(job = %job_name, interval_secs = interval.as_secs(), "Job scheduled");
        Ok(())
    }

    pub async fn start(&self) -> JobResult<()> {
        self.scheduler.lock().await.start().await?;
        tracing::info!("Job scheduler started");
        Ok(())
    }

    /// Cancels running tasks and stops the scheduler.
    pub async fn stop(&self) -> JobResult<()> {
        self.shutdown.cancel();
        self.scheduler.lock().await.shutdown().await?;
        tracing::info!("Job scheduler stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::AppResult;
    use crate::jobs::types::JobContext;

    #[derive(Debug, Default)]
    struct CountingTask {
        runs: AtomicUsize,
    }

    #[async_trait]
    impl JobTask for CountingTask {
        fn name(&self) -> &str {
            "counting"
        }

        async fn execute(&self, _ctx: JobContext) -> AppResult<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_repeated_job_runs_until_stopped() {
        let scheduler = JobScheduler::new(Duration::from_secs(5)).await.unwrap();
        let task = Arc::new(CountingTask::default());

        scheduler
            .schedule_repeated(task.clone(), Duration::from_secs(1))
            .await
            .unwrap();
        scheduler.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        scheduler.stop().await.unwrap();

        let runs = task.runs.load(Ordering::SeqCst);
        assert!(runs >= 1, "expected at least one run, got {}", runs);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(task.runs.load(Ordering::SeqCst), runs);
    }
}
