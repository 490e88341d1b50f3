use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::jobs::error::{JobError, JobResult};
use crate::jobs::types::{JobContext, JobStatus, JobTask};

/// Tracks running jobs by name so a slow run is never overlapped.
#[derive(Clone, Default)]
pub struct ConcurrencyTracker {
    running: Arc<RwLock<HashMap<String, usize>>>,
}

impl ConcurrencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a run unless `max_concurrent` runs of `job_name` are already active.
    pub async fn try_acquire(&self, job_name: &str, max_concurrent: usize) -> bool {
        let mut running = self.running.write().await;
        let count = running.entry(job_name.to_string()).or_insert(0);
        if *count >= max_concurrent {
            return false;
        }
        *count += 1;
        true
    }

    pub async fn release(&self, job_name: &str) {
        let mut running = self.running.write().await;
        if let Some(count) = running.get_mut(job_name) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                running.remove(job_name);
            }
        }
    }

    pub async fn running(&self, job_name: &str) -> usize {
        self.running.read().await.get(job_name).copied().unwrap_or(0)
    }
}

/// Runs tasks with a timeout and a no-overlap guard, logging each outcome.
pub struct JobExecutor {
    concurrency: ConcurrencyTracker,
    timeout: Duration,
    shutdown: CancellationToken,
}

impl JobExecutor {
    pub fn new(timeout: Duration, shutdown: CancellationToken) -> Self {
        Self {
            concurrency: ConcurrencyTracker::new(),
            timeout,
            shutdown,
        }
    }

    pub async fn execute(&self, task: &dyn JobTask) -> JobResult<()> {
        let job_name = task.name().to_string();

        if self.shutdown.is_cancelled() {
            return Err(JobError::Cancelled(job_name));
        }

        if !self.concurrency.try_acquire(&job_name, 1).await {
            tracing::warn!(job = %job_name, status = %JobStatus::Skipped, "Previous run still active");
            return Err(JobError::AlreadyRunning(job_name));
        }

        let result = self.run(task, &job_name).await;
        self.concurrency.release(&job_name).await;
        result
    }

    async fn run(&self, task: &dyn JobTask, job_name: &str) -> JobResult<()> {
        let ctx = JobContext {
            execution_id: Uuid::new_v4(),
            job_name: job_name.to_string(),
            cancellation_token: self.shutdown.child_token(),
        };
        let execution_id = ctx.execution_id;
        let start_time = Instant::now();

        let result = tokio::time::timeout(self.timeout, task.execute(ctx)).await;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(())) => {
                tracing::info!(
                    job = %job_name,
                    %execution_id,
                    duration_ms,
                    status = %JobStatus::Success,
                    "Job finished"
                );
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::error!(
                    job = %job_name,
                    %execution_id,
                    duration_ms,
                    status = %JobStatus::Failed,
                    error = %e,
                    "Job failed"
                );
                Err(JobError::ExecutionFailed(e))
            }
            Err(_) => {
                tracing::error!(
                    job = %job_name,
                    %execution_id,
                    duration_ms,
                    status = %JobStatus::Timeout,
                    "Job timed out"
                );
                Err(JobError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}
