use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::AppResult;

/// Per-run context handed to a task.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub execution_id: Uuid,
    pub job_name: String,
    /// Cancelled when the scheduler shuts down
    pub cancellation_token: CancellationToken,
}

/// Outcome of one scheduled run, as logged by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Success,
    Failed,
    Timeout,
    Skipped,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Success => write!(f, "success"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Timeout => write!(f, "timeout"),
            JobStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Trait that all job tasks must implement
#[async_trait]
pub trait JobTask: Send + Sync + std::fmt::Debug {
    /// Name used for the no-overlap guard and in logs
    fn name(&self) -> &str;

    async fn execute(&self, ctx: JobContext) -> AppResult<()>;

    fn description(&self) -> Option<String> {
        None
    }
}
