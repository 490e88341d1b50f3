use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Job execution failed: {0}")]
    ExecutionFailed(#[from] AppError),

    #[error("Job execution timeout after {0}s")]
    Timeout(u64),

    #[error("Job {0} is still running; run skipped")]
    AlreadyRunning(String),

    #[error("Job cancelled: {0}")]
    Cancelled(String),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}

pub type JobResult<T> = Result<T, JobError>;
