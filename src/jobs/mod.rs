//! Background jobs: a fixed-interval scheduler, an executor guarding each
//! run, and the tasks themselves.

pub mod error;
pub mod executor;
pub mod scheduler;
pub mod tasks;
pub mod types;

pub use error::{JobError, JobResult};
pub use executor::{ConcurrencyTracker, JobExecutor};
pub use scheduler::JobScheduler;
pub use types::{JobContext, JobStatus, JobTask};
