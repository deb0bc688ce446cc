//! Job domain model - a named unit of work with a monotonic lifecycle

use crate::core::{error::CoreError, state::JobStatus};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Maximum length of a job name, in characters
pub const MAX_JOB_NAME_LEN: usize = 100;

/// The pluggable unit of work a job carries
///
/// Implementations may perform I/O; the executor treats `perform` as a
/// suspension point and applies a per-job timeout around it.
#[async_trait]
pub trait Work: Send + Sync {
    /// Perform the unit of work
    async fn perform(&self) -> anyhow::Result<()>;
}

/// Work that completes immediately without side effects
pub struct NoopWork;

#[async_trait]
impl Work for NoopWork {
    async fn perform(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Any sync closure returning a `Result` is usable as work
#[async_trait]
impl<F> Work for F
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    async fn perform(&self) -> anyhow::Result<()> {
        (self)()
    }
}

/// Validate a job name: non-empty, at most [`MAX_JOB_NAME_LEN`] characters
pub fn validate_job_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::InvalidJobName(
            "name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_JOB_NAME_LEN {
        return Err(CoreError::InvalidJobName(format!(
            "name must not exceed {} characters",
            MAX_JOB_NAME_LEN
        )));
    }
    Ok(())
}

/// A single named unit of work
///
/// The name is immutable after creation. The status only ever moves
/// forward; once terminal, the job is never executed again.
pub struct Job {
    name: String,
    status: JobStatus,
    error: Option<String>,
    work: Box<dyn Work>,
}

impl Job {
    /// Create a job in the `Pending` state
    ///
    /// Fails with [`CoreError::InvalidJobName`] if the name is empty or
    /// longer than [`MAX_JOB_NAME_LEN`] characters.
    pub fn new(name: impl Into<String>, work: impl Work + 'static) -> Result<Self, CoreError> {
        let name = name.into();
        validate_job_name(&name)?;
        Ok(Self {
            name,
            status: JobStatus::Pending,
            error: None,
            work: Box::new(work),
        })
    }

    /// Create a job whose work completes immediately
    pub fn no_op(name: impl Into<String>) -> Result<Self, CoreError> {
        Self::new(name, NoopWork)
    }

    /// Job name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Failure detail, set only when the job is `Failed`
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Execute the unit of work
    ///
    /// Valid only from `Pending`: transitions to `Running`, performs the
    /// work, then lands in `Completed` or `Failed` (capturing the error
    /// detail). When `job_timeout` is given and the work outlives it, the
    /// job is forced to `Failed` with a timeout error rather than left
    /// `Running`.
    ///
    /// Calling this on a job that is not `Pending` fails with
    /// [`CoreError::InvalidStateTransition`] and leaves the job unchanged.
    pub async fn execute(&mut self, job_timeout: Option<Duration>) -> Result<JobStatus, CoreError> {
        if self.status != JobStatus::Pending {
            return Err(CoreError::InvalidStateTransition {
                name: self.name.clone(),
                status: self.status,
            });
        }

        self.status = JobStatus::Running;
        debug!("Job '{}' running", self.name);

        let outcome = match job_timeout {
            Some(limit) => match timeout(limit, self.work.perform()).await {
                Ok(result) => result.map_err(|e| CoreError::Execution(e.to_string())),
                Err(_) => Err(CoreError::Timeout(limit.as_secs())),
            },
            None => self
                .work
                .perform()
                .await
                .map_err(|e| CoreError::Execution(e.to_string())),
        };

        match outcome {
            Ok(()) => {
                self.status = JobStatus::Completed;
                debug!("Job '{}' completed", self.name);
            }
            Err(e) => {
                warn!("Job '{}' failed: {}", self.name, e);
                self.status = JobStatus::Failed;
                self.error = Some(e.to_string());
            }
        }

        Ok(self.status)
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("status", &self.status)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
