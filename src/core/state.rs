//! Execution state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a single job
///
/// Transitions are monotonic: `Pending` → `Running` → `Completed` | `Failed`.
/// A job never returns to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job has not started
    Pending,
    /// Job is currently executing its unit of work
    Running,
    /// Job finished successfully
    Completed,
    /// Job finished with an error (or timed out)
    Failed,
}

impl JobStatus {
    /// Check if the job is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Pipeline-level summary derived from its jobs' terminal states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateStatus {
    /// Pipeline had zero jobs — a legitimate terminal outcome, not an error
    Empty,
    /// Every job completed
    Completed,
    /// At least one job completed and at least one failed
    PartiallyFailed,
    /// Every job failed
    Failed,
}

impl AggregateStatus {
    /// Derive the aggregate from per-job completed/failed counts
    pub fn from_counts(completed: usize, failed: usize) -> Self {
        match (completed, failed) {
            (0, 0) => AggregateStatus::Empty,
            (_, 0) => AggregateStatus::Completed,
            (0, _) => AggregateStatus::Failed,
            _ => AggregateStatus::PartiallyFailed,
        }
    }
}

/// Record of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique run ID
    pub run_id: Uuid,

    /// Pipeline name
    pub pipeline_name: String,

    /// Aggregate outcome of the run
    pub status: AggregateStatus,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// Number of jobs that completed
    pub completed_jobs: usize,

    /// Number of jobs that failed
    pub failed_jobs: usize,

    /// Total number of jobs in the pipeline
    pub total_jobs: usize,
}

impl RunSummary {
    /// Run duration, if the timestamps are well ordered
    pub fn duration(&self) -> Option<std::time::Duration> {
        self.finished_at
            .signed_duration_since(self.started_at)
            .to_std()
            .ok()
    }
}
