//! Error types for the execution core

use crate::core::state::JobStatus;
use thiserror::Error;

/// Errors raised by jobs, pipelines, and the executor
#[derive(Debug, Error)]
pub enum CoreError {
    /// Job name failed validation (empty or over the length limit)
    #[error("invalid job name: {0}")]
    InvalidJobName(String),

    /// A job was asked to execute while not in `Pending`
    #[error("invalid state transition: job '{name}' is {status:?}, expected Pending")]
    InvalidStateTransition { name: String, status: JobStatus },

    /// A job was appended after the pipeline's run had started
    #[error("pipeline '{0}' is sealed, no further jobs may be added")]
    PipelineSealed(String),

    /// The job's unit of work exceeded its allotted time
    #[error("timed out after {0} seconds")]
    Timeout(u64),

    /// Whatever the unit of work itself raised
    #[error("execution error: {0}")]
    Execution(String),
}
