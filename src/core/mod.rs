//! Core domain models
//!
//! This module defines the fundamental data structures that represent
//! jobs, pipelines, and their lifecycle states.

pub mod config;
pub mod error;
pub mod job;
pub mod pipeline;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{JobConfig, PipelineConfig, Settings};
pub use error::CoreError;
pub use job::{Job, NoopWork, Work, MAX_JOB_NAME_LEN};
pub use pipeline::Pipeline;
pub use state::{AggregateStatus, JobStatus, RunSummary};
