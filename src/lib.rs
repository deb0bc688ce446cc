//! jobline - a small job pipeline runner with failure isolation

pub mod cli;
pub mod core;
pub mod execution;
pub mod registry;

// Re-export commonly used types
pub use core::{
    AggregateStatus, CoreError, Job, JobStatus, NoopWork, Pipeline, PipelineConfig, RunSummary,
    Settings, Work,
};
pub use execution::{CommandWork, Executor};
pub use registry::{JobReport, Registry, RegistryError};
