//! Pipeline domain model

use crate::core::{error::CoreError, job::Job, state::RunSummary};

/// An ordered, append-only-until-sealed collection of jobs
///
/// Insertion order is the execution order. Duplicate job names are
/// permitted at this layer; uniqueness of the pipeline name itself is the
/// registry's concern. A completed pipeline retains its jobs and their
/// final statuses for inspection.
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    jobs: Vec<Job>,
    sealed: bool,
    outcome: Option<RunSummary>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jobs: Vec::new(),
            sealed: false,
            outcome: None,
        }
    }

    /// Pipeline name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a job to the sequence
    ///
    /// Fails with [`CoreError::PipelineSealed`] once a run has started or
    /// finished; the sequence is left unchanged.
    pub fn add_job(&mut self, job: Job) -> Result<(), CoreError> {
        if self.sealed {
            return Err(CoreError::PipelineSealed(self.name.clone()));
        }
        self.jobs.push(job);
        Ok(())
    }

    /// Read-only view of the jobs, in execution order
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Look up a job by name
    ///
    /// With duplicate names, the most recently appended job wins.
    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().rev().find(|j| j.name() == name)
    }

    /// Number of jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the pipeline has zero jobs
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Whether a run has started (no further appends accepted)
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// The recorded outcome of a finished run, if any
    pub fn outcome(&self) -> Option<&RunSummary> {
        self.outcome.as_ref()
    }

    // The executor seals the pipeline at the start of a run and records
    // the outcome once the run finishes.

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    pub(crate) fn jobs_mut(&mut self) -> &mut [Job] {
        &mut self.jobs
    }

    pub(crate) fn set_outcome(&mut self, summary: RunSummary) {
        self.outcome = Some(summary);
    }
}
