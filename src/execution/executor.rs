//! Pipeline executor - drives runs, aggregates results, isolates failures

use crate::core::{AggregateStatus, JobStatus, Pipeline, RunSummary};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

/// Drives pipeline runs and aggregates per-job terminal results
///
/// Long-lived and process-scoped: one executor may run many pipelines over
/// its lifetime, sequentially or concurrently, accumulating results across
/// them. The results map holds only jobs that reached a terminal state;
/// on name collisions the last write wins.
pub struct Executor {
    results: Mutex<HashMap<String, JobStatus>>,
    job_timeout: Option<Duration>,
}

impl Executor {
    /// Create an executor with no per-job timeout
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// Create an executor that bounds each job's work by `job_timeout`
    pub fn with_timeout(job_timeout: Option<Duration>) -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
            job_timeout,
        }
    }

    /// Run a pipeline's jobs in insertion order
    ///
    /// Seals the pipeline, then executes each job. One job's failure never
    /// aborts the run; the failure is recorded and the next job executes.
    /// Running an already-run pipeline is idempotent: the recorded
    /// aggregate is returned without re-executing any job.
    pub async fn run(&self, pipeline: &mut Pipeline) -> AggregateStatus {
        let never_cancelled = AtomicBool::new(false);
        // The flag is never set, so the run always finishes
        let (status, _interrupted) = self.drive(pipeline, &never_cancelled).await;
        status
    }

    /// Run a pipeline with cooperative cancellation
    ///
    /// The flag is checked between jobs: a job already running finishes or
    /// times out on its own schedule, and remaining jobs are left
    /// `Pending`. A cancelled run returns `None` and records no outcome,
    /// so a later `run` picks up the pending jobs (jobs already terminal
    /// are skipped). A run that finishes before the flag is observed
    /// returns its aggregate as usual.
    pub async fn run_cancellable(
        &self,
        pipeline: &mut Pipeline,
        cancelled: &AtomicBool,
    ) -> Option<AggregateStatus> {
        let (status, interrupted) = self.drive(pipeline, cancelled).await;
        if interrupted {
            None
        } else {
            Some(status)
        }
    }

    async fn drive(
        &self,
        pipeline: &mut Pipeline,
        cancelled: &AtomicBool,
    ) -> (AggregateStatus, bool) {
        if let Some(summary) = pipeline.outcome() {
            info!(
                "Pipeline '{}' already ran ({}), returning recorded outcome",
                pipeline.name(),
                summary.run_id
            );
            return (summary.status, false);
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let pipeline_name = pipeline.name().to_string();

        pipeline.seal();
        info!(
            "Starting pipeline run: {} ({}, {} jobs)",
            pipeline_name,
            run_id,
            pipeline.len()
        );

        let mut interrupted = false;
        for job in pipeline.jobs_mut() {
            // Already terminal from a previous (cancelled) run
            if job.status().is_terminal() {
                continue;
            }

            if cancelled.load(Ordering::SeqCst) {
                interrupted = true;
                break;
            }

            match job.execute(self.job_timeout).await {
                Ok(terminal) => {
                    let mut results = self.results.lock().await;
                    results.insert(job.name().to_string(), terminal);
                }
                Err(e) => {
                    // Only reachable if the job was transitioned out of band
                    warn!("Skipping job '{}': {}", job.name(), e);
                }
            }
        }

        let completed_jobs = pipeline
            .jobs()
            .iter()
            .filter(|j| j.status() == JobStatus::Completed)
            .count();
        let failed_jobs = pipeline
            .jobs()
            .iter()
            .filter(|j| j.status() == JobStatus::Failed)
            .count();
        let status = AggregateStatus::from_counts(completed_jobs, failed_jobs);

        if interrupted {
            let pending = pipeline.len() - completed_jobs - failed_jobs;
            info!(
                "Pipeline run cancelled: {} ({} jobs left pending)",
                pipeline_name, pending
            );
            return (status, true);
        }

        pipeline.set_outcome(RunSummary {
            run_id,
            pipeline_name: pipeline_name.clone(),
            status,
            started_at,
            finished_at: Utc::now(),
            completed_jobs,
            failed_jobs,
            total_jobs: pipeline.len(),
        });

        info!(
            "Pipeline run finished: {} - {:?} ({} completed, {} failed)",
            pipeline_name, status, completed_jobs, failed_jobs
        );

        (status, false)
    }

    /// Terminal status recorded for a job, if it has reached one
    pub async fn job_result(&self, name: &str) -> Option<JobStatus> {
        let results = self.results.lock().await;
        results.get(name).copied()
    }

    /// Snapshot of all recorded terminal results
    pub async fn results(&self) -> HashMap<String, JobStatus> {
        let results = self.results.lock().await;
        results.clone()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}
