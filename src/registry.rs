//! Registry of named pipelines
//!
//! Replaces ad-hoc global maps with an explicit, lock-guarded object that
//! owns the pipelines for a process. Callers create pipelines by name,
//! append jobs, trigger runs, and query job status back out.

use crate::core::{AggregateStatus, CoreError, Job, JobStatus, Pipeline, RunSummary};
use crate::execution::Executor;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

/// Errors raised by registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Creating a pipeline under a name already in use is a conflict,
    /// never a silent overwrite
    #[error("pipeline '{0}' already exists")]
    PipelineExists(String),

    #[error("pipeline '{0}' not found")]
    UnknownPipeline(String),

    #[error("job '{0}' not found")]
    UnknownJob(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Status snapshot for a single job, as rendered back to callers
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub name: String,
    pub status: JobStatus,
    pub error: Option<String>,
}

/// A pipeline entry, lockable independently of the registry map
///
/// The registry lock is only ever held to resolve or update the maps;
/// a run locks just its own pipeline, so operations on other pipelines
/// proceed while it is in flight.
type PipelineHandle = Arc<Mutex<Pipeline>>;

struct RegistryInner {
    pipelines: HashMap<String, PipelineHandle>,
    /// Job name → owning pipeline; with duplicate names across pipelines,
    /// the most recently added job wins
    job_index: HashMap<String, String>,
}

/// Process-scoped collection of pipelines with a shared executor
pub struct Registry {
    executor: Arc<Executor>,
    inner: RwLock<RegistryInner>,
}

impl Registry {
    /// Create a registry that runs its pipelines on `executor`
    pub fn new(executor: Arc<Executor>) -> Self {
        Self {
            executor,
            inner: RwLock::new(RegistryInner {
                pipelines: HashMap::new(),
                job_index: HashMap::new(),
            }),
        }
    }

    /// Create an empty pipeline under `name`
    pub async fn create_pipeline(&self, name: &str) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().await;
        if inner.pipelines.contains_key(name) {
            return Err(RegistryError::PipelineExists(name.to_string()));
        }
        info!("Created pipeline '{}'", name);
        inner.pipelines.insert(
            name.to_string(),
            Arc::new(Mutex::new(Pipeline::new(name))),
        );
        Ok(())
    }

    /// Register a pre-built pipeline (e.g. loaded from a definition file)
    pub async fn insert_pipeline(&self, pipeline: Pipeline) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().await;
        let name = pipeline.name().to_string();
        if inner.pipelines.contains_key(&name) {
            return Err(RegistryError::PipelineExists(name));
        }
        for job in pipeline.jobs() {
            inner
                .job_index
                .insert(job.name().to_string(), name.clone());
        }
        info!("Registered pipeline '{}' ({} jobs)", name, pipeline.len());
        inner
            .pipelines
            .insert(name, Arc::new(Mutex::new(pipeline)));
        Ok(())
    }

    async fn pipeline_handle(&self, name: &str) -> Result<PipelineHandle, RegistryError> {
        let inner = self.inner.read().await;
        inner
            .pipelines
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownPipeline(name.to_string()))
    }

    /// Append a job to a pipeline
    pub async fn add_job(&self, pipeline_name: &str, job: Job) -> Result<(), RegistryError> {
        let handle = self.pipeline_handle(pipeline_name).await?;
        let job_name = job.name().to_string();
        {
            let mut pipeline = handle.lock().await;
            pipeline.add_job(job)?;
        }
        let mut inner = self.inner.write().await;
        inner
            .job_index
            .insert(job_name, pipeline_name.to_string());
        Ok(())
    }

    /// Run a pipeline, returning its aggregate status
    ///
    /// Only the pipeline being run is locked for the duration; runs of
    /// distinct pipelines proceed concurrently on the shared executor,
    /// and status lookups contend only with the pipeline they ask about.
    pub async fn run(&self, pipeline_name: &str) -> Result<AggregateStatus, RegistryError> {
        let handle = self.pipeline_handle(pipeline_name).await?;
        let mut pipeline = handle.lock().await;
        Ok(self.executor.run(&mut pipeline).await)
    }

    /// Look up a job's status and failure detail by name
    pub async fn job_status(&self, job_name: &str) -> Result<JobReport, RegistryError> {
        let handle = {
            let inner = self.inner.read().await;
            inner
                .job_index
                .get(job_name)
                .and_then(|pipeline_name| inner.pipelines.get(pipeline_name))
                .cloned()
                .ok_or_else(|| RegistryError::UnknownJob(job_name.to_string()))?
        };
        let pipeline = handle.lock().await;
        let job = pipeline
            .job(job_name)
            .ok_or_else(|| RegistryError::UnknownJob(job_name.to_string()))?;
        Ok(JobReport {
            name: job.name().to_string(),
            status: job.status(),
            error: job.error().map(str::to_string),
        })
    }

    /// Per-job status reports for a pipeline, in execution order
    pub async fn pipeline_report(
        &self,
        pipeline_name: &str,
    ) -> Result<Vec<JobReport>, RegistryError> {
        let handle = self.pipeline_handle(pipeline_name).await?;
        let pipeline = handle.lock().await;
        Ok(pipeline
            .jobs()
            .iter()
            .map(|job| JobReport {
                name: job.name().to_string(),
                status: job.status(),
                error: job.error().map(str::to_string),
            })
            .collect())
    }

    /// The recorded outcome of a pipeline's run, if it has finished one
    pub async fn run_summary(
        &self,
        pipeline_name: &str,
    ) -> Result<Option<RunSummary>, RegistryError> {
        let handle = self.pipeline_handle(pipeline_name).await?;
        let pipeline = handle.lock().await;
        Ok(pipeline.outcome().cloned())
    }

    /// Names of all registered pipelines
    pub async fn pipeline_names(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        let mut names: Vec<String> = inner.pipelines.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new(Arc::new(Executor::new()))
    }

    #[tokio::test]
    async fn test_duplicate_pipeline_is_conflict() {
        let registry = registry();
        registry.create_pipeline("deploy").await.unwrap();
        let result = registry.create_pipeline("deploy").await;
        assert!(matches!(result, Err(RegistryError::PipelineExists(_))));
    }

    #[tokio::test]
    async fn test_unknown_pipeline_errors() {
        let registry = registry();
        assert!(matches!(
            registry.run("ghost").await,
            Err(RegistryError::UnknownPipeline(_))
        ));
        assert!(matches!(
            registry.add_job("ghost", Job::no_op("j").unwrap()).await,
            Err(RegistryError::UnknownPipeline(_))
        ));
        assert!(matches!(
            registry.job_status("ghost-job").await,
            Err(RegistryError::UnknownJob(_))
        ));
    }

    #[tokio::test]
    async fn test_create_add_run_query_flow() {
        let registry = registry();
        registry.create_pipeline("ci").await.unwrap();
        registry
            .add_job("ci", Job::no_op("compile").unwrap())
            .await
            .unwrap();
        registry
            .add_job("ci", Job::no_op("test").unwrap())
            .await
            .unwrap();

        let status = registry.run("ci").await.unwrap();
        assert_eq!(status, AggregateStatus::Completed);

        let report = registry.job_status("compile").await.unwrap();
        assert_eq!(report.status, JobStatus::Completed);
        assert!(report.error.is_none());

        let summary = registry.run_summary("ci").await.unwrap().unwrap();
        assert_eq!(summary.total_jobs, 2);
        assert_eq!(summary.completed_jobs, 2);
    }

    #[tokio::test]
    async fn test_add_job_after_run_is_sealed() {
        let registry = registry();
        registry.create_pipeline("ci").await.unwrap();
        registry
            .add_job("ci", Job::no_op("only").unwrap())
            .await
            .unwrap();
        registry.run("ci").await.unwrap();

        let result = registry.add_job("ci", Job::no_op("late").unwrap()).await;
        assert!(matches!(
            result,
            Err(RegistryError::Core(CoreError::PipelineSealed(_)))
        ));
    }

    #[tokio::test]
    async fn test_job_name_collision_latest_wins() {
        let registry = registry();
        registry.create_pipeline("one").await.unwrap();
        registry.create_pipeline("two").await.unwrap();

        let failing = || -> anyhow::Result<()> { anyhow::bail!("nope") };
        registry
            .add_job("one", Job::no_op("shared").unwrap())
            .await
            .unwrap();
        registry
            .add_job("two", Job::new("shared", failing).unwrap())
            .await
            .unwrap();

        registry.run("one").await.unwrap();
        registry.run("two").await.unwrap();

        // The index points at the most recently added "shared"
        let report = registry.job_status("shared").await.unwrap();
        assert_eq!(report.status, JobStatus::Failed);
        assert!(report.error.unwrap().contains("nope"));
    }
}
