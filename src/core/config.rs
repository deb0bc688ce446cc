//! Configuration: environment-derived settings and pipeline definitions

use crate::core::{job::validate_job_name, job::Job, pipeline::Pipeline};
use crate::execution::CommandWork;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Process-level settings read from the environment
///
/// The execution core never reads these directly; anything it needs (the
/// per-job timeout) is injected through the executor's constructor.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Debug mode flag (`DEBUG`)
    pub debug: bool,

    /// Log verbosity (`LOG_LEVEL`)
    pub log_level: String,

    /// Application version string (`APP_VERSION`)
    pub app_version: String,

    /// API key for outward-facing collaborators (`API_KEY`)
    pub api_key: String,

    /// Database URL, if configured (`DATABASE_URL`)
    pub database_url: Option<String>,

    /// Per-job timeout in seconds (`JOB_TIMEOUT_SECS`), unset = no limit
    pub job_timeout_secs: Option<u64>,
}

impl Settings {
    /// Read settings from the environment, with defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            debug: std::env::var("DEBUG")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            app_version: std::env::var("APP_VERSION").unwrap_or_else(|_| "0.0.0".to_string()),
            api_key: std::env::var("API_KEY").unwrap_or_else(|_| "your_api_key_here".to_string()),
            database_url: std::env::var("DATABASE_URL").ok(),
            job_timeout_secs: std::env::var("JOB_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// The per-job timeout as a duration, if configured
    pub fn job_timeout(&self) -> Option<Duration> {
        self.job_timeout_secs.map(Duration::from_secs)
    }
}

/// Top-level pipeline definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Definition version (optional)
    #[serde(default)]
    pub version: Option<String>,

    /// Jobs, in execution order
    pub jobs: Vec<JobConfig>,

    /// Per-job timeout override (in seconds)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Job definition as written in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Job name
    pub name: String,

    /// Shell command this job runs
    pub command: String,

    /// Optional human-readable description
    #[serde(default)]
    pub description: Option<String>,
}

impl PipelineConfig {
    /// Parse a pipeline definition from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).context("Failed to parse pipeline YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a pipeline definition from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline file: {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("pipeline name must not be empty");
        }
        for job in &self.jobs {
            validate_job_name(&job.name)
                .with_context(|| format!("invalid job definition '{}'", job.name))?;
            if job.command.trim().is_empty() {
                anyhow::bail!("job '{}' has an empty command", job.name);
            }
        }
        Ok(())
    }

    /// Build a runnable pipeline of command jobs from this definition
    pub fn to_pipeline(&self) -> Result<Pipeline> {
        let mut pipeline = Pipeline::new(&self.name);
        for job_config in &self.jobs {
            let work = CommandWork::new(&job_config.command);
            let job = Job::new(&job_config.name, work)?;
            pipeline.add_job(job)?;
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipeline_config() {
        let yaml = r#"
name: "release"
jobs:
  - name: "build"
    command: "cargo build --release"
  - name: "package"
    command: "tar czf release.tgz target/release"
timeout_secs: 120
"#;
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, "release");
        assert_eq!(config.jobs.len(), 2);
        assert_eq!(config.timeout_secs, Some(120));

        let pipeline = config.to_pipeline().unwrap();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.jobs()[0].name(), "build");
    }

    #[test]
    fn test_empty_job_name_rejected() {
        let yaml = r#"
name: "bad"
jobs:
  - name: ""
    command: "true"
"#;
        assert!(PipelineConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_empty_command_rejected() {
        let yaml = r#"
name: "bad"
jobs:
  - name: "noop"
    command: "  "
"#;
        assert!(PipelineConfig::from_yaml(yaml).is_err());
    }
}
