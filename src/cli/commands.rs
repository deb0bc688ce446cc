//! CLI command definitions

use clap::Args;

/// Run a pipeline
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Per-job timeout in seconds (overrides the definition and environment)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output the final report in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Validate a pipeline definition
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output the parsed definition in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Show the jobs a definition would run
#[derive(Debug, Args, Clone)]
pub struct StatusCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,
}
