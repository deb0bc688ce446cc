//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{RunCommand, StatusCommand, ValidateCommand};

/// A small job pipeline runner with failure isolation
#[derive(Debug, Parser, Clone)]
#[command(name = "jobline")]
#[command(version = "0.1.0")]
#[command(about = "Run pipelines of named jobs, in order, isolating failures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a pipeline from a definition file
    Run(RunCommand),

    /// Validate a pipeline definition
    Validate(ValidateCommand),

    /// Show the jobs a definition would run, without running them
    Status(StatusCommand),
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn from_args() -> Self {
        Self::parse()
    }
}
