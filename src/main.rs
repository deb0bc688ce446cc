use anyhow::{Context, Result};
use jobline::cli::commands::{RunCommand, StatusCommand, ValidateCommand};
use jobline::cli::output::*;
use jobline::cli::{Cli, Command};
use jobline::{AggregateStatus, Executor, PipelineConfig, Registry, Settings};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();
    let settings = Settings::from_env();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::from_str(&settings.log_level).unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd, &settings).await?,
        Command::Validate(cmd) => validate_pipeline(cmd)?,
        Command::Status(cmd) => show_status(cmd)?,
    }

    Ok(())
}

async fn run_pipeline(cmd: &RunCommand, settings: &Settings) -> Result<()> {
    let config = PipelineConfig::from_file(&cmd.file)
        .context("Failed to load pipeline definition")?;

    println!("{} Loaded pipeline: {}", INFO, style(&config.name).bold());

    let pipeline = config.to_pipeline()?;

    // Timeout precedence: flag, then definition, then environment
    let job_timeout = cmd
        .timeout_secs
        .or(config.timeout_secs)
        .map(Duration::from_secs)
        .or_else(|| settings.job_timeout());

    let executor = Arc::new(Executor::with_timeout(job_timeout));
    let registry = Registry::new(executor);
    let name = config.name.clone();
    registry.insert_pipeline(pipeline).await?;

    println!();
    let status = registry.run(&name).await?;

    // Per-job report
    for report in registry.pipeline_report(&name).await? {
        println!("{}", format_job_report(&report));
    }

    if cmd.json {
        let reports = registry.pipeline_report(&name).await?;
        let summary = registry.run_summary(&name).await?;
        let data = serde_json::json!({
            "pipeline": name,
            "status": status,
            "jobs": reports,
            "summary": summary,
        });
        println!("\n{}", serde_json::to_string_pretty(&data)?);
    }

    match registry.run_summary(&name).await? {
        Some(summary) => println!("\n{}", format_run_summary(&summary)),
        None => println!(
            "\n{} {} - {}",
            WARN,
            style(&name).bold(),
            format_aggregate(status)
        ),
    }

    if !matches!(
        status,
        AggregateStatus::Completed | AggregateStatus::Empty
    ) {
        std::process::exit(1);
    }

    Ok(())
}

fn validate_pipeline(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline definition...", INFO);

    match PipelineConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Pipeline definition is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Jobs: {}", style(config.jobs.len()).cyan());
            if let Some(timeout) = config.timeout_secs {
                println!("  Job timeout: {}", style(format!("{}s", timeout)).cyan());
            }

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

fn show_status(cmd: &StatusCommand) -> Result<()> {
    let config = PipelineConfig::from_file(&cmd.file)
        .context("Failed to load pipeline definition")?;

    println!("{} {} would run:", INFO, style(&config.name).bold());
    for (position, job) in config.jobs.iter().enumerate() {
        match &job.description {
            Some(description) => println!(
                "  {}. {} - {} ({})",
                position + 1,
                style(&job.name).bold(),
                style(&job.command).dim(),
                description
            ),
            None => println!(
                "  {}. {} - {}",
                position + 1,
                style(&job.name).bold(),
                style(&job.command).dim()
            ),
        }
    }

    Ok(())
}
