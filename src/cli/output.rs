//! CLI output formatting

use crate::core::{AggregateStatus, JobStatus, RunSummary};
use crate::registry::JobReport;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

/// Format a job status for display
pub fn format_job_status(status: JobStatus) -> String {
    match status {
        JobStatus::Pending => style("PENDING").dim().to_string(),
        JobStatus::Running => style("RUNNING").yellow().to_string(),
        JobStatus::Completed => style("COMPLETED").green().to_string(),
        JobStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format an aggregate status for display
pub fn format_aggregate(status: AggregateStatus) -> String {
    match status {
        AggregateStatus::Empty => style("EMPTY").dim().to_string(),
        AggregateStatus::Completed => style("COMPLETED").green().to_string(),
        AggregateStatus::PartiallyFailed => style("PARTIALLY FAILED").yellow().to_string(),
        AggregateStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format one line of the per-job report
pub fn format_job_report(report: &JobReport) -> String {
    let icon = match report.status {
        JobStatus::Completed => CHECK,
        JobStatus::Failed => CROSS,
        _ => INFO,
    };
    match &report.error {
        Some(error) => format!(
            "{}{} - {} ({})",
            icon,
            style(&report.name).bold(),
            format_job_status(report.status),
            style(error).red()
        ),
        None => format!(
            "{}{} - {}",
            icon,
            style(&report.name).bold(),
            format_job_status(report.status)
        ),
    }
}

/// Format the run summary footer
pub fn format_run_summary(summary: &RunSummary) -> String {
    let duration = summary
        .duration()
        .map(format_duration)
        .unwrap_or_else(|| "?".to_string());
    format!(
        "{} - {} ({}/{} jobs completed in {})",
        style(&summary.pipeline_name).bold(),
        format_aggregate(summary.status),
        summary.completed_jobs,
        summary.total_jobs,
        style(duration).dim()
    )
}

/// Format a duration as h/m/s
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
