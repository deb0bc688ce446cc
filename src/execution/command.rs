//! Shell command work - runs a job's command as a subprocess

use crate::core::Work;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

/// Work that runs a shell command
///
/// The command is passed to `sh -c` and succeeds when it exits with
/// status zero. The executor's per-job timeout bounds the whole run;
/// `kill_on_drop` ensures a timed-out subprocess does not linger.
#[derive(Debug, Clone)]
pub struct CommandWork {
    command: String,
}

impl CommandWork {
    /// Create work for a shell command
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The shell command this work runs
    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl Work for CommandWork {
    async fn perform(&self) -> anyhow::Result<()> {
        debug!("Spawning shell command: {}", self.command);

        let output = Command::new("sh")
            .args(["-c", &self.command])
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| anyhow::anyhow!("failed to spawn command: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            warn!(
                "Command exited with code {}: {}",
                exit_code,
                stderr.trim()
            );
            anyhow::bail!("command exited with code {}: {}", exit_code, stderr.trim());
        }

        debug!(
            "Command produced {} bytes of output",
            output.stdout.len()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_command_success() {
        let work = CommandWork::new("true");
        assert!(work.perform().await.is_ok());
    }

    #[tokio::test]
    async fn test_command_failure_reports_exit_code() {
        let work = CommandWork::new("echo boom >&2; exit 3");
        let err = work.perform().await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("code 3"));
        assert!(msg.contains("boom"));
    }
}
