//! Shell-backed command runner
//!
//! Runs command lines through `sh -c` (or `cmd /C` on Windows) with a hard
//! deadline. A child that outlives its deadline is killed when dropped.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::{CommandOutput, CommandRunner};
use crate::error::{NetifError, NetifResult};

/// Runs commands through the platform shell
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    flag: String,
}

impl ShellRunner {
    /// Shell matching the build target
    pub fn new() -> Self {
        if cfg!(target_os = "windows") {
            Self::with_shell("cmd", "/C")
        } else {
            Self::with_shell("/bin/sh", "-c")
        }
    }

    pub fn with_shell(shell: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            flag: flag.into(),
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    #[instrument(skip(self, command, timeout), fields(cmd = %command))]
    async fn run(&self, command: &str, timeout: Duration) -> NetifResult<CommandOutput> {
        debug!("executing: {} {} {}", self.shell, self.flag, command);

        let mut cmd = Command::new(&self.shell);
        cmd.arg(&self.flag)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NetifError::NotFound(self.shell.clone())
            } else {
                NetifError::Spawn(e)
            }
        })?;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(io_err)) => return Err(NetifError::Spawn(io_err)),
            Err(_elapsed) => {
                error!(?timeout, "command timed out");
                return Err(NetifError::Timeout {
                    command: command.to_string(),
                    timeout,
                });
            }
        };

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };

        if !result.is_success() {
            error!(code = ?result.exit_code, stderr = %result.stderr.trim(), "command failed");
        }

        Ok(result)
    }
}
