//! External command execution
//!
//! The library never constructs processes outside this module. Enumerators
//! and configurators only build command lines and hand them to a
//! [`CommandRunner`] (or an [`Elevator`] for state-changing commands).

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{NetifError, NetifResult};

mod elevate;
mod shell;

pub use elevate::PrefixElevator;
pub use shell::ShellRunner;

/// Captured result of one finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// Failed output with the given stderr and exit code
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(code),
        }
    }

    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// A command succeeded only if it exited zero and wrote nothing to stderr
    pub fn is_success(&self) -> bool {
        self.exited_cleanly() && self.stderr.trim().is_empty()
    }

    /// Return stdout, or the command failure if the command did not succeed
    pub fn into_stdout(self, command: &str) -> NetifResult<String> {
        if self.is_success() {
            Ok(self.stdout)
        } else {
            Err(self.into_failure(command))
        }
    }

    /// Convert this output into a `CommandFailed` error verbatim
    pub fn into_failure(self, command: &str) -> NetifError {
        NetifError::CommandFailed {
            command: command.to_string(),
            code: self.exit_code,
            stderr: self.stderr.trim().to_string(),
        }
    }
}

/// Executes one shell command line
///
/// Implementations return `Ok` for any command that ran to completion,
/// whatever its exit status, so callers can classify stderr themselves.
/// `Err` is reserved for commands that could not be started or that
/// exceeded `timeout`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str, timeout: Duration) -> NetifResult<CommandOutput>;
}

/// Executes a command with administrative privilege
#[async_trait]
pub trait Elevator: Send + Sync {
    async fn run_elevated(&self, command: &str, timeout: Duration) -> NetifResult<CommandOutput>;
}
