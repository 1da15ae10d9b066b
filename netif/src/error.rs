//! Error types for interface inspection and configuration
//!
//! Every failure the library can surface is one variant of [`NetifError`].
//! Nothing is retried: the first failure of any external command ends the
//! current operation.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while enumerating or configuring interfaces
#[derive(Error, Debug)]
pub enum NetifError {
    /// An external command exited non-zero or wrote to stderr
    #[error("command `{command}` failed (exit code {}): {stderr}", display_code(.code))]
    CommandFailed {
        /// The command line that was run
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
        /// Standard error output
        stderr: String,
    },

    /// An external command did not finish within its deadline
    #[error("command `{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// Failed to spawn the shell process
    #[error("failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),

    /// The shell used to run commands is not installed or not in PATH
    #[error("{0} not found - ensure it is installed and in PATH")]
    NotFound(String),

    /// Command output did not match the grammar of its dialect
    #[error("failed to parse command output: {0}")]
    Parse(String),

    /// The operation has no implementation on this platform
    #[error("{0}")]
    UnsupportedPlatform(String),

    /// `ip addr add` reported the address as already present
    #[error("IP address {ip} already assigned to {interface}")]
    AlreadyAssigned { ip: String, interface: String },

    /// `ip addr delete` reported the address as absent
    #[error("IP address {ip} not currently assigned to {interface}")]
    NotAssigned { ip: String, interface: String },

    /// The request was rejected before any command was built
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Reading or writing the interfaces file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be loaded
    #[error("config error: {0}")]
    Config(String),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none".to_string(),
    }
}

impl NetifError {
    /// True for outcomes where the OS reported a meaningful state rather
    /// than a malfunction (address already present / already absent).
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            NetifError::AlreadyAssigned { .. } | NetifError::NotAssigned { .. }
        )
    }
}

/// Result type alias for netif operations
pub type NetifResult<T> = Result<T, NetifError>;
