//! Host platform detection
//!
//! The platform is resolved once when a [`crate::HostNetwork`] is built and
//! selects which enumerator/configurator pair is used for its lifetime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NetifError;

/// Platform families with distinct command sets
///
/// Deserializes through [`FromStr`], so config files may name the OS
/// (`darwin`, `win32`, `freebsd`) rather than the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Platform {
    /// Linux: ifconfig/route for discovery, iproute2 for secondary addresses
    Linux,
    /// Windows: netsh
    Windows,
    /// Any other Unix (macOS, the BSDs, QNAP firmware without iproute2)
    Unix,
}

impl Platform {
    /// Platform of the running binary
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Unix
        }
    }

    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::Unix => "unix",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = NetifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "windows" | "win32" => Ok(Platform::Windows),
            "unix" | "macos" | "darwin" | "freebsd" | "openbsd" | "netbsd" => Ok(Platform::Unix),
            other => Err(NetifError::Config(format!("unknown platform '{}'", other))),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = NetifError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
