//! Configuration loading
//!
//! Config is searched in order:
//! 1. `NETIF_CONFIG_PATH` env var
//! 2. `./netif.toml`
//! 3. `$XDG_CONFIG_HOME/netif/config.toml`
//! 4. `~/.netif.toml`
//! 5. Default config if none found

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{NetifError, NetifResult};
use crate::platform::Platform;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "NETIF_CONFIG_PATH";

/// Placeholder substituted with the interface name in lookup templates
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetifConfig {
    /// Force a platform instead of detecting it from the build target
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub commands: CommandConfig,
    #[serde(default)]
    pub files: FileConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Deadline for every external command, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Interface discovery on POSIX hosts
    #[serde(default = "default_discovery")]
    pub discovery: String,

    /// Routing table dump used to resolve the gateway
    #[serde(default = "default_routes")]
    pub routes: String,

    /// Per-interface address lookup; `{name}` is replaced by the interface
    /// name. Unset or empty disables the lookup.
    #[serde(default = "default_secondary_lookup")]
    pub secondary_lookup: Option<String>,

    /// Interface discovery on Windows
    #[serde(default = "default_windows_discovery")]
    pub windows_discovery: String,

    /// Prepended to commands that change OS state (e.g. "sudo")
    #[serde(default = "default_elevation_prefix")]
    pub elevation_prefix: Option<String>,
}

fn default_timeout() -> u64 {
    10
}

fn default_discovery() -> String {
    if cfg!(target_os = "linux") {
        "ifconfig -a".to_string()
    } else {
        "ifconfig".to_string()
    }
}

fn default_routes() -> String {
    if cfg!(target_os = "linux") {
        "route -n".to_string()
    } else {
        "netstat -rn".to_string()
    }
}

fn default_secondary_lookup() -> Option<String> {
    if cfg!(target_os = "linux") {
        Some(format!("ip addr show {}", NAME_PLACEHOLDER))
    } else {
        None
    }
}

fn default_windows_discovery() -> String {
    "netsh interface ipv4 show config".to_string()
}

fn default_elevation_prefix() -> Option<String> {
    if cfg!(target_os = "windows") {
        None
    } else {
        Some("sudo".to_string())
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            discovery: default_discovery(),
            routes: default_routes(),
            secondary_lookup: default_secondary_lookup(),
            windows_discovery: default_windows_discovery(),
            elevation_prefix: default_elevation_prefix(),
        }
    }
}

impl CommandConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Secondary lookup command for one interface, if enabled
    pub fn secondary_lookup_for(&self, name: &str) -> Option<String> {
        self.secondary_lookup
            .as_deref()
            .filter(|template| !template.trim().is_empty())
            .map(|template| template.replace(NAME_PLACEHOLDER, name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Debian-style interfaces file rewritten by static/DHCP configuration
    #[serde(default = "default_interfaces_file")]
    pub interfaces: PathBuf,
}

fn default_interfaces_file() -> PathBuf {
    PathBuf::from("/etc/network/interfaces")
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            interfaces: default_interfaces_file(),
        }
    }
}

impl NetifConfig {
    /// Load config from standard file locations, falling back to defaults
    pub fn load() -> NetifResult<Self> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(&env_path);
            if path.exists() {
                let config = Self::load_from_path(&path)?;
                tracing::info!("Loaded config from {}={}", CONFIG_ENV_VAR, path.display());
                return Ok(config);
            }
            tracing::warn!("{}={} does not exist", CONFIG_ENV_VAR, env_path);
        }

        let mut config_paths = vec![PathBuf::from("netif.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("netif").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            config_paths.push(home.join(".netif.toml"));
        }

        for path in config_paths {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!("Skipping config {}: {}", path.display(), e);
                }
            }
        }

        tracing::debug!("Using default configuration");
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> NetifResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| NetifError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
            .map_err(|e| NetifError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> NetifResult<Self> {
        toml::from_str(content).map_err(|e| NetifError::Config(e.to_string()))
    }

    /// Configured platform override, or the build target's platform
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }
}
