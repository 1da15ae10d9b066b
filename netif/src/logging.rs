//! Tracing setup for the `netifctl` and `netif-mcp` binaries
//!
//! Logs always go to stderr. stdout carries interface JSON for the CLI and
//! the protocol stream for the MCP server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output layer
pub const LOG_FORMAT_ENV_VAR: &str = "LOG_FORMAT";

/// Target of the library's own events
const LIBRARY_TARGET: &str = "netif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV_VAR)
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    fn from_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Filter used when `RUST_LOG` is unset or blank.
///
/// Binaries log through their own target, but the interesting events
/// (dialect detection, skipped lookups, failed commands) come from the
/// library, so both targets are enabled.
fn default_filter(binary: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    if binary == LIBRARY_TARGET {
        format!("{LIBRARY_TARGET}={level}")
    } else {
        format!("{LIBRARY_TARGET}={level},{binary}={level}")
    }
}

/// `RUST_LOG` replaces the defaults outright instead of being merged with them
fn filter_spec(binary: &str, verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(spec) if !spec.is_empty() => spec.to_string(),
        _ => default_filter(binary, verbose),
    }
}

/// Install the global subscriber for `binary` (its tracing target name).
///
/// Fails if a subscriber is already installed or `RUST_LOG` does not parse.
pub fn init_tracing(binary: &str, verbose: bool) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(filter_spec(binary, verbose, rust_log.as_deref()))?;
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?,
    }

    Ok(())
}
