//! Interface enumeration
//!
//! Runs the discovery commands for the host platform and turns their
//! output into [`InterfaceDescriptor`]s. Every call takes a fresh snapshot;
//! nothing is cached between calls.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::CommandConfig;
use crate::dialect::{self, Dialect};
use crate::error::NetifResult;
use crate::runner::CommandRunner;
use crate::types::{validate_interface_name, InterfaceDescriptor};

/// Lists the host's network interfaces
#[async_trait]
pub trait Enumerator: Send + Sync {
    async fn enumerate(&self) -> NetifResult<Vec<InterfaceDescriptor>>;
}

// ============================================================================
// POSIX (ifconfig / ip + route)
// ============================================================================

pub struct PosixEnumerator {
    runner: Arc<dyn CommandRunner>,
    commands: CommandConfig,
}

impl PosixEnumerator {
    pub fn new(runner: Arc<dyn CommandRunner>, commands: CommandConfig) -> Self {
        Self { runner, commands }
    }

    async fn run(&self, command: &str) -> NetifResult<String> {
        self.runner
            .run(command, self.commands.timeout())
            .await?
            .into_stdout(command)
    }

    /// Replace each descriptor's address list with the per-interface lookup
    async fn fill_secondary_addresses(
        &self,
        interfaces: &mut [InterfaceDescriptor],
    ) -> NetifResult<()> {
        for iface in interfaces.iter_mut() {
            let Some(command) = self.commands.secondary_lookup_for(&iface.name) else {
                return Ok(());
            };
            if let Err(e) = validate_interface_name(&iface.name, false) {
                warn!("skipping address lookup for '{}': {}", iface.name, e);
                continue;
            }
            let output = self.run(&command).await?;
            iface.ip_addresses = dialect::iproute::secondary_addresses(&output);
        }
        Ok(())
    }
}

#[async_trait]
impl Enumerator for PosixEnumerator {
    #[instrument(skip(self), fields(discovery = %self.commands.discovery))]
    async fn enumerate(&self) -> NetifResult<Vec<InterfaceDescriptor>> {
        let discovery = self.run(&self.commands.discovery).await?;
        let routes = self.run(&self.commands.routes).await?;

        let gateway = dialect::route::gateway(&routes);
        debug!(gateway = ?gateway, "resolved default gateway");

        if discovery.trim().is_empty() {
            return Ok(Vec::new());
        }

        let dialect = Dialect::detect(&discovery).unwrap_or_else(|| {
            warn!("unrecognized discovery output, parsing as {}", Dialect::IfconfigBsd);
            Dialect::IfconfigBsd
        });

        let mut interfaces = dedupe(dialect.parse(&discovery)?);
        for iface in interfaces.iter_mut() {
            iface.gateway = gateway.clone();
        }

        self.fill_secondary_addresses(&mut interfaces).await?;

        debug!(%dialect, count = interfaces.len(), "enumerated interfaces");
        Ok(interfaces)
    }
}

// ============================================================================
// Windows (netsh)
// ============================================================================

pub struct WindowsEnumerator {
    runner: Arc<dyn CommandRunner>,
    commands: CommandConfig,
}

impl WindowsEnumerator {
    pub fn new(runner: Arc<dyn CommandRunner>, commands: CommandConfig) -> Self {
        Self { runner, commands }
    }
}

#[async_trait]
impl Enumerator for WindowsEnumerator {
    #[instrument(skip(self))]
    async fn enumerate(&self) -> NetifResult<Vec<InterfaceDescriptor>> {
        let command = &self.commands.windows_discovery;
        let output = self
            .runner
            .run(command, self.commands.timeout())
            .await?
            .into_stdout(command)?;

        let interfaces = dedupe(dialect::netsh::parse(output.trim())?);
        debug!(count = interfaces.len(), "enumerated interfaces");
        Ok(interfaces)
    }
}

/// Keep the first descriptor for each name
fn dedupe(interfaces: Vec<InterfaceDescriptor>) -> Vec<InterfaceDescriptor> {
    let mut seen = HashSet::new();
    interfaces
        .into_iter()
        .filter(|iface| {
            let first = seen.insert(iface.name.clone());
            if !first {
                warn!("duplicate interface '{}' in output, keeping the first", iface.name);
            }
            first
        })
        .collect()
}
