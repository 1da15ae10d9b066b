//! netif - network interface inspection and configuration over CLI tools
//!
//! Shells out to the host's own tools (`ifconfig`, `ip`, `route`,
//! `netsh`) and parses their text into [`InterfaceDescriptor`]s. The same
//! tools, run through an [`Elevator`], change static/DHCP addressing and
//! add or remove secondary addresses.
//!
//! # Example
//!
//! ```rust,ignore
//! use netif::{HostNetwork, NetifConfig};
//!
//! let host = HostNetwork::new(NetifConfig::load()?);
//! for iface in host.enumerate().await? {
//!     println!("{} {:?}", iface.name, iface.ip);
//! }
//! host.add_secondary_ip("eth0", "10.0.0.5").await?;
//! ```

pub mod config;
pub mod configure;
pub mod dialect;
pub mod enumerate;
pub mod error;
pub mod interfaces_file;
pub mod logging;
pub mod platform;
pub mod runner;
pub mod types;

use std::sync::Arc;

pub use config::NetifConfig;
pub use configure::{Configurator, PosixConfigurator, WindowsConfigurator};
pub use dialect::Dialect;
pub use enumerate::{Enumerator, PosixEnumerator, WindowsEnumerator};
pub use error::{NetifError, NetifResult};
pub use interfaces_file::InterfacesFile;
pub use platform::Platform;
pub use runner::{CommandOutput, CommandRunner, Elevator, PrefixElevator, ShellRunner};
pub use types::{ConfigurationRequest, InterfaceDescription, InterfaceDescriptor};

/// Enumerator and configurator pair for one platform, chosen once at
/// construction
pub struct HostNetwork {
    platform: Platform,
    enumerator: Box<dyn Enumerator>,
    configurator: Box<dyn Configurator>,
}

impl HostNetwork {
    /// Build for the configured (or detected) platform using the system shell
    pub fn new(config: NetifConfig) -> Self {
        let platform = config.platform();
        let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::new());
        let elevator: Arc<dyn Elevator> = Arc::new(PrefixElevator::new(
            runner.clone(),
            config.commands.elevation_prefix.clone(),
        ));
        Self::with_runner(config, platform, runner, elevator)
    }

    /// Build with explicit collaborators
    pub fn with_runner(
        config: NetifConfig,
        platform: Platform,
        runner: Arc<dyn CommandRunner>,
        elevator: Arc<dyn Elevator>,
    ) -> Self {
        let timeout = config.commands.timeout();
        let (enumerator, configurator): (Box<dyn Enumerator>, Box<dyn Configurator>) =
            if platform.is_windows() {
                (
                    Box::new(WindowsEnumerator::new(runner, config.commands)),
                    Box::new(WindowsConfigurator::new(elevator, timeout)),
                )
            } else {
                (
                    Box::new(PosixEnumerator::new(runner, config.commands)),
                    Box::new(PosixConfigurator::new(
                        InterfacesFile::new(config.files.interfaces),
                        elevator,
                        platform,
                        timeout,
                    )),
                )
            };

        tracing::debug!(%platform, "host network ready");

        Self {
            platform,
            enumerator,
            configurator,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub async fn enumerate(&self) -> NetifResult<Vec<InterfaceDescriptor>> {
        self.enumerator.enumerate().await
    }

    pub async fn configure(&self, request: &ConfigurationRequest) -> NetifResult<()> {
        self.configurator.configure(request).await
    }

    pub async fn set_static(&self, name: &str, desc: &InterfaceDescription) -> NetifResult<()> {
        self.configurator.set_static(name, desc).await
    }

    pub async fn set_dhcp(&self, name: &str) -> NetifResult<()> {
        self.configurator.set_dhcp(name).await
    }

    pub async fn add_secondary_ip(&self, name: &str, ip: &str) -> NetifResult<()> {
        self.configurator.add_secondary_ip(name, ip).await
    }

    pub async fn remove_secondary_ip(&self, name: &str, ip: &str) -> NetifResult<()> {
        self.configurator.remove_secondary_ip(name, ip).await
    }
}
