//! Interface configuration
//!
//! State-changing commands always go through an [`Elevator`]. Their stderr
//! is classified so that the two conditions callers routinely hit (address
//! already present, address not present) come back as their own variants.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::error::{NetifError, NetifResult};
use crate::interfaces_file::InterfacesFile;
use crate::platform::Platform;
use crate::runner::{CommandOutput, Elevator};
use crate::types::{
    validate_interface_name, validate_ipv4, ConfigurationRequest, InterfaceDescription,
};

const LINUX_ONLY: &str = "Available only on Linux systems";
const WINDOWS_DHCP_UNSUPPORTED: &str = "DHCP configuration is not supported on Windows";

/// Prefix length used for secondary addresses
const SECONDARY_PREFIX: u8 = 24;

const FILE_EXISTS: &str = "file exists";
const CANNOT_ASSIGN: &str = "cannot assign";

/// Changes interface addressing
#[async_trait]
pub trait Configurator: Send + Sync {
    async fn set_static(&self, name: &str, desc: &InterfaceDescription) -> NetifResult<()>;

    async fn set_dhcp(&self, name: &str) -> NetifResult<()>;

    async fn add_secondary_ip(&self, name: &str, ip: &str) -> NetifResult<()>;

    async fn remove_secondary_ip(&self, name: &str, ip: &str) -> NetifResult<()>;

    /// Apply a full request, choosing DHCP or static from the description
    async fn configure(&self, request: &ConfigurationRequest) -> NetifResult<()> {
        if request.description.dhcp {
            self.set_dhcp(&request.name).await
        } else {
            self.set_static(&request.name, &request.description).await
        }
    }
}

// ============================================================================
// POSIX
// ============================================================================

/// Rewrites the interfaces file and runs `ip addr` for secondary addresses
pub struct PosixConfigurator {
    file: InterfacesFile,
    elevator: Arc<dyn Elevator>,
    platform: Platform,
    timeout: Duration,
}

impl PosixConfigurator {
    pub fn new(
        file: InterfacesFile,
        elevator: Arc<dyn Elevator>,
        platform: Platform,
        timeout: Duration,
    ) -> Self {
        Self {
            file,
            elevator,
            platform,
            timeout,
        }
    }

    fn require_linux(&self) -> NetifResult<()> {
        if self.platform == Platform::Linux {
            Ok(())
        } else {
            Err(NetifError::UnsupportedPlatform(LINUX_ONLY.to_string()))
        }
    }

    async fn ip_addr(&self, action: &str, name: &str, ip: &str) -> NetifResult<CommandOutput> {
        let command = format!("ip addr {action} {ip}/{SECONDARY_PREFIX} dev {name}");
        self.elevator.run_elevated(&command, self.timeout).await
    }
}

#[async_trait]
impl Configurator for PosixConfigurator {
    #[instrument(skip(self, desc))]
    async fn set_static(&self, name: &str, desc: &InterfaceDescription) -> NetifResult<()> {
        validate_interface_name(name, false)?;
        let desc = InterfaceDescription {
            dhcp: false,
            ..desc.clone()
        };
        desc.validate()?;

        self.file.apply(name, &desc).await?;
        info!("wrote static stanza to {}", self.file.path().display());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_dhcp(&self, name: &str) -> NetifResult<()> {
        validate_interface_name(name, false)?;

        self.file.apply(name, &InterfaceDescription::dhcp()).await?;
        info!("wrote dhcp stanza to {}", self.file.path().display());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_secondary_ip(&self, name: &str, ip: &str) -> NetifResult<()> {
        self.require_linux()?;
        validate_interface_name(name, false)?;
        validate_ipv4("ip", ip)?;

        let output = self.ip_addr("add", name, ip).await?;
        if output.is_success() {
            return Ok(());
        }
        if stderr_mentions(&output, FILE_EXISTS) {
            warn!("{} already assigned to {}", ip, name);
            return Err(NetifError::AlreadyAssigned {
                ip: ip.to_string(),
                interface: name.to_string(),
            });
        }
        Err(output.into_failure("ip addr add"))
    }

    #[instrument(skip(self))]
    async fn remove_secondary_ip(&self, name: &str, ip: &str) -> NetifResult<()> {
        self.require_linux()?;
        validate_interface_name(name, false)?;
        validate_ipv4("ip", ip)?;

        let output = self.ip_addr("delete", name, ip).await?;
        if output.is_success() {
            return Ok(());
        }
        if stderr_mentions(&output, CANNOT_ASSIGN) {
            warn!("{} not assigned to {}", ip, name);
            return Err(NetifError::NotAssigned {
                ip: ip.to_string(),
                interface: name.to_string(),
            });
        }
        Err(output.into_failure("ip addr delete"))
    }
}

fn stderr_mentions(output: &CommandOutput, needle: &str) -> bool {
    output.stderr.to_lowercase().contains(needle)
}

// ============================================================================
// Windows
// ============================================================================

/// Static addressing through `netsh`
pub struct WindowsConfigurator {
    elevator: Arc<dyn Elevator>,
    timeout: Duration,
}

impl WindowsConfigurator {
    pub fn new(elevator: Arc<dyn Elevator>, timeout: Duration) -> Self {
        Self { elevator, timeout }
    }
}

#[async_trait]
impl Configurator for WindowsConfigurator {
    #[instrument(skip(self, desc))]
    async fn set_static(&self, name: &str, desc: &InterfaceDescription) -> NetifResult<()> {
        validate_interface_name(name, true)?;
        let desc = InterfaceDescription {
            dhcp: false,
            ..desc.clone()
        };
        desc.validate()?;

        let ip = desc.ip.as_deref().unwrap_or_default();
        let netmask = desc.netmask.as_deref().unwrap_or_default();
        let mut command =
            format!("netsh interface ipv4 set address name=\"{name}\" static {ip} {netmask}");
        if let Some(gateway) = &desc.gateway {
            command.push(' ');
            command.push_str(gateway);
        }

        self.elevator
            .run_elevated(&command, self.timeout)
            .await?
            .into_stdout(&command)?;
        info!("set static address {} on {}", ip, name);
        Ok(())
    }

    async fn set_dhcp(&self, _name: &str) -> NetifResult<()> {
        Err(NetifError::UnsupportedPlatform(
            WINDOWS_DHCP_UNSUPPORTED.to_string(),
        ))
    }

    async fn add_secondary_ip(&self, _name: &str, _ip: &str) -> NetifResult<()> {
        Err(NetifError::UnsupportedPlatform(LINUX_ONLY.to_string()))
    }

    async fn remove_secondary_ip(&self, _name: &str, _ip: &str) -> NetifResult<()> {
        Err(NetifError::UnsupportedPlatform(LINUX_ONLY.to_string()))
    }
}
