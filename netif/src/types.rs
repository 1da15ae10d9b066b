//! Interface descriptors and configuration requests

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::error::{NetifError, NetifResult};

// ============================================================================
// Enumeration Output
// ============================================================================

/// One network interface as reported by the host's CLI tools
///
/// Built fresh on every enumeration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    /// Platform-native name (e.g. "eth0", "en0", "Local Area Connection")
    pub name: String,
    /// Primary IPv4 address
    pub ip: Option<String>,
    /// Netmask as a dotted quad
    pub netmask: Option<String>,
    /// Broadcast address (computed on Windows)
    pub broadcast: Option<String>,
    /// Hardware address, six colon-separated octets
    pub mac: Option<String>,
    /// Default gateway from the routing table
    pub gateway: Option<String>,
    /// Addresses bound to the interface in CIDR notation
    pub ip_addresses: Vec<String>,
}

impl InterfaceDescriptor {
    /// Descriptor carrying only a name; every other field absent
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: None,
            netmask: None,
            broadcast: None,
            mac: None,
            gateway: None,
            ip_addresses: Vec::new(),
        }
    }
}

// ============================================================================
// Configuration Input
// ============================================================================

/// Desired configuration of a single interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescription {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub netmask: Option<String>,
    #[serde(default)]
    pub gateway: Option<String>,
    #[serde(default)]
    pub dhcp: bool,
}

impl InterfaceDescription {
    pub fn dhcp() -> Self {
        Self {
            dhcp: true,
            ..Default::default()
        }
    }

    pub fn static_address(
        ip: impl Into<String>,
        netmask: impl Into<String>,
        gateway: Option<String>,
    ) -> Self {
        Self {
            ip: Some(ip.into()),
            netmask: Some(netmask.into()),
            gateway,
            dhcp: false,
        }
    }

    /// Check every present address and, for static configs, that ip and
    /// netmask are both given.
    pub fn validate(&self) -> NetifResult<()> {
        for (field, value) in [
            ("ip", &self.ip),
            ("netmask", &self.netmask),
            ("gateway", &self.gateway),
        ] {
            if let Some(v) = value {
                validate_ipv4(field, v)?;
            }
        }

        if !self.dhcp && (self.ip.is_none() || self.netmask.is_none()) {
            return Err(NetifError::InvalidRequest(
                "static configuration requires ip and netmask".to_string(),
            ));
        }

        Ok(())
    }
}

/// Transient input to the configurator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRequest {
    pub name: String,
    pub description: InterfaceDescription,
}

impl ConfigurationRequest {
    pub fn new(name: impl Into<String>, description: InterfaceDescription) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Reject anything that is not a dotted-quad IPv4 address
pub fn validate_ipv4(field: &str, value: &str) -> NetifResult<Ipv4Addr> {
    value.parse::<Ipv4Addr>().map_err(|_| {
        NetifError::InvalidRequest(format!("{} '{}' is not an IPv4 address", field, value))
    })
}

/// Reject interface names that could not have come from the OS tools.
///
/// POSIX names go unquoted into shell command lines, so their alphabet is
/// narrow. Windows names are free-form friendly names such as
/// `vEthernet (Default Switch)` and are always wrapped in double quotes, so
/// only the quote itself and the characters cmd expands inside quotes are
/// refused.
pub fn validate_interface_name(name: &str, windows: bool) -> NetifResult<()> {
    if name.trim().is_empty() {
        return Err(NetifError::InvalidRequest(
            "interface name cannot be empty".to_string(),
        ));
    }

    let valid = if windows {
        name.chars()
            .all(|c| !c.is_control() && !matches!(c, '"' | '%' | '^' | '&' | '|' | '<' | '>'))
    } else {
        name.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '@' | '-'))
    };

    if !valid {
        return Err(NetifError::InvalidRequest(format!(
            "interface name '{}' contains unsupported characters",
            name
        )));
    }

    Ok(())
}
