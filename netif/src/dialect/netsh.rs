//! `netsh interface ipv4 show config` output
//!
//! ```text
//! Configuration for interface "Ethernet"
//!     DHCP enabled:                         Yes
//!     IP Address:                           192.168.1.50
//!     Subnet Prefix:                        192.168.1.0/24 (mask 255.255.255.0)
//!     Default Gateway:                      192.168.1.1
//! ```

use super::{blocks, ipv4, normalize_newlines};
use crate::error::{NetifError, NetifResult};
use crate::types::InterfaceDescriptor;

pub const INTERFACE_HEADER: &str = "Configuration for interface \"";

const IP_ADDRESS: &str = "IP Address:";
const SUBNET_PREFIX: &str = "Subnet Prefix:";
const MASK: &str = "mask ";
const DEFAULT_GATEWAY: &str = "Default Gateway:";

/// netsh reports no broadcast or alias list, so both are derived
/// assuming a /24 network.
const ASSUMED_PREFIX: u8 = 24;

pub fn parse(text: &str) -> NetifResult<Vec<InterfaceDescriptor>> {
    let text = normalize_newlines(text.trim());
    blocks(&text).map(parse_block).collect()
}

fn parse_block(block: &str) -> NetifResult<InterfaceDescriptor> {
    let name = interface_name(block).ok_or_else(|| {
        NetifError::Parse(format!(
            "netsh block has no interface header: '{}'",
            block.lines().next().unwrap_or_default().trim()
        ))
    })?;

    let mut descriptor = InterfaceDescriptor::named(name);
    descriptor.ip = field(block, IP_ADDRESS).and_then(ipv4);
    descriptor.netmask = field(block, SUBNET_PREFIX).and_then(subnet_mask);
    descriptor.gateway = field(block, DEFAULT_GATEWAY).and_then(ipv4);

    if let (Some(ip), Some(_)) = (&descriptor.ip, &descriptor.netmask) {
        descriptor.broadcast = assumed_broadcast(ip);
    }
    if let Some(ip) = &descriptor.ip {
        descriptor.ip_addresses = vec![format!("{}/{}", ip, ASSUMED_PREFIX)];
    }

    Ok(descriptor)
}

fn interface_name(block: &str) -> Option<String> {
    let start = block.find(INTERFACE_HEADER)? + INTERFACE_HEADER.len();
    let rest = &block[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

/// Text after `label` on the first line carrying it
fn field<'a>(block: &'a str, label: &str) -> Option<&'a str> {
    block.lines().find_map(|line| {
        let line = line.trim();
        line.strip_prefix(label).map(str::trim)
    })
}

/// `192.168.1.0/24 (mask 255.255.255.0)` -> `255.255.255.0`
fn subnet_mask(value: &str) -> Option<String> {
    let start = value.find(MASK)? + MASK.len();
    let mask = &value[start..];
    let mut chars = mask.chars();
    chars.next_back()?;
    ipv4(chars.as_str())
}

fn assumed_broadcast(ip: &str) -> Option<String> {
    let (network, _host) = ip.rsplit_once('.')?;
    Some(format!("{}.255", network))
}
