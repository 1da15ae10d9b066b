//! iproute2 `ip addr` output
//!
//! ```text
//! 2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP
//!     link/ether 52:54:00:12:34:56 brd ff:ff:ff:ff:ff:ff
//!     inet 192.168.1.10/24 brd 192.168.1.255 scope global dynamic eth0
//!        valid_lft 86054sec preferred_lft 86054sec
//!     inet 192.168.1.11/24 scope global secondary eth0
//! ```
//!
//! Used both as a full discovery dialect and, via [`secondary_addresses`],
//! for the per-interface address lookup.

use super::{ipv4, mac, normalize_newlines, prefix_to_netmask, token_after, token_after_in_block};
use crate::error::{NetifError, NetifResult};
use crate::types::InterfaceDescriptor;

const INET: &str = "inet";
const LINK_ETHER: &str = "link/ether";
const BRD: &str = "brd";

/// `N: name: <FLAGS>` header that opens every interface
pub fn is_header(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    let index_ok = tokens
        .next()
        .and_then(|t| t.strip_suffix(':'))
        .is_some_and(|idx| !idx.is_empty() && idx.chars().all(|c| c.is_ascii_digit()));
    index_ok && !line.starts_with(char::is_whitespace) && tokens.next().is_some()
}

/// Every `inet` line's address, in CIDR form and in output order
pub fn secondary_addresses(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some(INET) => tokens.next().map(str::to_string),
                _ => None,
            }
        })
        .collect()
}

/// Parse a full `ip addr` dump
pub fn parse(text: &str) -> NetifResult<Vec<InterfaceDescriptor>> {
    let text = normalize_newlines(text);
    split_interfaces(&text)?
        .into_iter()
        .map(parse_block)
        .collect()
}

/// Group lines into one chunk per header line
fn split_interfaces(text: &str) -> NetifResult<Vec<Vec<&str>>> {
    let mut chunks: Vec<Vec<&str>> = Vec::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        if is_header(line) {
            chunks.push(vec![line]);
        } else if let Some(current) = chunks.last_mut() {
            current.push(line);
        } else {
            return Err(NetifError::Parse(format!(
                "ip addr output does not start with an interface header: '{}'",
                line.trim()
            )));
        }
    }

    Ok(chunks)
}

fn parse_block(lines: Vec<&str>) -> NetifResult<InterfaceDescriptor> {
    let header = lines.first().copied().unwrap_or_default();
    let name = interface_name(header).ok_or_else(|| {
        NetifError::Parse(format!("no interface name in ip addr header '{}'", header))
    })?;

    let block = lines.join("\n");
    let mut descriptor = InterfaceDescriptor::named(name);

    let primary = lines
        .iter()
        .find(|line| line.split_whitespace().next() == Some(INET));

    if let Some(line) = primary {
        if let Some((ip, prefix)) = line.split_whitespace().nth(1).and_then(split_cidr) {
            descriptor.ip = ipv4(ip);
            descriptor.netmask = prefix.and_then(prefix_to_netmask);
        }
        descriptor.broadcast = token_after(line, BRD).and_then(ipv4);
    }

    descriptor.mac = token_after_in_block(&block, LINK_ETHER).and_then(mac);
    descriptor.ip_addresses = secondary_addresses(&block);

    Ok(descriptor)
}

/// `eth0@if12:` -> `eth0`
fn interface_name(header: &str) -> Option<String> {
    let token = header.split_whitespace().nth(1)?;
    let token = token.strip_suffix(':').unwrap_or(token);
    let name = token.split('@').next().unwrap_or(token);
    (!name.is_empty()).then(|| name.to_string())
}

fn split_cidr(cidr: &str) -> Option<(&str, Option<u8>)> {
    match cidr.split_once('/') {
        Some((ip, len)) => Some((ip, len.parse().ok())),
        None => Some((cidr, None)),
    }
}
