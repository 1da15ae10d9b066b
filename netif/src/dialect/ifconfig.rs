//! `ifconfig` output grammars
//!
//! Classic (net-tools 1.x / busybox / QNAP):
//!
//! ```text
//! eth0      Link encap:Ethernet  HWaddr 00:0C:29:28:FD:4C
//!           inet addr:192.168.1.77  Bcast:192.168.1.255  Mask:255.255.255.0
//! ```
//!
//! BSD (macOS, FreeBSD, net-tools 2.x on Linux):
//!
//! ```text
//! eth0: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500
//!         inet 192.168.1.77  netmask 255.255.255.0  broadcast 192.168.1.255
//!         ether 00:0c:29:28:fd:4c  txqueuelen 1000  (Ethernet)
//! ```
//!
//! Interfaces are separated by a blank line. The interface name is the
//! first token of the block's first line, minus a trailing colon.

use super::{
    blocks, ipv4, labelled_value, line_starting_with, mac, normalize_netmask, normalize_newlines,
    strip_label, token_after, token_after_in_block,
};
use crate::error::{NetifError, NetifResult};
use crate::types::InterfaceDescriptor;

/// Any of these in the output marks the classic dialect
pub const CLASSIC_MARKERS: [&str; 3] = ["Link encap:", "HWaddr", "inet addr:"];

/// Interface header flags, present on every BSD-style block
pub const BSD_FLAGS_MARKER: &str = "flags=";

const INET: &str = "inet";

// Classic markers
const CLASSIC_MAC: &str = "HWaddr";
const CLASSIC_BCAST: &str = "Bcast:";
const CLASSIC_MASK: &str = "Mask:";

// BSD markers
const BSD_MAC: &str = "ether";
const BSD_NETMASK: &str = "netmask";
const BSD_BROADCAST: &str = "broadcast";

/// Which marker set to parse a block with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Classic,
    Bsd,
}

/// Parse a whole `ifconfig` dump
pub fn parse(text: &str, flavor: Flavor) -> NetifResult<Vec<InterfaceDescriptor>> {
    let text = normalize_newlines(text);
    blocks(&text)
        .flat_map(split_headers)
        .map(|block| parse_block(block, flavor))
        .collect()
}

/// Split a block again at every column-0 line.
///
/// macOS and the BSDs print interfaces back to back with no blank line in
/// between, so each unindented `name: flags=` header opens a new interface.
fn split_headers(block: &str) -> Vec<&str> {
    let mut starts = vec![0];
    starts.extend(
        block
            .match_indices('\n')
            .map(|(i, _)| i + 1)
            .filter(|&i| block[i..].starts_with(|c: char| !c.is_whitespace())),
    );
    starts.push(block.len());

    starts
        .windows(2)
        .map(|w| block[w[0]..w[1]].trim_end_matches('\n'))
        .collect()
}

/// Parse one interface block
pub fn parse_block(block: &str, flavor: Flavor) -> NetifResult<InterfaceDescriptor> {
    let first_line = block.lines().next().unwrap_or_default();
    let name = interface_name(first_line).ok_or_else(|| {
        NetifError::Parse(format!(
            "no interface name in ifconfig block starting with '{}'",
            first_line.trim()
        ))
    })?;

    let mut descriptor = InterfaceDescriptor::named(name);

    if let Some(inet) = line_starting_with(block, INET) {
        descriptor.ip = inet_address(inet);
        match flavor {
            Flavor::Classic => {
                descriptor.netmask = classic_netmask(inet);
                descriptor.broadcast = labelled_value(inet, CLASSIC_BCAST).and_then(ipv4);
            }
            Flavor::Bsd => {
                descriptor.netmask = token_after(inet, BSD_NETMASK).and_then(normalize_netmask);
                descriptor.broadcast = token_after(inet, BSD_BROADCAST).and_then(ipv4);
            }
        }
    }

    descriptor.mac = match flavor {
        Flavor::Classic => {
            token_after_in_block(block, CLASSIC_MAC).and_then(|t| mac(&t.replace('-', ":")))
        }
        Flavor::Bsd => token_after_in_block(block, BSD_MAC).and_then(mac),
    };

    Ok(descriptor)
}

/// Name from a block's first line.
///
/// The line must start at column 0; an indented first line means the
/// block boundary was lost and the block is rejected.
pub fn interface_name(first_line: &str) -> Option<String> {
    if first_line.starts_with(char::is_whitespace) {
        return None;
    }
    let token = first_line.split_whitespace().next()?;
    let name = token.strip_suffix(':').unwrap_or(token);
    let starts_ok = name.chars().next()?.is_ascii_alphanumeric();
    starts_ok.then(|| name.to_string())
}

/// Second token of the `inet` line, with any `addr:` style label removed
fn inet_address(line: &str) -> Option<String> {
    let token = line.split_whitespace().nth(1)?;
    ipv4(strip_label(token))
}

/// `Mask:` value, falling back to the last labelled token of the line so
/// that localized labels (`Masque:`, `Maske:`) still resolve.
fn classic_netmask(line: &str) -> Option<String> {
    if let Some(mask) = labelled_value(line, CLASSIC_MASK).and_then(ipv4) {
        return Some(mask);
    }

    line.split_whitespace()
        .skip(2)
        .filter(|t| t.contains(':'))
        .filter(|t| {
            let label = &t[..t.rfind(':').unwrap_or(0)];
            !label.eq_ignore_ascii_case("bcast") && !label.eq_ignore_ascii_case("broadcast")
        })
        .last()
        .and_then(|t| ipv4(strip_label(t)))
}
