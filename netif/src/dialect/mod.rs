//! Grammars for the CLI output dialects the enumerator understands
//!
//! Each dialect lives in its own module with its own marker constants.
//! Field extraction is always a fallible lookup: a missing or malformed
//! token yields `None`, never a panic. Only a block without an interface
//! name is fatal, because without a name there is no descriptor to build.
//!
//! | Dialect            | Sample tool                           |
//! |--------------------|---------------------------------------|
//! | `IfconfigClassic`  | net-tools 1.x, busybox, QNAP firmware |
//! | `IfconfigBsd`      | macOS/BSD, net-tools 2.x              |
//! | `IpAddr`           | iproute2 `ip addr`                    |
//! | `Netsh`            | `netsh interface ipv4 show config`    |

use std::borrow::Cow;
use std::fmt;
use std::net::Ipv4Addr;

use crate::error::NetifResult;
use crate::types::InterfaceDescriptor;

pub mod ifconfig;
pub mod iproute;
pub mod netsh;
pub mod route;

/// A CLI output format with its own parsing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    IfconfigClassic,
    IfconfigBsd,
    IpAddr,
    Netsh,
}

impl Dialect {
    /// Identify the dialect of a discovery command's output.
    ///
    /// Returns `None` for empty output and for text that carries none of
    /// the known markers.
    pub fn detect(text: &str) -> Option<Self> {
        if text.contains(netsh::INTERFACE_HEADER) {
            return Some(Dialect::Netsh);
        }

        let first_line = text.lines().find(|l| !l.trim().is_empty())?;
        if iproute::is_header(first_line) {
            return Some(Dialect::IpAddr);
        }

        if ifconfig::CLASSIC_MARKERS.iter().any(|m| text.contains(m)) {
            return Some(Dialect::IfconfigClassic);
        }

        if text.contains(ifconfig::BSD_FLAGS_MARKER) {
            return Some(Dialect::IfconfigBsd);
        }

        None
    }

    /// Parse a full discovery output into descriptors.
    ///
    /// Gateway and secondary addresses are only filled in by dialects
    /// that carry them inline (`netsh`, `ip addr`).
    pub fn parse(self, text: &str) -> NetifResult<Vec<InterfaceDescriptor>> {
        match self {
            Dialect::IfconfigClassic => ifconfig::parse(text, ifconfig::Flavor::Classic),
            Dialect::IfconfigBsd => ifconfig::parse(text, ifconfig::Flavor::Bsd),
            Dialect::IpAddr => iproute::parse(text),
            Dialect::Netsh => netsh::parse(text),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::IfconfigClassic => "ifconfig-classic",
            Dialect::IfconfigBsd => "ifconfig-bsd",
            Dialect::IpAddr => "ip-addr",
            Dialect::Netsh => "netsh",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Block splitting
// ============================================================================

/// Convert CRLF line endings so Windows output splits like POSIX output
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Split text into blank-line separated blocks, skipping empty ones
pub fn blocks(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n")
        .map(|b| b.trim_matches('\n'))
        .filter(|b| !b.trim().is_empty())
}

// ============================================================================
// Token helpers
// ============================================================================

/// First line whose first whitespace token equals `keyword`
pub fn line_starting_with<'a>(block: &'a str, keyword: &str) -> Option<&'a str> {
    block
        .lines()
        .find(|line| line.split_whitespace().next() == Some(keyword))
}

/// The token that follows `keyword` on `line`
pub fn token_after<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let mut tokens = line.split_whitespace();
    tokens.find(|t| *t == keyword)?;
    tokens.next()
}

/// Same as [`token_after`] but searching every line of a block
pub fn token_after_in_block<'a>(block: &'a str, keyword: &str) -> Option<&'a str> {
    block.lines().find_map(|line| token_after(line, keyword))
}

/// Value of a `Label:value` token (label matched case-insensitively)
pub fn labelled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.split_whitespace().find_map(|token| {
        let head = token.get(..label.len())?;
        if head.eq_ignore_ascii_case(label) {
            Some(&token[label.len()..]).filter(|v| !v.is_empty())
        } else {
            None
        }
    })
}

/// Drop a `label:` prefix (`addr:1.2.3.4` -> `1.2.3.4`)
pub fn strip_label(token: &str) -> &str {
    match token.rfind(':') {
        Some(idx) => &token[idx + 1..],
        None => token,
    }
}

pub fn is_ipv4(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

/// Keep `s` only if it is a dotted-quad IPv4 address
pub fn ipv4(s: &str) -> Option<String> {
    let s = s.trim();
    is_ipv4(s).then(|| s.to_string())
}

/// Exactly six colon-separated octets of one or two hex digits
pub fn is_mac(token: &str) -> bool {
    let parts: Vec<&str> = token.split(':').collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|p| (1..=2).contains(&p.len()) && p.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Keep `token` only if it is a well-formed MAC address
pub fn mac(token: &str) -> Option<String> {
    is_mac(token).then(|| token.to_string())
}

/// Accept a dotted-quad or BSD-style hex netmask (`0xffffff00`)
pub fn normalize_netmask(token: &str) -> Option<String> {
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        return u32::from_str_radix(hex, 16)
            .ok()
            .map(|bits| Ipv4Addr::from(bits).to_string());
    }
    ipv4(token)
}

/// Netmask for a CIDR prefix length
pub fn prefix_to_netmask(prefix: u8) -> Option<String> {
    if prefix > 32 {
        return None;
    }
    let bits = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    };
    Some(Ipv4Addr::from(bits).to_string())
}
