//! Default gateway lookup in routing table output
//!
//! Handles `route`, `route -n` and `netstat -rn`. The first default route
//! wins; hosts with several uplinks get the first one listed.

use std::net::Ipv4Addr;

use super::ipv4;

/// Destination column values that mark a default route
const DESTINATIONS: [&str; 2] = ["default", "link-local"];

/// Numeric form of `default` printed by `route -n`
const NUMERIC_DEFAULT: &str = "0.0.0.0";

pub fn gateway(route_text: &str) -> Option<String> {
    let line = route_text.lines().find(|line| is_default_route(line))?;
    let token = line.split_whitespace().nth(1)?;
    resolve(token)
}

fn is_default_route(line: &str) -> bool {
    DESTINATIONS.iter().any(|d| line.contains(d))
        || line.split_whitespace().next() == Some(NUMERIC_DEFAULT)
}

/// `10.0.0.1-eth0` -> `10.0.0.1`, `10-0-0-1.ec2.internal` -> `10.0.0.1`
fn resolve(token: &str) -> Option<String> {
    if let Some(prefix) = dotted_quad_prefix(token) {
        return Some(prefix.to_string());
    }

    let host = token.split('.').next()?;
    ipv4(&host.replace('-', "."))
}

/// Longest leading run of `[0-9.]` if it is an IPv4 address
fn dotted_quad_prefix(token: &str) -> Option<&str> {
    let end = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(token.len());
    let candidate = token[..end].trim_end_matches('.');
    candidate.parse::<Ipv4Addr>().ok().map(|_| candidate)
}
