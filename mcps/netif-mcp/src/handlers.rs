//! Tool handlers
//!
//! Each handler calls into [`HostNetwork`] and maps the outcome onto an MCP
//! result. Conditions the caller can act on (bad input, wrong platform,
//! address already present or absent) come back as request errors; anything
//! that went wrong on the host is an internal error.

use netif::{HostNetwork, InterfaceDescription, NetifError};
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

use crate::params::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn netif_error_to_mcp(err: NetifError) -> McpError {
    match &err {
        NetifError::InvalidRequest(_) => McpError::invalid_params(err.to_string(), None),
        NetifError::UnsupportedPlatform(_)
        | NetifError::AlreadyAssigned { .. }
        | NetifError::NotAssigned { .. } => McpError::invalid_request(err.to_string(), None),
        _ => McpError::internal_error(err.to_string(), None),
    }
}

fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_interfaces(
    host: &HostNetwork,
    params: ListInterfacesParams,
) -> Result<CallToolResult, McpError> {
    let mut interfaces = host.enumerate().await.map_err(netif_error_to_mcp)?;
    if let Some(name) = params.name {
        interfaces.retain(|iface| iface.name == name);
    }
    json_success(&interfaces)
}

pub async fn set_static_address(
    host: &HostNetwork,
    params: SetStaticAddressParams,
) -> Result<CallToolResult, McpError> {
    let desc = InterfaceDescription::static_address(&params.ip, &params.netmask, params.gateway);
    host.set_static(&params.name, &desc)
        .await
        .map_err(netif_error_to_mcp)?;
    Ok(text_success(format!(
        "Configured {} with static address {}/{}",
        params.name, params.ip, params.netmask
    )))
}

pub async fn set_dhcp(host: &HostNetwork, params: SetDhcpParams) -> Result<CallToolResult, McpError> {
    host.set_dhcp(&params.name)
        .await
        .map_err(netif_error_to_mcp)?;
    Ok(text_success(format!("Configured {} for DHCP", params.name)))
}

pub async fn add_secondary_ip(
    host: &HostNetwork,
    params: SecondaryIpParams,
) -> Result<CallToolResult, McpError> {
    host.add_secondary_ip(&params.name, &params.ip)
        .await
        .map_err(netif_error_to_mcp)?;
    Ok(text_success(format!("Added {} to {}", params.ip, params.name)))
}

pub async fn remove_secondary_ip(
    host: &HostNetwork,
    params: SecondaryIpParams,
) -> Result<CallToolResult, McpError> {
    host.remove_secondary_ip(&params.name, &params.ip)
        .await
        .map_err(netif_error_to_mcp)?;
    Ok(text_success(format!("Removed {} from {}", params.ip, params.name)))
}
