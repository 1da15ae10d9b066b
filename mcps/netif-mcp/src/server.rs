//! MCP Server implementation for network interface management
//!
//! Tools delegate to the handlers module; the server only owns the
//! [`HostNetwork`] built at startup.

use std::sync::Arc;

use netif::{HostNetwork, NetifConfig, NetifResult};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::handlers;
use crate::params::*;

/// The netif MCP Server
#[derive(Clone)]
pub struct NetifMcpServer {
    host: Arc<HostNetwork>,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl NetifMcpServer {
    /// Create a server from the standard config locations
    ///
    /// See [`NetifConfig::load`] for the search order.
    pub fn new() -> NetifResult<Self> {
        let config = NetifConfig::load()?;
        Ok(Self::with_host(HostNetwork::new(config)))
    }

    /// Create a server around an already built host
    pub fn with_host(host: HostNetwork) -> Self {
        tracing::info!(platform = %host.platform(), "netif MCP server configured");
        Self {
            host: Arc::new(host),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List network interfaces with IPv4 address, netmask, broadcast, MAC, default gateway and bound addresses"
    )]
    async fn list_interfaces(
        &self,
        Parameters(params): Parameters<ListInterfacesParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::list_interfaces(&self.host, params).await
    }

    #[tool(
        description = "Give an interface a static IPv4 address (rewrites /etc/network/interfaces on Linux, runs netsh on Windows)"
    )]
    async fn set_static_address(
        &self,
        Parameters(params): Parameters<SetStaticAddressParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::set_static_address(&self.host, params).await
    }

    #[tool(description = "Configure an interface for DHCP (not available on Windows)")]
    async fn set_dhcp(
        &self,
        Parameters(params): Parameters<SetDhcpParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::set_dhcp(&self.host, params).await
    }

    #[tool(description = "Add a secondary /24 IPv4 address to an interface (Linux only)")]
    async fn add_secondary_ip(
        &self,
        Parameters(params): Parameters<SecondaryIpParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::add_secondary_ip(&self.host, params).await
    }

    #[tool(description = "Remove a secondary /24 IPv4 address from an interface (Linux only)")]
    async fn remove_secondary_ip(
        &self,
        Parameters(params): Parameters<SecondaryIpParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::remove_secondary_ip(&self.host, params).await
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for NetifMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Network interface MCP server. Lists interfaces and changes their \
                 addressing through the host's own tools. Configuration changes need \
                 administrative privilege on the host."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
