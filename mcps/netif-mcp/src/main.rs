//! netif MCP - network interface inspection and configuration server
//!
//! Lists interfaces and changes their addressing by driving the host's own
//! tools (`ifconfig`, `ip`, `route`, `netsh`).

use rmcp::{transport::io::stdio, ServiceExt};

use netif_mcp::NetifMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    netif::logging::init_tracing("netif_mcp", false)?;

    tracing::info!("Starting netif MCP server");

    let server = NetifMcpServer::new()?;
    let service = server.serve(stdio()).await?;

    tracing::info!("netif MCP server running");

    service.waiting().await?;

    tracing::info!("netif MCP server stopped");

    Ok(())
}
