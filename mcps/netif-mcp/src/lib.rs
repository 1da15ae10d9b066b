//! netif MCP Library
//!
//! Exposes interface listing and configuration from the `netif` crate as
//! MCP tools.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use netif_mcp::NetifMcpServer;
//!
//! let server = NetifMcpServer::new()?;
//! // Serve via stdio or an in-memory transport
//! ```

pub mod handlers;
pub mod params;
pub mod server;

pub use server::NetifMcpServer;

pub use params::*;
