//! Parameter types for netif MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListInterfacesParams {
    #[schemars(description = "Only return the interface with this name (optional)")]
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SetStaticAddressParams {
    #[schemars(description = "Interface name (e.g. 'eth0', 'Local Area Connection')")]
    pub name: String,

    #[schemars(description = "IPv4 address, dotted quad")]
    pub ip: String,

    #[schemars(description = "Netmask, dotted quad (e.g. '255.255.255.0')")]
    pub netmask: String,

    #[schemars(description = "Default gateway (optional)")]
    #[serde(default)]
    pub gateway: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SetDhcpParams {
    #[schemars(description = "Interface name")]
    pub name: String,
}

/// Shared by add_secondary_ip and remove_secondary_ip
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SecondaryIpParams {
    #[schemars(description = "Interface name")]
    pub name: String,

    #[schemars(description = "IPv4 address; a /24 prefix is applied")]
    pub ip: String,
}
