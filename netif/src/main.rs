use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use netif::config::CONFIG_ENV_VAR;
use netif::{HostNetwork, InterfaceDescription, NetifConfig};

#[derive(Parser)]
#[command(name = "netifctl")]
#[command(about = "Inspect and configure network interfaces through the OS tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML); searched in the standard locations when omitted
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Log at debug level (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List interfaces as JSON
    List {
        /// Only show the interface with this name
        #[arg(long)]
        name: Option<String>,
    },
    /// Write a static stanza (or run netsh on Windows)
    SetStatic {
        /// Interface name
        name: String,
        #[arg(long)]
        ip: String,
        #[arg(long)]
        netmask: String,
        #[arg(long)]
        gateway: Option<String>,
    },
    /// Write a DHCP stanza
    SetDhcp {
        /// Interface name
        name: String,
    },
    /// Add a secondary /24 address (Linux)
    AddIp {
        /// Interface name
        name: String,
        /// IPv4 address
        ip: String,
    },
    /// Remove a secondary /24 address (Linux)
    RemoveIp {
        /// Interface name
        name: String,
        /// IPv4 address
        ip: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    netif::logging::init_tracing("netifctl", cli.verbose)?;

    let config = match &cli.config {
        Some(path) => NetifConfig::load_from_path(path)?,
        None => NetifConfig::load()?,
    };
    let host = HostNetwork::new(config);

    match cli.command {
        Commands::List { name } => {
            let mut interfaces = host.enumerate().await?;
            if let Some(name) = name {
                interfaces.retain(|iface| iface.name == name);
            }
            println!("{}", serde_json::to_string_pretty(&interfaces)?);
        }
        Commands::SetStatic {
            name,
            ip,
            netmask,
            gateway,
        } => {
            let desc = InterfaceDescription::static_address(ip, netmask, gateway);
            host.set_static(&name, &desc).await?;
            println!("Configured {} with a static address", name);
        }
        Commands::SetDhcp { name } => {
            host.set_dhcp(&name).await?;
            println!("Configured {} for DHCP", name);
        }
        Commands::AddIp { name, ip } => {
            host.add_secondary_ip(&name, &ip).await?;
            println!("Added {} to {}", ip, name);
        }
        Commands::RemoveIp { name, ip } => {
            host.remove_secondary_ip(&name, &ip).await?;
            println!("Removed {} from {}", ip, name);
        }
    }

    Ok(())
}
