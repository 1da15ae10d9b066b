//! Scripted collaborators shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use netif::{CommandOutput, CommandRunner, NetifError, NetifResult};

/// Replays canned results in order and records every command it receives
#[derive(Default)]
pub struct FakeRunner {
    script: Mutex<VecDeque<NetifResult<CommandOutput>>>,
    seen: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ok(self: &Arc<Self>, stdout: &str) -> Arc<Self> {
        self.push(Ok(CommandOutput::ok(stdout)))
    }

    pub fn fail(self: &Arc<Self>, code: i32, stderr: &str) -> Arc<Self> {
        self.push(Ok(CommandOutput::failed(code, stderr)))
    }

    /// Clean exit that still wrote to stderr
    pub fn stderr(self: &Arc<Self>, stderr: &str) -> Arc<Self> {
        self.push(Ok(CommandOutput {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code: Some(0),
        }))
    }

    pub fn timeout(self: &Arc<Self>, command: &str) -> Arc<Self> {
        self.push(Err(NetifError::Timeout {
            command: command.to_string(),
            timeout: Duration::from_secs(10),
        }))
    }

    fn push(self: &Arc<Self>, result: NetifResult<CommandOutput>) -> Arc<Self> {
        self.script.lock().unwrap().push_back(result);
        self.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, command: &str, _timeout: Duration) -> NetifResult<CommandOutput> {
        self.seen.lock().unwrap().push(command.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted command: {command}"))
    }
}

pub const IFCONFIG_TWO_BLOCKS: &str = "\
eth0      Link encap:Ethernet  HWaddr 00:0C:29:28:FD:4C
          inet addr:192.168.1.77  Bcast:192.168.1.255  Mask:255.255.255.0
          UP BROADCAST RUNNING MULTICAST  MTU:1500  Metric:1

lo        Link encap:Local Loopback
          inet addr:127.0.0.1  Mask:255.0.0.0
          UP LOOPBACK RUNNING  MTU:65536  Metric:1
";

pub const ROUTE: &str = "\
Kernel IP routing table
Destination     Gateway         Genmask         Flags Metric Ref    Use Iface
default         192.168.1.1     0.0.0.0         UG    0      0        0 eth0
192.168.1.0     *               255.255.255.0   U     0      0        0 eth0
";

pub const NETSH: &str = "\r\n\
Configuration for interface \"Ethernet\"\r\n\
    DHCP enabled:                         No\r\n\
    IP Address:                           192.168.1.50\r\n\
    Subnet Prefix:                        192.168.1.0/24 (mask 255.255.255.0)\r\n\
    Default Gateway:                      192.168.1.1\r\n\
\r\n";
