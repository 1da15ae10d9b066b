mod common;

use std::sync::Arc;

use common::{FakeRunner, IFCONFIG_TWO_BLOCKS, NETSH, ROUTE};
use netif::{
    CommandRunner, Elevator, HostNetwork, NetifConfig, NetifError, Platform, PrefixElevator,
};

fn config(secondary_lookup: &str) -> NetifConfig {
    NetifConfig::from_toml(&format!(
        r#"
[commands]
discovery = "ifconfig -a"
routes = "route -n"
secondary_lookup = "{secondary_lookup}"
windows_discovery = "netsh interface ipv4 show config"
elevation_prefix = "sudo"
"#
    ))
    .unwrap()
}

fn host(config: NetifConfig, platform: Platform, runner: Arc<FakeRunner>) -> HostNetwork {
    let runner: Arc<dyn CommandRunner> = runner;
    let elevator: Arc<dyn Elevator> = Arc::new(PrefixElevator::new(
        runner.clone(),
        config.commands.elevation_prefix.clone(),
    ));
    HostNetwork::with_runner(config, platform, runner, elevator)
}

#[tokio::test]
async fn test_two_blocks_share_gateway() {
    let runner = FakeRunner::new()
        .ok(IFCONFIG_TWO_BLOCKS)
        .ok(ROUTE);
    let host = host(config(""), Platform::Linux, runner.clone());

    let interfaces = host.enumerate().await.unwrap();
    assert_eq!(interfaces.len(), 2);

    let eth0 = &interfaces[0];
    assert_eq!(eth0.name, "eth0");
    assert_eq!(eth0.ip.as_deref(), Some("192.168.1.77"));
    assert_eq!(eth0.netmask.as_deref(), Some("255.255.255.0"));
    assert_eq!(eth0.broadcast.as_deref(), Some("192.168.1.255"));
    assert_eq!(eth0.mac.as_deref(), Some("00:0C:29:28:FD:4C"));
    assert_eq!(eth0.gateway.as_deref(), Some("192.168.1.1"));
    assert!(eth0.ip_addresses.is_empty());

    let lo = &interfaces[1];
    assert_eq!(lo.name, "lo");
    assert_eq!(lo.mac, None);
    assert_eq!(lo.broadcast, None);
    assert_eq!(lo.gateway.as_deref(), Some("192.168.1.1"));

    assert_eq!(runner.commands(), ["ifconfig -a", "route -n"]);
}

#[tokio::test]
async fn test_secondary_lookup_runs_per_interface_in_order() {
    let runner = FakeRunner::new()
        .ok(IFCONFIG_TWO_BLOCKS)
        .ok(ROUTE)
        .ok("2: eth0: <UP>\n    inet 192.168.1.77/24 brd 192.168.1.255 scope global eth0\n    inet 192.168.1.78/24 scope global secondary eth0\n")
        .ok("1: lo: <LOOPBACK,UP>\n    inet 127.0.0.1/8 scope host lo\n    inet6 ::1/128 scope host\n");
    let host = host(config("ip addr show {name}"), Platform::Linux, runner.clone());

    let interfaces = host.enumerate().await.unwrap();
    assert_eq!(
        interfaces[0].ip_addresses,
        vec!["192.168.1.77/24".to_string(), "192.168.1.78/24".to_string()]
    );
    assert_eq!(interfaces[1].ip_addresses, vec!["127.0.0.1/8".to_string()]);
    assert_eq!(
        runner.commands(),
        [
            "ifconfig -a",
            "route -n",
            "ip addr show eth0",
            "ip addr show lo"
        ]
    );
}

#[tokio::test]
async fn test_discovery_failure_aborts() {
    let runner = FakeRunner::new().fail(127, "sh: ifconfig: not found");
    let host = host(config(""), Platform::Linux, runner.clone());

    let err = host.enumerate().await.unwrap_err();
    match err {
        NetifError::CommandFailed { command, code, stderr } => {
            assert_eq!(command, "ifconfig -a");
            assert_eq!(code, Some(127));
            assert_eq!(stderr, "sh: ifconfig: not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(runner.commands(), ["ifconfig -a"]);
}

#[tokio::test]
async fn test_route_stderr_aborts_without_partial_result() {
    let runner = FakeRunner::new()
        .ok(IFCONFIG_TWO_BLOCKS)
        .stderr("route: command not found");
    let host = host(config(""), Platform::Linux, runner);

    let err = host.enumerate().await.unwrap_err();
    assert!(matches!(err, NetifError::CommandFailed { .. }));
}

#[tokio::test]
async fn test_timeout_propagates() {
    let runner = FakeRunner::new()
        .ok(IFCONFIG_TWO_BLOCKS)
        .ok(ROUTE)
        .timeout("ip addr show eth0");
    let host = host(config("ip addr show {name}"), Platform::Linux, runner);

    let err = host.enumerate().await.unwrap_err();
    assert!(matches!(err, NetifError::Timeout { .. }));
    assert_eq!(
        err.to_string(),
        "command `ip addr show eth0` timed out after 10s"
    );
}

#[tokio::test]
async fn test_nameless_block_is_parse_error() {
    let runner = FakeRunner::new()
        .ok("eth0: flags=4163<UP>  mtu 1500\n        inet 10.0.0.2  netmask 255.0.0.0\n\n        inet 10.0.0.3  netmask 255.0.0.0\n")
        .ok(ROUTE);
    let host = host(config(""), Platform::Linux, runner);

    let err = host.enumerate().await.unwrap_err();
    assert!(matches!(err, NetifError::Parse(_)));
}

#[tokio::test]
async fn test_empty_output_means_no_interfaces() {
    let runner = FakeRunner::new().ok("").ok("");
    let host = host(config(""), Platform::Unix, runner);

    assert!(host.enumerate().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_names_keep_first_block() {
    let text = format!("{IFCONFIG_TWO_BLOCKS}\neth0      Link encap:Ethernet  HWaddr 00:0C:29:28:FD:4D\n          inet addr:10.9.9.9  Mask:255.0.0.0\n");
    let runner = FakeRunner::new().ok(&text).ok(ROUTE);
    let host = host(config(""), Platform::Linux, runner);

    let interfaces = host.enumerate().await.unwrap();
    assert_eq!(interfaces.len(), 2);
    assert_eq!(interfaces[0].ip.as_deref(), Some("192.168.1.77"));
}

#[tokio::test]
async fn test_windows_uses_netsh_only() {
    let runner = FakeRunner::new().ok(NETSH);
    let host = host(config(""), Platform::Windows, runner.clone());

    let interfaces = host.enumerate().await.unwrap();
    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0].name, "Ethernet");
    assert_eq!(interfaces[0].gateway.as_deref(), Some("192.168.1.1"));
    assert_eq!(interfaces[0].broadcast.as_deref(), Some("192.168.1.255"));
    assert_eq!(interfaces[0].ip_addresses, vec!["192.168.1.50/24".to_string()]);
    assert_eq!(runner.commands(), ["netsh interface ipv4 show config"]);
}

#[tokio::test]
async fn test_macos_listing_without_blank_lines() {
    let ifconfig = "\
lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384
\tinet 127.0.0.1 netmask 0xff000000
en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tether 3c:22:fb:12:34:56
\tinet 192.168.1.20 netmask 0xffffff00 broadcast 192.168.1.255
\tstatus: active
";
    let netstat = "\
Routing tables

Internet:
Destination        Gateway            Flags        Netif Expire
default            192.168.1.1        UGScg          en0
";
    let runner = FakeRunner::new().ok(ifconfig).ok(netstat);
    let host = host(config(""), Platform::Unix, runner);

    let interfaces = host.enumerate().await.unwrap();
    let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["lo0", "en0"]);
    assert_eq!(interfaces[1].netmask.as_deref(), Some("255.255.255.0"));
    assert_eq!(interfaces[1].gateway.as_deref(), Some("192.168.1.1"));
}
