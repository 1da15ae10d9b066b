mod common;

use std::path::Path;
use std::sync::Arc;

use common::FakeRunner;
use netif::{
    CommandRunner, ConfigurationRequest, Elevator, HostNetwork, InterfaceDescription,
    NetifConfig, NetifError, Platform, PrefixElevator,
};

fn config(interfaces: &Path) -> NetifConfig {
    let mut config = NetifConfig::default();
    config.commands.elevation_prefix = Some("sudo".to_string());
    config.files.interfaces = interfaces.to_path_buf();
    config
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
async fn test_add_secondary_ip_elevated() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new().ok("");
    let host = host(config(&dir.path().join("interfaces")), Platform::Linux, runner.clone());

    host.add_secondary_ip("eth0", "10.0.0.5").await.unwrap();
    assert_eq!(runner.commands(), ["sudo ip addr add 10.0.0.5/24 dev eth0"]);
}

#[tokio::test]
async fn test_add_existing_address_is_already_assigned() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new().fail(2, "RTNETLINK answers: File exists\n");
    let host = host(config(&dir.path().join("interfaces")), Platform::Linux, runner);

    let err = host.add_secondary_ip("eth0", "10.0.0.5").await.unwrap_err();
    match &err {
        NetifError::AlreadyAssigned { ip, interface } => {
            assert_eq!(ip, "10.0.0.5");
            assert_eq!(interface, "eth0");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "IP address 10.0.0.5 already assigned to eth0");
}

#[tokio::test]
async fn test_remove_missing_address_is_not_assigned() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new().fail(2, "RTNETLINK answers: Cannot assign requested address\n");
    let host = host(config(&dir.path().join("interfaces")), Platform::Linux, runner.clone());

    let err = host.remove_secondary_ip("eth0", "10.0.0.5").await.unwrap_err();
    assert!(matches!(err, NetifError::NotAssigned { .. }));
    assert_eq!(runner.commands(), ["sudo ip addr delete 10.0.0.5/24 dev eth0"]);
}

#[tokio::test]
async fn test_timeout_propagates_from_elevator() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new().timeout("sudo ip addr add 10.0.0.5/24 dev eth0");
    let host = host(config(&dir.path().join("interfaces")), Platform::Linux, runner);

    let err = host.add_secondary_ip("eth0", "10.0.0.5").await.unwrap_err();
    assert!(matches!(err, NetifError::Timeout { .. }));
}

#[tokio::test]
async fn test_secondary_addresses_need_linux() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    let host = host(config(&dir.path().join("interfaces")), Platform::Unix, runner.clone());

    let err = host.add_secondary_ip("en0", "10.0.0.5").await.unwrap_err();
    assert!(matches!(err, NetifError::UnsupportedPlatform(_)));
    assert_eq!(err.to_string(), "Available only on Linux systems");
    assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn test_static_then_dhcp_rewrites_stanza() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interfaces");
    tokio::fs::write(&path, "auto lo\niface lo inet loopback\n")
        .await
        .unwrap();

    let runner = FakeRunner::new();
    let host = host(config(&path), Platform::Linux, runner.clone());

    let desc = InterfaceDescription::static_address(
        "192.168.1.10",
        "255.255.255.0",
        Some("192.168.1.1".to_string()),
    );
    host.configure(&ConfigurationRequest::new("eth0", desc))
        .await
        .unwrap();
    let written = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(
        written,
        "auto lo\niface lo inet loopback\n\nauto eth0\niface eth0 inet static\n    address 192.168.1.10\n    netmask 255.255.255.0\n    gateway 192.168.1.1\n"
    );

    host.set_dhcp("eth0").await.unwrap();
    let written = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(
        written,
        "auto lo\niface lo inet loopback\n\nauto eth0\niface eth0 inet dhcp\n"
    );

    // file rewrites never run commands
    assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn test_static_requires_netmask() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interfaces");
    let host = host(config(&path), Platform::Linux, FakeRunner::new());

    let desc = InterfaceDescription {
        ip: Some("192.168.1.10".to_string()),
        ..Default::default()
    };
    let err = host.set_static("eth0", &desc).await.unwrap_err();
    assert!(matches!(err, NetifError::InvalidRequest(_)));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_windows_static_without_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&dir.path().join("interfaces"));
    config.commands.elevation_prefix = None;
    let runner = FakeRunner::new().ok("");
    let host = host(config, Platform::Windows, runner.clone());

    let desc = InterfaceDescription::static_address("192.168.1.50", "255.255.255.0", None);
    host.set_static("Ethernet", &desc).await.unwrap();
    assert_eq!(
        runner.commands(),
        ["netsh interface ipv4 set address name=\"Ethernet\" static 192.168.1.50 255.255.255.0"]
    );
}

#[tokio::test]
async fn test_windows_rejects_dhcp_and_secondary() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    let host = host(config(&dir.path().join("interfaces")), Platform::Windows, runner.clone());

    assert!(matches!(
        host.set_dhcp("Ethernet").await,
        Err(NetifError::UnsupportedPlatform(_))
    ));
    assert!(matches!(
        host.remove_secondary_ip("Ethernet", "10.0.0.5").await,
        Err(NetifError::UnsupportedPlatform(_))
    ));
    assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn test_windows_static_on_enumerated_friendly_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&dir.path().join("interfaces"));
    config.commands.elevation_prefix = None;
    let netsh = "\r\n\
Configuration for interface \"vEthernet (Default Switch)\"\r\n\
    DHCP enabled:                         No\r\n\
    IP Address:                           172.20.96.1\r\n\
    Subnet Prefix:                        172.20.96.0/20 (mask 255.255.240.0)\r\n\
\r\n";
    let runner = FakeRunner::new().ok(netsh).ok("");
    let host = host(config, Platform::Windows, runner.clone());

    let interfaces = host.enumerate().await.unwrap();
    assert_eq!(interfaces.len(), 1);
    let name = &interfaces[0].name;
    assert_eq!(name, "vEthernet (Default Switch)");

    let desc = InterfaceDescription::static_address("172.20.96.2", "255.255.240.0", None);
    host.set_static(name, &desc).await.unwrap();
    assert_eq!(
        runner.commands()[1],
        "netsh interface ipv4 set address name=\"vEthernet (Default Switch)\" static 172.20.96.2 255.255.240.0"
    );
}

#[tokio::test]
async fn test_windows_rejects_cmd_metacharacters() {
    let dir = tempfile::tempdir().unwrap();
    let runner = FakeRunner::new();
    let host = host(config(&dir.path().join("interfaces")), Platform::Windows, runner.clone());

    let desc = InterfaceDescription::static_address("192.168.1.50", "255.255.255.0", None);
    let err = host.set_static("Ethernet & shutdown", &desc).await.unwrap_err();
    assert!(matches!(err, NetifError::InvalidRequest(_)));
    assert!(runner.commands().is_empty());
}
