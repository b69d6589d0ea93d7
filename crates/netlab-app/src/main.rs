//! netlab demo entry point.
//!
//! Builds a small two-subnet lab (PC1 - SW1 - R1 - PC2), runs a scripted
//! router configuration session and a host shell session, then animates the
//! ping packet across the topology with the virtual-time scheduler.

use netlab_cli::Session;
use netlab_model::{Device, DeviceKind, DnsRecord, DnsRecordType, MemoryTopology, TopologyStore};
use netlab_sim::{PacketKind, PacketScheduler, find_path};
use netlab_types::Result;

fn sample_topology() -> MemoryTopology {
    let mut topo = MemoryTopology::new();

    let mut pc1 = Device::new("pc1", "PC1", DeviceKind::Pc);
    pc1.interfaces[0].ip_address = Some("192.168.1.10".to_string());
    pc1.interfaces[0].subnet_mask = Some("255.255.255.0".to_string());
    pc1.interfaces[0].gateway = Some("192.168.1.1".to_string());
    topo.add_device(pc1);

    topo.add_device(Device::new("sw1", "SW1", DeviceKind::Switch));

    let mut r1 = Device::new("r1", "R1", DeviceKind::Router);
    r1.dns_records.push(DnsRecord {
        hostname: "fileserver".to_string(),
        ip_address: "10.0.0.20".to_string(),
        record_type: DnsRecordType::A,
    });
    topo.add_device(r1);

    let mut srv = Device::new("srv1", "FileServer", DeviceKind::Server);
    srv.interfaces[0].ip_address = Some("10.0.0.20".to_string());
    srv.interfaces[0].subnet_mask = Some("255.255.255.0".to_string());
    srv.interfaces[0].gateway = Some("10.0.0.1".to_string());
    topo.add_device(srv);

    topo.add_link("pc1", "sw1");
    topo.add_link("sw1", "r1");
    topo.add_link("r1", "srv1");
    topo
}

fn run_script(topo: &mut MemoryTopology, device_id: &str, script: &[&str]) -> Result<()> {
    let mut session = Session::open(topo, device_id)?;
    for line in script {
        session.submit(topo, line)?;
        if session.is_closed() {
            break;
        }
    }
    for line in session.transcript() {
        println!("{line}");
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut topo = sample_topology();
    log::info!(
        "sample lab: {} devices, {} links",
        topo.devices().len(),
        topo.links().len()
    );

    // Bring up the router the way the exercises do.
    run_script(
        &mut topo,
        "r1",
        &[
            "enable",
            "configure terminal",
            "hostname CORE-R1",
            "interface Gig0/0",
            "ip address 192.168.1.1 255.255.255.0",
            "no shutdown",
            "exit",
            "interface Gig0/1",
            "ip address 10.0.0.1 255.255.255.0",
            "no shutdown",
            "end",
            "show ip interface brief",
            "show running-config",
        ],
    )?;

    // A host checks its configuration and pings across the router.
    run_script(
        &mut topo,
        "pc1",
        &["ipconfig", "ping fileserver", "tracert 10.0.0.20"],
    )?;

    // Animate the ping: one marker per hop interval, linger on arrival.
    let Some(path) = find_path(topo.devices(), topo.links(), "pc1", "10.0.0.20") else {
        log::warn!("no path from pc1 to 10.0.0.20");
        return Ok(());
    };
    let mut scheduler = PacketScheduler::new();
    scheduler.spawn("ping-1", path, PacketKind::Ping);

    while !scheduler.is_empty() {
        for packet in scheduler.active() {
            log::info!("packet {} at {}", packet.id, packet.current_device());
        }
        scheduler.tick(600);
    }
    log::info!("packet delivered and removed");

    Ok(())
}
