//! Windows-style shell for PC and server devices. One flat table valid in
//! every mode; hosts never change mode.

use netlab_model::Device;
use netlab_sim::find_path;
use netlab_types::net::{autoconf_from_seed, in_same_subnet, is_valid_ipv4, mac_from_seed, seed_hash};

use crate::command::{ALL_MODES, CommandContext, CommandResult, CommandSpec};

/// Reply latencies for a successful ping, in milliseconds.
const PING_LATENCIES: [u32; 4] = [12, 14, 13, 11];

/// Host command table.
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "ipconfig",
        aliases: &[],
        modes: ALL_MODES,
        description: "Display IP configuration",
        run: ipconfig,
    },
    CommandSpec {
        name: "ping",
        aliases: &[],
        modes: ALL_MODES,
        description: "Test connectivity to a host",
        run: ping,
    },
    CommandSpec {
        name: "tracert",
        aliases: &[],
        modes: ALL_MODES,
        description: "Trace route to a host",
        run: tracert,
    },
    CommandSpec {
        name: "arp",
        aliases: &["arp -a"],
        modes: ALL_MODES,
        description: "Display ARP cache",
        run: arp,
    },
    CommandSpec {
        name: "nslookup",
        aliases: &[],
        modes: ALL_MODES,
        description: "Query DNS for hostname",
        run: nslookup,
    },
    CommandSpec {
        name: "hostname",
        aliases: &[],
        modes: ALL_MODES,
        description: "Display computer name",
        run: hostname,
    },
    CommandSpec {
        name: "systeminfo",
        aliases: &[],
        modes: ALL_MODES,
        description: "Display system information",
        run: systeminfo,
    },
    CommandSpec {
        name: "getmac",
        aliases: &[],
        modes: ALL_MODES,
        description: "Display MAC address",
        run: getmac,
    },
    CommandSpec {
        name: "whoami",
        aliases: &[],
        modes: ALL_MODES,
        description: "Display current user",
        run: whoami,
    },
    CommandSpec {
        name: "cls",
        aliases: &["clear"],
        modes: ALL_MODES,
        description: "Clear screen",
        run: cls,
    },
    CommandSpec {
        name: "exit",
        aliases: &[],
        modes: ALL_MODES,
        description: "Close terminal",
        run: exit_shell,
    },
    CommandSpec {
        name: "help",
        aliases: &["?"],
        modes: ALL_MODES,
        description: "Show available commands",
        run: help,
    },
];

// ---------------------------------------------------------------------------
// Resolution helpers
// ---------------------------------------------------------------------------

fn first_ip(device: &Device) -> Option<&str> {
    device.interfaces.first().and_then(|i| i.ip_address.as_deref())
}

fn find_device_by_ip<'a>(devices: &'a [Device], ip: &str) -> Option<&'a Device> {
    devices.iter().find(|d| d.owns_ipv4(ip))
}

/// Resolve a hostname to an IPv4 address: DNS records anywhere in the
/// topology first, then device labels and configured hostnames.
fn resolve_hostname(devices: &[Device], name: &str) -> Option<String> {
    let lower = name.to_lowercase();
    for device in devices {
        for record in &device.dns_records {
            if record.hostname.to_lowercase() == lower {
                return find_device_by_ip(devices, &record.ip_address)
                    .and_then(first_ip)
                    .map(str::to_string);
            }
        }
    }
    devices
        .iter()
        .find(|d| {
            d.label.to_lowercase() == lower
                || d.hostname.as_deref().is_some_and(|h| h.to_lowercase() == lower)
        })
        .and_then(first_ip)
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn ipconfig(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let show_all = args.first().is_some_and(|a| a.eq_ignore_ascii_case("/all"));
    let mut out = vec![String::new(), "Windows IP Configuration".to_string(), String::new()];

    for iface in &ctx.device.interfaces {
        let seed = format!("{}{}", ctx.device.id, iface.name);
        out.push(format!("Ethernet adapter {}:", iface.name));
        out.push(String::new());
        if show_all {
            out.push(format!(
                "   Description . . . . . . . . . . . : {}",
                iface.description.as_deref().unwrap_or("Network Adapter")
            ));
        }
        out.push(format!(
            "   Physical Address. . . . . . . . . : {}",
            mac_from_seed(&seed)
        ));
        if let Some(ip) = &iface.ip_address {
            out.push(format!("   IPv4 Address. . . . . . . . . . . : {ip}"));
            out.push(format!(
                "   Subnet Mask . . . . . . . . . . . : {}",
                iface.subnet_mask.as_deref().unwrap_or("255.255.255.0")
            ));
            if let Some(gateway) = &iface.gateway {
                out.push(format!("   Default Gateway . . . . . . . . . : {gateway}"));
            }
        } else {
            out.push(format!(
                "   Autoconfiguration IPv4 Address. . : {}",
                autoconf_from_seed(&seed)
            ));
            out.push("   Subnet Mask . . . . . . . . . . . : 255.255.0.0".to_string());
        }
        if show_all && let Some(ipv6) = &iface.ipv6_address {
            out.push(format!("   IPv6 Address. . . . . . . . . . . : {ipv6}"));
        }
        out.push(String::new());
    }

    CommandResult::lines(out)
}

/// Resolve a ping/tracert target: a literal IPv4 address passes through,
/// anything else goes through hostname resolution.
fn resolve_target(ctx: &CommandContext<'_>, target: &str) -> Option<String> {
    if is_valid_ipv4(target) {
        Some(target.to_string())
    } else {
        resolve_hostname(ctx.store.devices(), target)
    }
}

fn reachable(ctx: &CommandContext<'_>, target_ip: &str) -> Option<Vec<String>> {
    find_path(ctx.store.devices(), ctx.store.links(), &ctx.device.id, target_ip)
}

fn ping(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let Some(target) = args.first() else {
        return CommandResult::lines(["Usage: ping <hostname|IP address>", ""]);
    };

    let Some(target_ip) = resolve_target(ctx, target) else {
        return CommandResult::lines([
            String::new(),
            format!(
                "Ping request could not find host {target}. Please check the name and try again."
            ),
            String::new(),
        ]);
    };

    let mut out = vec![String::new()];
    if is_valid_ipv4(target) {
        out.push(format!("Pinging {target} with 32 bytes of data:"));
    } else {
        out.push(format!("Pinging {target} [{target_ip}] with 32 bytes of data:"));
    }

    match reachable(ctx, &target_ip) {
        Some(path) => {
            let ttl = 64u32.saturating_sub(path.len() as u32);
            for latency in PING_LATENCIES {
                out.push(format!(
                    "Reply from {target_ip}: bytes=32 time={latency}ms TTL={ttl}"
                ));
            }
            out.push(String::new());
            out.push(format!("Ping statistics for {target_ip}:"));
            out.push("    Packets: Sent = 4, Received = 4, Lost = 0 (0% loss),".to_string());
            out.push("Approximate round trip times in milli-seconds:".to_string());
            out.push("    Minimum = 11ms, Maximum = 14ms, Average = 12ms".to_string());
        }
        None => {
            for _ in 0..4 {
                out.push("Request timed out.".to_string());
            }
            out.push(String::new());
            out.push(format!("Ping statistics for {target_ip}:"));
            out.push("    Packets: Sent = 4, Received = 0, Lost = 4 (100% loss),".to_string());
        }
    }
    out.push(String::new());
    CommandResult::lines(out)
}

fn tracert(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let Some(target) = args.first() else {
        return CommandResult::lines(["Usage: tracert <hostname|IP address>", ""]);
    };

    let Some(target_ip) = resolve_target(ctx, target) else {
        return CommandResult::lines([
            String::new(),
            format!("Unable to resolve target system name {target}."),
            String::new(),
        ]);
    };

    let mut out = vec![String::new()];
    if is_valid_ipv4(target) {
        out.push(format!("Tracing route to {target}"));
    } else {
        out.push(format!("Tracing route to {target} [{target_ip}]"));
    }
    out.push("over a maximum of 30 hops:".to_string());
    out.push(String::new());

    match reachable(ctx, &target_ip) {
        Some(path) => {
            let devices = ctx.store.devices();
            for (index, hop_id) in path.iter().enumerate() {
                let addr = if index == path.len() - 1 {
                    target_ip.clone()
                } else {
                    devices
                        .iter()
                        .find(|d| &d.id == hop_id)
                        .and_then(first_ip)
                        .unwrap_or("0.0.0.0")
                        .to_string()
                };
                let latency = if index == 0 {
                    "<1".to_string()
                } else {
                    (index * 3 + 1).to_string()
                };
                out.push(format!(
                    "  {}    {latency} ms    {latency} ms    {latency} ms  {addr}",
                    index + 1
                ));
            }
            out.push(String::new());
            out.push("Trace complete.".to_string());
        }
        None => {
            let source_ip = first_ip(&ctx.device).unwrap_or("0.0.0.0");
            out.push(format!("  1    <1 ms    <1 ms    <1 ms  {source_ip}"));
            out.push("  2     *        *        *     Request timed out.".to_string());
            out.push("  3     *        *        *     Request timed out.".to_string());
            out.push(String::new());
            out.push("Trace complete - Destination unreachable.".to_string());
        }
    }
    out.push(String::new());
    CommandResult::lines(out)
}

fn arp(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let source = ctx.device.interfaces.first();
    let source_ip = source.and_then(|i| i.ip_address.as_deref()).unwrap_or("0.0.0.0");

    let mut out = vec![String::new(), format!("Interface: {source_ip} --- 0x1")];
    out.push("  Internet Address      Physical Address      Type".to_string());

    if let Some(gateway) = source.and_then(|i| i.gateway.as_deref()) {
        out.push(format!("  {gateway:<22}{}  dynamic", mac_from_seed("gateway")));
    }

    if let Some(iface) = source
        && let (Some(ip), Some(mask)) = (iface.ip_address.clone(), iface.subnet_mask.clone())
    {
        for neighbor in ctx.store.devices() {
            if neighbor.id == ctx.device.id {
                continue;
            }
            for niface in &neighbor.interfaces {
                if let Some(nip) = &niface.ip_address
                    && in_same_subnet(&ip, nip, &mask)
                {
                    let seed = format!("{}{}", neighbor.id, niface.name);
                    out.push(format!("  {nip:<22}{}  dynamic", mac_from_seed(&seed)));
                }
            }
        }
    }

    if source.and_then(|i| i.ip_address.as_deref()).is_some() {
        let octets: Vec<&str> = source_ip.split('.').take(3).collect();
        out.push(format!(
            "  {}.255         ff-ff-ff-ff-ff-ff  static",
            octets.join(".")
        ));
    }
    out.push(String::new());
    CommandResult::lines(out)
}

fn nslookup(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let Some(query) = args.first() else {
        return CommandResult::lines(["Usage: nslookup <hostname>", ""]);
    };
    let dns_server = ctx
        .device
        .interfaces
        .first()
        .and_then(|i| i.gateway.as_deref())
        .unwrap_or("8.8.8.8")
        .to_string();

    let mut out = vec![
        String::new(),
        format!("Server:  {dns_server}"),
        format!("Address:  {dns_server}"),
        String::new(),
    ];

    let local = query.contains(".local") || !query.contains('.');
    if local {
        let lower = query.to_lowercase();
        let record = ctx.store.devices().iter().find_map(|d| {
            d.dns_records
                .iter()
                .find(|r| r.hostname.to_lowercase() == lower)
        });
        match record {
            Some(record) => {
                out.push(format!("Name:    {}", record.hostname));
                out.push(format!("Address:  {}", record.ip_address));
            }
            None => out.push(format!(
                "*** {dns_server} can't find {query}: Non-existent domain"
            )),
        }
    } else {
        // External names get a canned answer; there is no outside world.
        out.push(format!("Name:    {query}"));
        out.push("Addresses:  93.184.216.34".to_string());
        out.push("            2606:2800:220:1:248:1893:25c8:1946".to_string());
    }
    out.push(String::new());
    CommandResult::lines(out)
}

fn hostname(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines([ctx.device.display_hostname().to_string(), String::new()])
}

fn systeminfo(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let mut out = vec![
        String::new(),
        format!("Host Name:                 {}", ctx.device.display_hostname()),
        "OS Name:                   Microsoft Windows 10 Pro".to_string(),
        "OS Version:                10.0.19044 N/A Build 19044".to_string(),
        "System Type:               x64-based PC".to_string(),
        format!(
            "Network Card(s):           {} NIC(s) Installed.",
            ctx.device.interfaces.len()
        ),
    ];
    for (idx, iface) in ctx.device.interfaces.iter().enumerate() {
        out.push(format!(
            "                           [0{}]: {}",
            idx + 1,
            iface.name
        ));
        if let Some(ip) = &iface.ip_address {
            out.push(format!(
                "                                 IP Address: {ip}"
            ));
        }
    }
    out.push(String::new());
    CommandResult::lines(out)
}

fn getmac(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let mut out = vec![
        String::new(),
        "Physical Address    Transport Name".to_string(),
        "==================  =========================================================="
            .to_string(),
    ];
    for iface in &ctx.device.interfaces {
        let seed = format!("{}{}", ctx.device.id, iface.name);
        let transport = format!("{:09X}", seed_hash(&seed).unsigned_abs());
        out.push(format!(
            "{}  \\Device\\Tcpip_{{{transport}}}",
            mac_from_seed(&seed)
        ));
    }
    out.push(String::new());
    CommandResult::lines(out)
}

fn whoami(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines([format!("{}\\Administrator", ctx.device.label), String::new()])
}

fn cls(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines(Vec::<String>::new()).clearing_screen()
}

fn exit_shell(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines(Vec::<String>::new()).closing()
}

fn help(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines([
        "Available commands:",
        "  ipconfig [/all]          - Display IP configuration",
        "  ping <host>              - Test connectivity to a host",
        "  tracert <host>           - Trace route to a host",
        "  arp -a                   - Display ARP cache",
        "  nslookup <hostname>      - Query DNS for hostname",
        "  hostname                 - Display computer name",
        "  systeminfo               - Display system information",
        "  getmac                   - Display MAC address",
        "  whoami                   - Display current user",
        "  cls                      - Clear screen",
        "  exit                     - Close terminal",
        "",
    ])
}
