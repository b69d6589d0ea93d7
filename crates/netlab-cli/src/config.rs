//! Global configuration mode commands.

use netlab_model::{DeviceKind, DevicePatch, Ipv6RouteEntry, RouteEntry, RouteProtocol, VlanEntry};

use crate::command::{CommandContext, CommandResult, CommandSpec, Mode, ScopeChange};

/// Config-mode command table.
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "hostname",
        aliases: &[],
        modes: &[Mode::Config],
        description: "Set device hostname",
        run: hostname,
    },
    CommandSpec {
        name: "interface",
        aliases: &["int"],
        modes: &[Mode::Config],
        description: "Enter interface configuration",
        run: interface,
    },
    CommandSpec {
        name: "ip route",
        aliases: &[],
        modes: &[Mode::Config],
        description: "Add static route",
        run: ip_route,
    },
    CommandSpec {
        name: "ipv6 unicast-routing",
        aliases: &[],
        modes: &[Mode::Config],
        description: "Enable IPv6 routing",
        run: ipv6_unicast_routing,
    },
    CommandSpec {
        name: "ipv6 route",
        aliases: &[],
        modes: &[Mode::Config],
        description: "Add static IPv6 route",
        run: ipv6_route,
    },
    CommandSpec {
        name: "no ipv6 route",
        aliases: &[],
        modes: &[Mode::Config],
        description: "Remove static IPv6 route",
        run: no_ipv6_route,
    },
    CommandSpec {
        name: "vlan",
        aliases: &[],
        modes: &[Mode::Config],
        description: "Create VLAN",
        run: vlan,
    },
    CommandSpec {
        name: "exit",
        aliases: &[],
        modes: &[Mode::Config],
        description: "Exit configuration mode",
        run: to_privileged,
    },
    CommandSpec {
        name: "end",
        aliases: &[],
        modes: &[Mode::Config],
        description: "Exit configuration mode",
        run: to_privileged,
    },
    CommandSpec {
        name: "help",
        aliases: &["?"],
        modes: &[Mode::Config],
        description: "Show available commands",
        run: help,
    },
];

fn hostname(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    match args.first() {
        Some(name) => {
            ctx.update(DevicePatch::hostname(name));
            CommandResult::blank()
        }
        None => CommandResult::incomplete(),
    }
}

fn interface(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    if args.is_empty() {
        return CommandResult::incomplete();
    }
    let name = args.join(" ");

    // Dotted name targets a router sub-interface. Entry is navigational
    // only; the sub-interface record is created by `ip address` or
    // `encapsulation` inside the scope.
    if name.contains('.') {
        let parent = name.split('.').next().unwrap_or(&name);
        let parent_exists = ctx
            .device
            .interfaces
            .iter()
            .any(|i| i.name.eq_ignore_ascii_case(parent));
        if !parent_exists {
            return CommandResult::error(format!("% Invalid parent interface: {parent}"));
        }
        return CommandResult::blank()
            .with_mode(Mode::Interface)
            .with_scope(ScopeChange::Enter(name));
    }

    match ctx.device.find_interface(&name) {
        Some(iface) => {
            let canonical = iface.name.clone();
            CommandResult::blank()
                .with_mode(Mode::Interface)
                .with_scope(ScopeChange::Enter(canonical))
        }
        None => CommandResult::error(format!("% Invalid interface: {name}")),
    }
}

fn ip_route(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    if ctx.device.kind != DeviceKind::Router {
        return CommandResult::wrong_device();
    }
    let [network, mask, next_hop, ..] = args else {
        return CommandResult::incomplete();
    };
    let mut table = ctx.device.routing_table.clone();
    // Append always; duplicates are kept in insertion order.
    table.push(RouteEntry {
        network: (*network).to_string(),
        mask: (*mask).to_string(),
        next_hop: (*next_hop).to_string(),
        protocol: RouteProtocol::Static,
        metric: None,
    });
    ctx.update(DevicePatch::routing_table(table));
    CommandResult::blank()
}

fn ipv6_unicast_routing(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    ctx.update(DevicePatch::ipv6_enabled(true));
    CommandResult::blank()
}

fn ipv6_route(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let [network_with_prefix, next_hop, ..] = args else {
        return CommandResult::error(
            "% Incomplete command. Usage: ipv6 route <network/prefix> <next-hop>",
        );
    };
    let (network, prefix_length) = match network_with_prefix.split_once('/') {
        Some((net, prefix)) => (net, prefix.parse().unwrap_or(64)),
        None => (*network_with_prefix, 64),
    };
    let mut table = ctx.device.ipv6_routing_table.clone();
    table.push(Ipv6RouteEntry {
        network: network.to_string(),
        prefix_length,
        next_hop: (*next_hop).to_string(),
        protocol: RouteProtocol::Static,
        metric: None,
        admin_distance: None,
        exit_interface: None,
    });
    ctx.update(DevicePatch::ipv6_routing_table(table));
    CommandResult::blank()
}

fn no_ipv6_route(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let Some(network_with_prefix) = args.first() else {
        return CommandResult::incomplete();
    };
    let network = network_with_prefix
        .split('/')
        .next()
        .unwrap_or(network_with_prefix);
    let table: Vec<Ipv6RouteEntry> = ctx
        .device
        .ipv6_routing_table
        .iter()
        .filter(|r| r.network != network)
        .cloned()
        .collect();
    ctx.update(DevicePatch::ipv6_routing_table(table));
    CommandResult::blank()
}

fn vlan(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    if ctx.device.kind != DeviceKind::Switch {
        return CommandResult::wrong_device();
    }
    let Some(raw) = args.first() else {
        return CommandResult::incomplete();
    };
    let Some(id) = raw.parse::<u16>().ok().filter(|id| (1..=4094).contains(id)) else {
        return CommandResult::error("% Invalid VLAN ID");
    };
    // Idempotent: an existing id is left alone.
    if !ctx.device.vlans.iter().any(|v| v.id == id) {
        let mut vlans = ctx.device.vlans.clone();
        vlans.push(VlanEntry::new(id));
        ctx.update(DevicePatch::vlans(vlans));
    }
    CommandResult::blank()
}

fn to_privileged(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::blank().with_mode(Mode::Privileged)
}

fn help(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines([
        "Configuration mode commands:",
        "  hostname NAME            - Set device hostname",
        "  interface TYPE NUM       - Enter interface configuration",
        "  ip route NET MASK NH     - Add static IPv4 route (routers)",
        "  ipv6 unicast-routing     - Enable IPv6 routing globally",
        "  ipv6 route NET/PREFIX NH - Add static IPv6 route (routers)",
        "  no ipv6 route NET/PREFIX - Remove IPv6 static route",
        "  vlan ID                  - Create VLAN (switches)",
        "  exit                     - Exit configuration mode",
        "",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use netlab_model::{Device, MemoryTopology, TopologyStore};

    fn topo_with(kind: DeviceKind) -> MemoryTopology {
        let mut topo = MemoryTopology::new();
        topo.add_device(Device::new("d1", "D1", kind));
        topo
    }

    fn ctx(topo: &mut MemoryTopology) -> CommandContext<'_> {
        CommandContext {
            device: topo.device("d1").unwrap().clone(),
            mode: Mode::Config,
            scope: None,
            store: topo,
        }
    }

    #[test]
    fn hostname_requires_an_argument() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        assert_eq!(
            hostname(&[], &mut ctx).output,
            vec!["% Incomplete command".to_string()]
        );
        hostname(&["EDGE-1"], &mut ctx);
        assert_eq!(topo.device("d1").unwrap().hostname.as_deref(), Some("EDGE-1"));
    }

    #[test]
    fn interface_enters_scope_with_canonical_name() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        let result = interface(&["gig0/1"], &mut ctx);
        assert_eq!(result.new_mode, Some(Mode::Interface));
        assert_eq!(result.scope, ScopeChange::Enter("Gig0/1".into()));
    }

    #[test]
    fn interface_rejects_unknown_names() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        let result = interface(&["Serial0/0"], &mut ctx);
        assert_eq!(
            result.output,
            vec!["% Invalid interface: Serial0/0".to_string()]
        );
        assert!(result.new_mode.is_none());
    }

    #[test]
    fn sub_interface_requires_existing_parent() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        let ok = interface(&["Gig0/0.10"], &mut ctx);
        assert_eq!(ok.scope, ScopeChange::Enter("Gig0/0.10".into()));

        let bad = interface(&["Serial1.10"], &mut ctx);
        assert_eq!(
            bad.output,
            vec!["% Invalid parent interface: Serial1".to_string()]
        );
    }

    #[test]
    fn sub_interface_entry_is_navigational_only() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        interface(&["Gig0/0.10"], &mut ctx);
        // No sub-interface record until an address or encapsulation is set.
        assert!(topo.device("d1").unwrap().interfaces[0]
            .sub_interfaces
            .is_empty());
    }

    #[test]
    fn ip_route_appends_and_keeps_duplicates() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        ip_route(&["10.0.2.0", "255.255.255.0", "10.0.1.2"], &mut ctx);
        let mut ctx = CommandContext {
            device: topo.device("d1").unwrap().clone(),
            mode: Mode::Config,
            scope: None,
            store: &mut topo,
        };
        ip_route(&["10.0.2.0", "255.255.255.0", "10.0.1.2"], &mut ctx);
        assert_eq!(topo.device("d1").unwrap().routing_table.len(), 2);
    }

    #[test]
    fn ip_route_is_router_only() {
        let mut topo = topo_with(DeviceKind::Switch);
        let mut ctx = ctx(&mut topo);
        let result = ip_route(&["10.0.2.0", "255.255.255.0", "10.0.1.2"], &mut ctx);
        assert_eq!(
            result.output,
            vec!["% Invalid command for this device type".to_string()]
        );
    }

    #[test]
    fn ipv6_route_parses_prefix() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        ipv6_route(&["2001:db8:2::/64", "2001:db8:1::2"], &mut ctx);
        let table = &topo.device("d1").unwrap().ipv6_routing_table;
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].network, "2001:db8:2::");
        assert_eq!(table[0].prefix_length, 64);
        assert_eq!(table[0].next_hop, "2001:db8:1::2");
    }

    #[test]
    fn no_ipv6_route_removes_by_network() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        ipv6_route(&["2001:db8:2::/64", "2001:db8:1::2"], &mut ctx);
        let mut ctx = CommandContext {
            device: topo.device("d1").unwrap().clone(),
            mode: Mode::Config,
            scope: None,
            store: &mut topo,
        };
        no_ipv6_route(&["2001:db8:2::/64"], &mut ctx);
        assert!(topo.device("d1").unwrap().ipv6_routing_table.is_empty());
    }

    #[test]
    fn vlan_is_idempotent_and_range_checked() {
        let mut topo = topo_with(DeviceKind::Switch);
        let mut ctx = ctx(&mut topo);
        vlan(&["10"], &mut ctx);
        let mut ctx = CommandContext {
            device: topo.device("d1").unwrap().clone(),
            mode: Mode::Config,
            scope: None,
            store: &mut topo,
        };
        vlan(&["10"], &mut ctx);
        assert_eq!(topo.device("d1").unwrap().vlans.len(), 1);
        assert_eq!(topo.device("d1").unwrap().vlans[0].name, "VLAN10");

        let mut ctx = CommandContext {
            device: topo.device("d1").unwrap().clone(),
            mode: Mode::Config,
            scope: None,
            store: &mut topo,
        };
        assert_eq!(
            vlan(&["4095"], &mut ctx).output,
            vec!["% Invalid VLAN ID".to_string()]
        );
        assert_eq!(
            vlan(&["x"], &mut ctx).output,
            vec!["% Invalid VLAN ID".to_string()]
        );
    }

    #[test]
    fn vlan_rejected_on_routers() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        assert_eq!(
            vlan(&["10"], &mut ctx).output,
            vec!["% Invalid command for this device type".to_string()]
        );
    }

    #[test]
    fn exit_and_end_return_to_privileged() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = ctx(&mut topo);
        assert_eq!(to_privileged(&[], &mut ctx).new_mode, Some(Mode::Privileged));
    }
}
