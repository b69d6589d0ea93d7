//! Interface configuration mode. Every mutation here rebuilds the device's
//! interface list from the session snapshot and pushes it back through a
//! patch, keeping the store the single writer.

use netlab_model::{DeviceKind, DevicePatch, Interface, SubInterface, VlanEntry};

use crate::command::{CommandContext, CommandResult, CommandSpec, Mode, ScopeChange};

/// Interface-mode command table.
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "ip address",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Set IP address",
        run: ip_address,
    },
    CommandSpec {
        name: "ipv6 address",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Set IPv6 address",
        run: ipv6_address,
    },
    CommandSpec {
        name: "ipv6 enable",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Enable IPv6 on interface",
        run: ipv6_enable,
    },
    CommandSpec {
        name: "no ipv6 address",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Remove IPv6 address",
        run: no_ipv6_address,
    },
    CommandSpec {
        name: "no shutdown",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Enable interface",
        run: no_shutdown,
    },
    CommandSpec {
        name: "shutdown",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Disable interface",
        run: shutdown,
    },
    CommandSpec {
        name: "description",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Set interface description",
        run: description,
    },
    CommandSpec {
        name: "encapsulation",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Set encapsulation type",
        run: encapsulation,
    },
    CommandSpec {
        name: "switchport",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Set switchport configuration",
        run: switchport,
    },
    CommandSpec {
        name: "exit",
        aliases: &[],
        modes: &[Mode::Interface],
        description: "Return to config mode",
        run: exit_scope,
    },
    CommandSpec {
        name: "help",
        aliases: &["?"],
        modes: &[Mode::Interface],
        description: "Show available commands",
        run: help,
    },
];

/// Rewrite the scoped physical interface and push the list back.
fn edit_scoped(ctx: &mut CommandContext<'_>, edit: impl FnOnce(&mut Interface)) -> CommandResult {
    let scope = ctx.scope_name().to_string();
    let mut interfaces = ctx.device.interfaces.clone();
    if let Some(iface) = interfaces.iter_mut().find(|i| i.name == scope) {
        edit(iface);
    }
    ctx.update(DevicePatch::interfaces(interfaces));
    CommandResult::blank()
}

/// Create or update the scoped sub-interface under its parent. Addressing
/// or encapsulating a sub-interface implies a trunked parent link.
fn edit_scoped_sub(
    ctx: &mut CommandContext<'_>,
    edit: impl FnOnce(&mut SubInterface),
) -> CommandResult {
    let scope = ctx.scope_name().to_string();
    let parent = scope.split('.').next().unwrap_or(&scope).to_string();
    let mut interfaces = ctx.device.interfaces.clone();
    if let Some(iface) = interfaces.iter_mut().find(|i| i.name == parent) {
        let idx = match iface.sub_interfaces.iter().position(|s| s.name == scope) {
            Some(idx) => idx,
            None => {
                iface.sub_interfaces.push(SubInterface::from_dotted_name(&scope));
                iface.sub_interfaces.len() - 1
            }
        };
        edit(&mut iface.sub_interfaces[idx]);
        iface.trunk_mode = true;
    }
    ctx.update(DevicePatch::interfaces(interfaces));
    CommandResult::blank()
}

fn in_sub_interface(ctx: &CommandContext<'_>) -> bool {
    ctx.scope_name().contains('.')
}

fn ip_address(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let [address, mask, ..] = args else {
        return CommandResult::incomplete();
    };
    let address = (*address).to_string();
    let mask = (*mask).to_string();
    if in_sub_interface(ctx) {
        edit_scoped_sub(ctx, |sub| {
            sub.ip_address = Some(address);
            sub.subnet_mask = Some(mask);
        })
    } else {
        edit_scoped(ctx, |iface| {
            iface.ip_address = Some(address);
            iface.subnet_mask = Some(mask);
        })
    }
}

fn ipv6_address(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let Some(address_with_prefix) = args.first() else {
        return CommandResult::incomplete();
    };
    let (address, prefix) = match address_with_prefix.split_once('/') {
        Some((addr, p)) => (addr.to_string(), p.parse().unwrap_or(64)),
        None => ((*address_with_prefix).to_string(), 64),
    };
    if in_sub_interface(ctx) {
        edit_scoped_sub(ctx, |sub| {
            sub.ipv6_address = Some(address);
            sub.ipv6_prefix_length = Some(prefix);
            sub.ipv6_enabled = true;
        })
    } else {
        edit_scoped(ctx, |iface| {
            iface.ipv6_address = Some(address);
            iface.ipv6_prefix_length = Some(prefix);
            iface.ipv6_enabled = true;
        })
    }
}

fn ipv6_enable(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    edit_scoped(ctx, |iface| iface.ipv6_enabled = true)
}

fn no_ipv6_address(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    edit_scoped(ctx, |iface| {
        iface.ipv6_address = None;
        iface.ipv6_prefix_length = None;
        iface.ipv6_enabled = false;
    })
}

fn no_shutdown(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    edit_scoped(ctx, |iface| iface.enabled = true)
}

fn shutdown(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    edit_scoped(ctx, |iface| iface.enabled = false)
}

fn description(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    if args.is_empty() {
        return CommandResult::incomplete();
    }
    let text = args.join(" ");
    edit_scoped(ctx, |iface| iface.description = Some(text))
}

fn encapsulation(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    if ctx.device.kind != DeviceKind::Router {
        return CommandResult::wrong_device();
    }
    if args.len() < 2 || !args[0].eq_ignore_ascii_case("dot1q") {
        return CommandResult::error(
            "% Invalid encapsulation type. Use: encapsulation dot1Q <vlan-id>",
        );
    }
    let Some(vlan_id) = args[1].parse::<u16>().ok().filter(|v| (1..=4094).contains(v)) else {
        return CommandResult::error("% Invalid VLAN ID");
    };
    edit_scoped_sub(ctx, |sub| sub.vlan_id = vlan_id)
}

fn switchport(args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    if ctx.device.kind != DeviceKind::Switch {
        return CommandResult::wrong_device();
    }
    if args.is_empty() {
        return CommandResult::incomplete();
    }

    match args {
        ["mode", "access", ..] => edit_scoped(ctx, |iface| {
            iface.trunk_mode = false;
            iface.allowed_vlans = None;
            iface.native_vlan = None;
        }),
        ["mode", "trunk", ..] => edit_scoped(ctx, |iface| {
            iface.trunk_mode = true;
            // Defaults only where nothing was configured yet.
            if iface.allowed_vlans.is_none() {
                iface.allowed_vlans = Some(vec![1]);
            }
            if iface.native_vlan.is_none() {
                iface.native_vlan = Some(1);
            }
        }),
        ["trunk", "allowed", "vlan", rest @ ..] => {
            if rest.is_empty() {
                return CommandResult::error("% Usage: switchport trunk allowed vlan <vlan-list>");
            }
            // The list may arrive split across tokens ("10, 20,30").
            let list: Vec<u16> = rest
                .concat()
                .split(',')
                .filter_map(|v| v.trim().parse().ok())
                .collect();
            edit_scoped(ctx, |iface| {
                if iface.trunk_mode {
                    iface.allowed_vlans = Some(list);
                }
            })
        }
        ["trunk", "native", "vlan", rest @ ..] => {
            let Some(vlan_id) = rest.first().and_then(|v| v.parse::<u16>().ok()) else {
                return CommandResult::error("% Invalid VLAN ID");
            };
            edit_scoped(ctx, |iface| {
                if iface.trunk_mode {
                    iface.native_vlan = Some(vlan_id);
                }
            })
        }
        ["access", "vlan", rest @ ..] => {
            let Some(vlan_id) = rest.first().and_then(|v| v.parse::<u16>().ok()) else {
                return CommandResult::error("% Invalid VLAN ID");
            };
            access_vlan(ctx, vlan_id)
        }
        _ => CommandResult::error("% Invalid switchport command"),
    }
}

/// Dual write: the interface's access VLAN field and the VLAN table's port
/// lists move together. The port joins the target VLAN's list and leaves
/// every other VLAN's list.
fn access_vlan(ctx: &mut CommandContext<'_>, vlan_id: u16) -> CommandResult {
    let scope = ctx.scope_name().to_string();

    let vlans: Vec<VlanEntry> = ctx
        .device
        .vlans
        .iter()
        .map(|vlan| {
            let mut vlan = vlan.clone();
            if vlan.id == vlan_id {
                if !vlan.ports.contains(&scope) {
                    vlan.ports.push(scope.clone());
                }
            } else {
                vlan.ports.retain(|p| p != &scope);
            }
            vlan
        })
        .collect();

    let mut interfaces = ctx.device.interfaces.clone();
    if let Some(iface) = interfaces.iter_mut().find(|i| i.name == scope) {
        iface.vlan_id = Some(vlan_id);
    }

    ctx.update(DevicePatch {
        interfaces: Some(interfaces),
        vlans: Some(vlans),
        ..DevicePatch::default()
    });
    CommandResult::blank()
}

fn exit_scope(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::blank()
        .with_mode(Mode::Config)
        .with_scope(ScopeChange::Clear)
}

fn help(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let mut output = vec![
        "Interface configuration commands:".to_string(),
        "  ip address IP MASK       - Set IPv4 address".to_string(),
        "  ipv6 address ADDR/PREFIX - Set IPv6 address".to_string(),
        "  ipv6 enable              - Enable IPv6 on interface".to_string(),
        "  no ipv6 address          - Remove IPv6 address".to_string(),
        "  no shutdown              - Enable interface".to_string(),
        "  shutdown                 - Disable interface".to_string(),
        "  description TEXT         - Set interface description".to_string(),
    ];
    if ctx.device.kind == DeviceKind::Switch {
        output.push("  switchport mode access   - Set as access port".to_string());
        output.push("  switchport mode trunk    - Set as trunk port (802.1Q)".to_string());
        output.push("  switchport access vlan N - Assign to VLAN (access mode)".to_string());
        output.push("  switchport trunk allowed vlan <list> - Set allowed VLANs (trunk)".to_string());
        output.push("  switchport trunk native vlan N - Set native VLAN (trunk)".to_string());
    }
    if ctx.device.kind == DeviceKind::Router && in_sub_interface(ctx) {
        output.push("  encapsulation dot1Q N    - Set VLAN encapsulation (sub-interface)".to_string());
    }
    output.push("  exit                     - Return to config mode".to_string());
    output.push(String::new());
    CommandResult::lines(output)
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

    fn scoped<'a>(topo: &'a mut MemoryTopology, scope: &str) -> CommandContext<'a> {
        CommandContext {
            device: topo.device("d1").unwrap().clone(),
            mode: Mode::Interface,
            scope: Some(scope.to_string()),
            store: topo,
        }
    }

    fn refresh<'a>(topo: &'a mut MemoryTopology, scope: &str) -> CommandContext<'a> {
        scoped(topo, scope)
    }

    #[test]
    fn ip_address_writes_scoped_interface() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = scoped(&mut topo, "Gig0/0");
        ip_address(&["10.0.1.1", "255.255.255.0"], &mut ctx);
        let iface = &topo.device("d1").unwrap().interfaces[0];
        assert_eq!(iface.ip_address.as_deref(), Some("10.0.1.1"));
        assert_eq!(iface.subnet_mask.as_deref(), Some("255.255.255.0"));
    }

    #[test]
    fn ip_address_on_sub_interface_creates_and_trunks_parent() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = scoped(&mut topo, "Gig0/0.10");
        ip_address(&["192.168.10.1", "255.255.255.0"], &mut ctx);

        let parent = &topo.device("d1").unwrap().interfaces[0];
        assert!(parent.trunk_mode);
        assert_eq!(parent.sub_interfaces.len(), 1);
        let sub = &parent.sub_interfaces[0];
        assert_eq!(sub.name, "Gig0/0.10");
        assert_eq!(sub.vlan_id, 10);
        assert_eq!(sub.ip_address.as_deref(), Some("192.168.10.1"));
    }

    #[test]
    fn ipv6_address_on_sub_interface_trunks_parent() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = scoped(&mut topo, "Gig0/0.20");
        ipv6_address(&["2001:db8:20::1/64"], &mut ctx);

        let parent = &topo.device("d1").unwrap().interfaces[0];
        assert!(parent.trunk_mode);
        let sub = &parent.sub_interfaces[0];
        assert_eq!(sub.ipv6_address.as_deref(), Some("2001:db8:20::1"));
        assert_eq!(sub.ipv6_prefix_length, Some(64));
        assert!(sub.ipv6_enabled);
    }

    #[test]
    fn shutdown_round_trip() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = scoped(&mut topo, "Gig0/0");
        shutdown(&[], &mut ctx);
        assert!(!topo.device("d1").unwrap().interfaces[0].enabled);
        let mut ctx = refresh(&mut topo, "Gig0/0");
        no_shutdown(&[], &mut ctx);
        assert!(topo.device("d1").unwrap().interfaces[0].enabled);
    }

    #[test]
    fn description_joins_arguments() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = scoped(&mut topo, "Gig0/0");
        description(&["uplink", "to", "core"], &mut ctx);
        assert_eq!(
            topo.device("d1").unwrap().interfaces[0].description.as_deref(),
            Some("uplink to core")
        );
    }

    #[test]
    fn encapsulation_validates_type_and_vlan() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = scoped(&mut topo, "Gig0/0.30");
        assert_eq!(
            encapsulation(&["isl", "30"], &mut ctx).output,
            vec!["% Invalid encapsulation type. Use: encapsulation dot1Q <vlan-id>".to_string()]
        );
        assert_eq!(
            encapsulation(&["dot1Q", "5000"], &mut ctx).output,
            vec!["% Invalid VLAN ID".to_string()]
        );
        encapsulation(&["dot1Q", "30"], &mut ctx);
        let parent = &topo.device("d1").unwrap().interfaces[0];
        assert!(parent.trunk_mode);
        assert_eq!(parent.sub_interfaces[0].vlan_id, 30);
    }

    #[test]
    fn switchport_is_switch_only() {
        let mut topo = topo_with(DeviceKind::Router);
        let mut ctx = scoped(&mut topo, "Gig0/0");
        assert_eq!(
            switchport(&["mode", "trunk"], &mut ctx).output,
            vec!["% Invalid command for this device type".to_string()]
        );
    }

    #[test]
    fn trunk_mode_defaults_do_not_clobber_existing_config() {
        let mut topo = topo_with(DeviceKind::Switch);
        let mut ctx = scoped(&mut topo, "Fa0/1");
        switchport(&["mode", "trunk"], &mut ctx);
        let iface = &topo.device("d1").unwrap().interfaces[0];
        assert!(iface.trunk_mode);
        assert_eq!(iface.allowed_vlans, Some(vec![1]));
        assert_eq!(iface.native_vlan, Some(1));

        let mut ctx = refresh(&mut topo, "Fa0/1");
        switchport(&["trunk", "allowed", "vlan", "10,20"], &mut ctx);
        let mut ctx = refresh(&mut topo, "Fa0/1");
        switchport(&["mode", "trunk"], &mut ctx);
        assert_eq!(
            topo.device("d1").unwrap().interfaces[0].allowed_vlans,
            Some(vec![10, 20])
        );
    }

    #[test]
    fn allowed_vlan_list_tolerates_whitespace() {
        let mut topo = topo_with(DeviceKind::Switch);
        let mut ctx = scoped(&mut topo, "Fa0/1");
        switchport(&["mode", "trunk"], &mut ctx);
        let mut ctx = refresh(&mut topo, "Fa0/1");
        switchport(&["trunk", "allowed", "vlan", "10,", "20,30"], &mut ctx);
        assert_eq!(
            topo.device("d1").unwrap().interfaces[0].allowed_vlans,
            Some(vec![10, 20, 30])
        );
    }

    #[test]
    fn allowed_vlan_requires_trunk_mode() {
        let mut topo = topo_with(DeviceKind::Switch);
        let mut ctx = scoped(&mut topo, "Fa0/1");
        switchport(&["trunk", "allowed", "vlan", "10,20"], &mut ctx);
        assert_eq!(topo.device("d1").unwrap().interfaces[0].allowed_vlans, None);
    }

    #[test]
    fn access_vlan_moves_port_between_vlan_lists() {
        let mut topo = topo_with(DeviceKind::Switch);
        {
            let dev = topo.device("d1").unwrap().clone();
            let mut vlans = dev.vlans;
            vlans.push(VlanEntry::new(10));
            vlans.push(VlanEntry::new(20));
            topo.update_device("d1", DevicePatch::vlans(vlans));
        }

        let mut ctx = scoped(&mut topo, "Fa0/2");
        switchport(&["access", "vlan", "10"], &mut ctx);
        let dev = topo.device("d1").unwrap();
        assert_eq!(dev.interfaces[1].vlan_id, Some(10));
        assert_eq!(dev.vlans[0].ports, vec!["Fa0/2".to_string()]);

        let mut ctx = refresh(&mut topo, "Fa0/2");
        switchport(&["access", "vlan", "20"], &mut ctx);
        let dev = topo.device("d1").unwrap();
        assert_eq!(dev.interfaces[1].vlan_id, Some(20));
        assert!(dev.vlans[0].ports.is_empty());
        assert_eq!(dev.vlans[1].ports, vec!["Fa0/2".to_string()]);
    }

    #[test]
    fn unknown_switchport_subcommand() {
        let mut topo = topo_with(DeviceKind::Switch);
        let mut ctx = scoped(&mut topo, "Fa0/1");
        assert_eq!(
            switchport(&["voice", "vlan", "5"], &mut ctx).output,
            vec!["% Invalid switchport command".to_string()]
        );
    }

    #[test]
    fn exit_clears_scope_and_returns_to_config() {
        let mut topo = topo_with(DeviceKind::Switch);
        let mut ctx = scoped(&mut topo, "Fa0/1");
        let result = exit_scope(&[], &mut ctx);
        assert_eq!(result.new_mode, Some(Mode::Config));
        assert_eq!(result.scope, ScopeChange::Clear);
    }
}
