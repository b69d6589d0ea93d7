//! Command registry: name/alias resolution with greedy longest-match and
//! mode gating.

use std::collections::HashMap;

use netlab_model::DeviceKind;

use crate::command::{CommandContext, CommandResult, CommandSpec};
use crate::{config, host, interface, privileged, show, user};

/// Resolves raw input lines against an immutable catalog.
///
/// The catalog is selected by device personality at construction time and
/// never changes for the session's lifetime: routers and switches get the
/// user/privileged/config/interface tables, PCs and servers get the flat
/// host table valid in every mode.
pub struct Registry {
    // A name maps to one spec per mode set: `exit` and `help` exist
    // separately in the user, privileged, config, and interface tables.
    commands: HashMap<String, Vec<&'static CommandSpec>>,
}

impl Registry {
    /// Build the registry for a device personality.
    pub fn for_kind(kind: DeviceKind) -> Self {
        let mut registry = Self {
            commands: HashMap::new(),
        };
        if kind.is_host() {
            registry.register(host::COMMANDS);
        } else {
            registry.register(user::COMMANDS);
            registry.register(privileged::COMMANDS);
            registry.register(show::COMMANDS);
            registry.register(config::COMMANDS);
            registry.register(interface::COMMANDS);
        }
        registry
    }

    fn register(&mut self, specs: &'static [CommandSpec]) {
        for spec in specs {
            self.commands
                .entry(spec.name.to_lowercase())
                .or_default()
                .push(spec);
            for alias in spec.aliases {
                self.commands
                    .entry(alias.to_lowercase())
                    .or_default()
                    .push(spec);
            }
        }
    }

    /// Look up a descriptor by name or alias (tests and help listings).
    /// Where a name exists in several mode tables, the first registered
    /// descriptor is returned.
    pub fn lookup(&self, name: &str) -> Option<&'static CommandSpec> {
        self.commands
            .get(&name.to_lowercase())
            .and_then(|specs| specs.first().copied())
    }

    /// Execute one input line. Total over all strings: unresolved input
    /// becomes a `% Invalid command` line, empty input a blank line --
    /// never an error.
    ///
    /// Multi-word names resolve greedily: the longest token prefix that
    /// names a command valid in the current mode wins, so `show ip route`
    /// is never shadowed by a shorter command sharing a leading token.
    /// Remaining tokens become arguments.
    pub fn execute(&self, input: &str, ctx: &mut CommandContext<'_>) -> CommandResult {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CommandResult::blank();
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        for take in (1..=parts.len()).rev() {
            let candidate = parts[..take].join(" ").to_lowercase();
            if let Some(spec) = self
                .commands
                .get(&candidate)
                .and_then(|specs| specs.iter().find(|s| s.available_in(ctx.mode)))
            {
                log::debug!("dispatch {:?} -> {}", ctx.mode, spec.name);
                return (spec.run)(&parts[take..], ctx);
            }
        }

        CommandResult::error(format!("% Invalid command: {}", parts[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Mode;
    use netlab_model::{Device, DeviceKind, MemoryTopology, TopologyStore};

    fn cisco_ctx(topo: &mut MemoryTopology, mode: Mode) -> CommandContext<'_> {
        let device = topo.device("r1").unwrap().clone();
        CommandContext {
            device,
            mode,
            scope: None,
            store: topo,
        }
    }

    fn router_topology() -> MemoryTopology {
        let mut topo = MemoryTopology::new();
        topo.add_device(Device::new("r1", "R1", DeviceKind::Router));
        topo
    }

    #[test]
    fn canonical_and_alias_resolve_to_same_descriptor() {
        let reg = Registry::for_kind(DeviceKind::Router);
        let by_name = reg.lookup("configure terminal").unwrap();
        let by_alias = reg.lookup("conf t").unwrap();
        assert!(std::ptr::eq(by_name, by_alias));
    }

    #[test]
    fn every_alias_in_catalog_resolves() {
        let reg = Registry::for_kind(DeviceKind::Router);
        for table in [
            user::COMMANDS,
            privileged::COMMANDS,
            show::COMMANDS,
            config::COMMANDS,
            interface::COMMANDS,
        ] {
            for spec in table {
                for alias in spec.aliases {
                    let resolved = reg.lookup(alias).unwrap();
                    assert_eq!(resolved.name, spec.name, "alias {alias} mismatch");
                }
            }
        }
    }

    #[test]
    fn empty_input_renders_blank_line() {
        let reg = Registry::for_kind(DeviceKind::Router);
        let mut topo = router_topology();
        let mut ctx = cisco_ctx(&mut topo, Mode::User);
        let result = reg.execute("   ", &mut ctx);
        assert_eq!(result.output, vec![String::new()]);
    }

    #[test]
    fn unresolved_command_reports_first_token() {
        let reg = Registry::for_kind(DeviceKind::Router);
        let mut topo = router_topology();
        let mut ctx = cisco_ctx(&mut topo, Mode::User);
        let result = reg.execute("bogus thing here", &mut ctx);
        assert_eq!(result.output, vec!["% Invalid command: bogus".to_string()]);
    }

    #[test]
    fn greedy_longest_match_wins() {
        let reg = Registry::for_kind(DeviceKind::Router);
        let mut topo = router_topology();
        let mut ctx = cisco_ctx(&mut topo, Mode::Privileged);
        // "show ip route" must resolve the three-token command, and its
        // output must be the routing-table header, not an invalid-command
        // line from a shorter prefix.
        let result = reg.execute("show ip route", &mut ctx);
        assert!(result.output[0].starts_with("Codes:"));
    }

    #[test]
    fn extra_tokens_become_arguments() {
        let reg = Registry::for_kind(DeviceKind::Router);
        let mut topo = router_topology();
        let mut ctx = cisco_ctx(&mut topo, Mode::Config);
        reg.execute("hostname CORE-A", &mut ctx);
        assert_eq!(
            topo.device("r1").unwrap().hostname.as_deref(),
            Some("CORE-A")
        );
    }

    #[test]
    fn mode_gating_rejects_out_of_mode_commands() {
        let reg = Registry::for_kind(DeviceKind::Router);
        let mut topo = router_topology();
        let mut ctx = cisco_ctx(&mut topo, Mode::User);
        let result = reg.execute("configure terminal", &mut ctx);
        assert_eq!(
            result.output,
            vec!["% Invalid command: configure".to_string()]
        );
        assert!(result.new_mode.is_none());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let reg = Registry::for_kind(DeviceKind::Router);
        let mut topo = router_topology();
        let mut ctx = cisco_ctx(&mut topo, Mode::User);
        let result = reg.execute("ENABLE", &mut ctx);
        assert_eq!(result.new_mode, Some(Mode::Privileged));
    }

    #[test]
    fn host_catalog_is_mode_agnostic() {
        let reg = Registry::for_kind(DeviceKind::Pc);
        let spec = reg.lookup("ipconfig").unwrap();
        for mode in [Mode::User, Mode::Privileged, Mode::Config, Mode::Interface] {
            assert!(spec.available_in(mode));
        }
    }

    #[test]
    fn host_catalog_excludes_cisco_commands() {
        let reg = Registry::for_kind(DeviceKind::Server);
        assert!(reg.lookup("configure terminal").is_none());
        assert!(reg.lookup("show running-config").is_none());
    }
}
