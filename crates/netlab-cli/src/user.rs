//! User-mode commands for routers and switches.

use crate::command::{CommandContext, CommandResult, CommandSpec, Mode};

/// User-mode command table.
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "enable",
        aliases: &["en"],
        modes: &[Mode::User],
        description: "Enter privileged mode",
        run: enable,
    },
    CommandSpec {
        name: "exit",
        aliases: &[],
        modes: &[Mode::User],
        description: "Exit CLI",
        run: exit_cli,
    },
    CommandSpec {
        name: "help",
        aliases: &["?"],
        modes: &[Mode::User],
        description: "Show available commands",
        run: help,
    },
];

fn enable(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::blank().with_mode(Mode::Privileged)
}

// In user mode `exit` closes the console entirely; there is no mode below.
fn exit_cli(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines(Vec::<String>::new()).closing()
}

fn help(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines([
        "User mode commands:",
        "  enable - Enter privileged mode",
        "  exit   - Exit CLI",
        "",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ScopeChange;
    use netlab_model::{Device, DeviceKind, MemoryTopology};

    fn ctx(topo: &mut MemoryTopology) -> CommandContext<'_> {
        CommandContext {
            device: topo.device("r1").unwrap().clone(),
            mode: Mode::User,
            scope: None,
            store: topo,
        }
    }

    use netlab_model::TopologyStore;

    #[test]
    fn enable_moves_to_privileged() {
        let mut topo = MemoryTopology::new();
        topo.add_device(Device::new("r1", "R1", DeviceKind::Router));
        let mut ctx = ctx(&mut topo);
        let result = enable(&[], &mut ctx);
        assert_eq!(result.new_mode, Some(Mode::Privileged));
        assert_eq!(result.scope, ScopeChange::Unchanged);
    }

    #[test]
    fn exit_closes_with_no_output() {
        let mut topo = MemoryTopology::new();
        topo.add_device(Device::new("r1", "R1", DeviceKind::Router));
        let mut ctx = ctx(&mut topo);
        let result = exit_cli(&[], &mut ctx);
        assert!(result.close);
        assert!(result.output.is_empty());
    }
}
