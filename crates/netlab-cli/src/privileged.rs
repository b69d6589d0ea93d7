//! Privileged-mode commands: mode transitions down into configuration and
//! back out to user mode. The `show` family lives in [`crate::show`].

use netlab_model::DeviceKind;

use crate::command::{CommandContext, CommandResult, CommandSpec, Mode};

/// Privileged-mode command table.
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "configure terminal",
        aliases: &["conf t"],
        modes: &[Mode::Privileged],
        description: "Enter configuration mode",
        run: configure_terminal,
    },
    CommandSpec {
        name: "disable",
        aliases: &[],
        modes: &[Mode::Privileged],
        description: "Return to user mode",
        run: to_user,
    },
    CommandSpec {
        name: "exit",
        aliases: &[],
        modes: &[Mode::Privileged],
        description: "Return to user mode",
        run: to_user,
    },
    CommandSpec {
        name: "help",
        aliases: &["?"],
        modes: &[Mode::Privileged],
        description: "Show available commands",
        run: help,
    },
];

fn configure_terminal(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::lines(["Enter configuration commands, one per line. End with CNTL/Z."])
        .with_mode(Mode::Config)
}

fn to_user(_args: &[&str], _ctx: &mut CommandContext<'_>) -> CommandResult {
    CommandResult::blank().with_mode(Mode::User)
}

fn help(_args: &[&str], ctx: &mut CommandContext<'_>) -> CommandResult {
    let mut output = vec![
        "Privileged mode commands:".to_string(),
        "  configure terminal       - Enter configuration mode".to_string(),
        "  show running-config      - Show running configuration".to_string(),
        "  show ip interface brief  - Show interface status".to_string(),
        "  show ip route            - Show routing table".to_string(),
        "  disable                  - Return to user mode".to_string(),
    ];
    if ctx.device.kind == DeviceKind::Switch {
        output.push("  show vlan brief          - Show VLAN configuration".to_string());
        output.push("  show interfaces trunk    - Show trunk port information".to_string());
    }
    output.push(String::new());
    CommandResult::lines(output)
}
