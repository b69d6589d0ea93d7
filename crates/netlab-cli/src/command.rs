//! Command descriptor records and the execution context handed to them.

use netlab_model::{Device, DevicePatch, TopologyStore};

/// CLI operating mode. Governs which commands resolve and how the prompt
/// renders. Host devices (PC/server) keep a single pseudo-mode; their
/// catalog lists every mode so gating never rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    User,
    Privileged,
    Config,
    Interface,
}

/// Every mode, for host commands that are valid anywhere.
pub const ALL_MODES: &[Mode] = &[Mode::User, Mode::Privileged, Mode::Config, Mode::Interface];

/// How a command wants the session's interface scope changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScopeChange {
    /// Leave the current scope alone.
    #[default]
    Unchanged,
    /// Drop the scope (leaving interface mode).
    Clear,
    /// Enter the named interface or sub-interface scope.
    Enter(String),
}

/// What a command produced: output lines plus the session transitions to
/// apply. Vendor CLIs are silent on success, so most mutations return a
/// single blank line.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    pub output: Vec<String>,
    pub new_mode: Option<Mode>,
    pub scope: ScopeChange,
    pub close: bool,
    pub clear_screen: bool,
}

impl CommandResult {
    /// The silent-success result: one blank output line.
    pub fn blank() -> Self {
        Self {
            output: vec![String::new()],
            ..Self::default()
        }
    }

    /// A result carrying the given output lines.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A single error line (the `% ...` taxonomy).
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            output: vec![message.into()],
            ..Self::default()
        }
    }

    /// The standard missing-arguments error.
    pub fn incomplete() -> Self {
        Self::error("% Incomplete command")
    }

    /// The wrong-device-kind error.
    pub fn wrong_device() -> Self {
        Self::error("% Invalid command for this device type")
    }

    /// Attach a mode transition.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.new_mode = Some(mode);
        self
    }

    /// Attach an interface-scope transition.
    pub fn with_scope(mut self, scope: ScopeChange) -> Self {
        self.scope = scope;
        self
    }

    /// Mark the session for teardown.
    pub fn closing(mut self) -> Self {
        self.close = true;
        self
    }

    /// Ask the console to wipe its transcript.
    pub fn clearing_screen(mut self) -> Self {
        self.clear_screen = true;
        self
    }
}

/// Everything a command sees while executing: a snapshot of its device,
/// the session's mode and interface scope, and the store for topology-wide
/// queries and configuration patches.
///
/// The device is a snapshot so commands can read freely; all writes go
/// through [`CommandContext::update`], never into the snapshot.
pub struct CommandContext<'a> {
    pub device: Device,
    pub mode: Mode,
    pub scope: Option<String>,
    pub store: &'a mut dyn TopologyStore,
}

impl CommandContext<'_> {
    /// Push a configuration patch for this session's device.
    pub fn update(&mut self, patch: DevicePatch) {
        self.store.update_device(&self.device.id, patch);
    }

    /// The current interface scope, or empty when none (commands gated to
    /// interface mode always have one in practice).
    pub fn scope_name(&self) -> &str {
        self.scope.as_deref().unwrap_or("")
    }
}

/// One command descriptor: a plain data record with an attached function.
///
/// The descriptor set is closed and lives in static per-mode tables; a
/// registry built at session-open time maps names and aliases onto these
/// records. No process-wide mutable state.
pub struct CommandSpec {
    /// Canonical name, possibly multi-word (`show running-config`).
    pub name: &'static str,
    /// Alternate spellings (`sh run`, `conf t`).
    pub aliases: &'static [&'static str],
    /// Modes the command resolves in.
    pub modes: &'static [Mode],
    /// One-line description for `help`.
    pub description: &'static str,
    /// The implementation.
    pub run: fn(&[&str], &mut CommandContext<'_>) -> CommandResult,
}

impl CommandSpec {
    /// Whether this command is eligible in the given mode.
    pub fn available_in(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_single_empty_line() {
        let r = CommandResult::blank();
        assert_eq!(r.output, vec![String::new()]);
        assert!(r.new_mode.is_none());
        assert!(!r.close);
    }

    #[test]
    fn builders_compose() {
        let r = CommandResult::blank()
            .with_mode(Mode::Interface)
            .with_scope(ScopeChange::Enter("Gig0/0".into()));
        assert_eq!(r.new_mode, Some(Mode::Interface));
        assert_eq!(r.scope, ScopeChange::Enter("Gig0/0".into()));
    }

    #[test]
    fn all_modes_covers_the_state_machine() {
        assert_eq!(ALL_MODES.len(), 4);
    }
}
