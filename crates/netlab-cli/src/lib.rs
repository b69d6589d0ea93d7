//! Device CLI simulation engine.
//!
//! Commands are plain data records ([`command::CommandSpec`]) kept in static
//! catalog tables partitioned by operating mode and device personality:
//! Cisco-IOS-like for routers and switches, Windows-shell-like for PCs and
//! servers. A [`Registry`] resolves raw input (multi-word names, aliases,
//! mode gating) and a [`Session`] holds the per-console state machine,
//! prompt, and transcript.

pub mod command;
mod config;
mod host;
mod interface;
mod privileged;
mod registry;
mod session;
mod show;
mod user;

pub use command::{CommandContext, CommandResult, CommandSpec, Mode, ScopeChange};
pub use registry::Registry;
pub use session::{Session, render_prompt};
