//! Reachability search and packet animation over the live topology graph.
//!
//! Both the CLI `ping`/`tracert` commands and the standalone network-tools
//! panel resolve paths through [`find_path`]; the canvas drives
//! [`PacketScheduler::tick`] to march packet markers along a resolved path.

mod animation;
mod path;

pub use animation::{ActivePacket, PacketKind, PacketScheduler};
pub use path::find_path;
