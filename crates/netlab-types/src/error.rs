//! Error types for netlab.
//!
//! Command-level failures are never represented here: the CLI renders them
//! as `% ...` output lines and command dispatch is total over all input
//! strings. This enum covers the seams around the engine -- opening a
//! session on a device that no longer exists, decoding a saved topology,
//! and I/O in the demo binary.

use std::io;

/// Errors produced at the boundaries of the netlab core.
#[derive(Debug, thiserror::Error)]
pub enum NetlabError {
    #[error("unknown device: {0}")]
    UnknownDevice(String),

    #[error("topology error: {0}")]
    Topology(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, NetlabError>;
