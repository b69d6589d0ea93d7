//! Foundation types for the netlab simulator core.
//!
//! Holds the shared error type and the small pile of address helpers
//! (IPv4 literal checks, subnet math, deterministic MAC derivation) that
//! both the CLI engine and the reachability code lean on.

pub mod error;
pub mod net;

pub use error::{NetlabError, Result};
