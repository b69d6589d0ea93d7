//! Device configuration model and topology store.
//!
//! The topology (devices + cable links) is owned by the surrounding editor;
//! the CLI engine only reads it and pushes partial-replacement patches back
//! through the [`TopologyStore`] seam. Nothing here knows about HTTP,
//! storage, or UI layout.

mod device;
mod topology;

pub use device::{
    Device, DeviceKind, DhcpPool, DnsRecord, DnsRecordType, Interface, Ipv6RouteEntry,
    RouteEntry, RouteProtocol, SubInterface, VlanEntry,
};
pub use topology::{DevicePatch, Link, MemoryTopology, TopologyStore};
