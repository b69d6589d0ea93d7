//! Topology store: the live device/link graph and the mutation seam the
//! CLI engine writes through.

use serde::{Deserialize, Serialize};

use netlab_types::Result;

use crate::device::{Device, Interface, Ipv6RouteEntry, RouteEntry, VlanEntry};

/// A cable between two devices. Undirected for traversal purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

impl Link {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// Whether this link touches the given device id.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    /// The far end of the link from `id`, if the link touches it.
    pub fn peer_of(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(&self.target)
        } else if self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// A partial-replacement update to one device's configuration.
///
/// Each populated field replaces the corresponding device field wholesale,
/// mirroring how the editor's `updateNode` merges partial data. Commands
/// construct a patch and hand it to [`TopologyStore::update_device`]; they
/// never write to a device directly.
#[derive(Debug, Clone, Default)]
pub struct DevicePatch {
    pub hostname: Option<String>,
    pub interfaces: Option<Vec<Interface>>,
    pub routing_table: Option<Vec<RouteEntry>>,
    pub ipv6_routing_table: Option<Vec<Ipv6RouteEntry>>,
    pub ipv6_enabled: Option<bool>,
    pub vlans: Option<Vec<VlanEntry>>,
}

impl DevicePatch {
    pub fn hostname(name: &str) -> Self {
        Self {
            hostname: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn interfaces(interfaces: Vec<Interface>) -> Self {
        Self {
            interfaces: Some(interfaces),
            ..Self::default()
        }
    }

    pub fn routing_table(table: Vec<RouteEntry>) -> Self {
        Self {
            routing_table: Some(table),
            ..Self::default()
        }
    }

    pub fn ipv6_routing_table(table: Vec<Ipv6RouteEntry>) -> Self {
        Self {
            ipv6_routing_table: Some(table),
            ..Self::default()
        }
    }

    pub fn ipv6_enabled(enabled: bool) -> Self {
        Self {
            ipv6_enabled: Some(enabled),
            ..Self::default()
        }
    }

    pub fn vlans(vlans: Vec<VlanEntry>) -> Self {
        Self {
            vlans: Some(vlans),
            ..Self::default()
        }
    }

    /// Apply this patch onto a device record.
    pub fn apply(self, device: &mut Device) {
        if let Some(hostname) = self.hostname {
            device.hostname = Some(hostname);
        }
        if let Some(interfaces) = self.interfaces {
            device.interfaces = interfaces;
        }
        if let Some(table) = self.routing_table {
            device.routing_table = table;
        }
        if let Some(table) = self.ipv6_routing_table {
            device.ipv6_routing_table = table;
        }
        if let Some(enabled) = self.ipv6_enabled {
            device.ipv6_enabled = enabled;
        }
        if let Some(vlans) = self.vlans {
            device.vlans = vlans;
        }
    }
}

/// The seam between the CLI engine and the externally-owned topology.
///
/// The engine never adds or removes devices/links; it reads the live graph
/// and pushes configuration patches back through `update_device`.
pub trait TopologyStore {
    /// Look up a device by id.
    fn device(&self, id: &str) -> Option<&Device>;

    /// All devices, in canvas order.
    fn devices(&self) -> &[Device];

    /// All cable links.
    fn links(&self) -> &[Link];

    /// Apply a configuration patch to a device. A patch addressed to an id
    /// that no longer exists is silently dropped: fire-and-forget timers in
    /// the surrounding app may deliver updates after a device was removed.
    fn update_device(&mut self, id: &str, patch: DevicePatch);
}

/// In-memory topology, used by the demo app and tests. The real editor
/// keeps its graph behind the same trait.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryTopology {
    devices: Vec<Device>,
    links: Vec<Link>,
}

impl MemoryTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device to the canvas.
    pub fn add_device(&mut self, device: Device) {
        self.devices.push(device);
    }

    /// Cable two devices together.
    pub fn add_link(&mut self, source: &str, target: &str) {
        self.links.push(Link::new(source, target));
    }

    /// Remove a device and every link touching it.
    pub fn remove_device(&mut self, id: &str) {
        self.devices.retain(|d| d.id != id);
        self.links.retain(|l| !l.touches(id));
    }

    /// Serialize the whole topology to JSON (the editor's save format).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a topology from its JSON save format.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TopologyStore for MemoryTopology {
    fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    fn devices(&self) -> &[Device] {
        &self.devices
    }

    fn links(&self) -> &[Link] {
        &self.links
    }

    fn update_device(&mut self, id: &str, patch: DevicePatch) {
        match self.devices.iter_mut().find(|d| d.id == id) {
            Some(device) => patch.apply(device),
            None => log::debug!("dropping update for removed device {id}"),
        }
    }
}
