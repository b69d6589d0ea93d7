//! Per-device configuration records: interfaces, sub-interfaces, VLANs,
//! routing tables, DHCP pools, DNS records.

use serde::{Deserialize, Serialize};

/// What a device fundamentally is. Selects the CLI personality
/// (Cisco-style for routers/switches, Windows-shell for PCs/servers)
/// and which configuration attachments apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Router,
    Switch,
    Pc,
    Server,
    Hub,
}

impl DeviceKind {
    /// PCs and servers get the Windows-style shell.
    pub fn is_host(self) -> bool {
        matches!(self, DeviceKind::Pc | DeviceKind::Server)
    }
}

/// A router sub-interface (router-on-a-stick): a virtual interface keyed by
/// a dotted name (`Gig0/0.10`) and bound to a VLAN tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubInterface {
    pub name: String,
    pub vlan_id: u16,
    pub ip_address: Option<String>,
    pub subnet_mask: Option<String>,
    pub ipv6_address: Option<String>,
    pub ipv6_prefix_length: Option<u8>,
    pub ipv6_enabled: bool,
    pub description: Option<String>,
}

impl Default for SubInterface {
    fn default() -> Self {
        Self {
            name: String::new(),
            vlan_id: 1,
            ip_address: None,
            subnet_mask: None,
            ipv6_address: None,
            ipv6_prefix_length: None,
            ipv6_enabled: false,
            description: None,
        }
    }
}

impl SubInterface {
    /// New sub-interface with the VLAN id parsed from the dotted suffix
    /// (`Gig0/0.10` -> 10; an unparseable suffix falls back to VLAN 1).
    pub fn from_dotted_name(name: &str) -> Self {
        let vlan_id = name
            .split('.')
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        Self {
            name: name.to_string(),
            vlan_id,
            ..Self::default()
        }
    }
}

/// One physical interface on a device.
///
/// `enabled` defaults to true: an interface is up unless explicitly shut
/// down. Switch ports carry either an access VLAN (`vlan_id`) or trunk
/// attributes; router interfaces may carry sub-interfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub name: String,
    pub ip_address: Option<String>,
    pub subnet_mask: Option<String>,
    pub gateway: Option<String>,
    pub ipv6_address: Option<String>,
    pub ipv6_prefix_length: Option<u8>,
    pub ipv6_enabled: bool,
    pub enabled: bool,
    pub description: Option<String>,
    pub vlan_id: Option<u16>,
    pub trunk_mode: bool,
    pub allowed_vlans: Option<Vec<u16>>,
    pub native_vlan: Option<u16>,
    pub sub_interfaces: Vec<SubInterface>,
}

impl Default for Interface {
    fn default() -> Self {
        Self {
            name: String::new(),
            ip_address: None,
            subnet_mask: None,
            gateway: None,
            ipv6_address: None,
            ipv6_prefix_length: None,
            ipv6_enabled: false,
            enabled: true,
            description: None,
            vlan_id: None,
            trunk_mode: false,
            allowed_vlans: None,
            native_vlan: None,
            sub_interfaces: Vec::new(),
        }
    }
}

impl Interface {
    /// New enabled, unaddressed interface.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// New interface with an IPv4 address and mask.
    pub fn with_ipv4(name: &str, address: &str, mask: &str) -> Self {
        Self {
            name: name.to_string(),
            ip_address: Some(address.to_string()),
            subnet_mask: Some(mask.to_string()),
            ..Self::default()
        }
    }
}

/// Routing protocol tag. Commands only ever add `Static`; the rest exist so
/// a loaded topology can carry seeded entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteProtocol {
    Static,
    Connected,
    Rip,
    Ospf,
}

/// One IPv4 routing table entry. Insertion order is preserved and duplicate
/// network/mask pairs are permitted (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub network: String,
    pub mask: String,
    pub next_hop: String,
    pub protocol: RouteProtocol,
    #[serde(default)]
    pub metric: Option<u32>,
}

/// One IPv6 routing table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ipv6RouteEntry {
    pub network: String,
    pub prefix_length: u8,
    pub next_hop: String,
    pub protocol: RouteProtocol,
    #[serde(default)]
    pub metric: Option<u32>,
    #[serde(default)]
    pub admin_distance: Option<u8>,
    #[serde(default)]
    pub exit_interface: Option<String>,
}

/// A VLAN on a switch: numeric id (1-4094), name, and the ports currently
/// assigned. VLAN 1 always exists implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlanEntry {
    pub id: u16,
    pub name: String,
    pub ports: Vec<String>,
}

impl VlanEntry {
    /// New empty VLAN with the conventional `VLAN<id>` name.
    pub fn new(id: u16) -> Self {
        Self {
            id,
            name: format!("VLAN{id}"),
            ports: Vec::new(),
        }
    }
}

/// A DHCP address pool attached to a router or server. Value object only;
/// no cross-device consistency is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DhcpPool {
    pub name: String,
    pub network: String,
    pub mask: String,
    #[serde(default)]
    pub default_router: Option<String>,
    #[serde(default)]
    pub dns_server: Option<String>,
    #[serde(default)]
    pub lease_time: Option<u32>,
}

/// DNS record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DnsRecordType {
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
    #[serde(rename = "CNAME")]
    Cname,
}

/// A DNS record attached to a device. A record may point at an address
/// nobody owns; resolution failures surface at lookup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub hostname: String,
    pub ip_address: String,
    pub record_type: DnsRecordType,
}

/// One device on the canvas with its full mutable configuration.
///
/// The topology owns device lifetime; the CLI engine only mutates fields of
/// devices it is handed through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub label: String,
    pub kind: DeviceKind,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub routing_table: Vec<RouteEntry>,
    #[serde(default)]
    pub ipv6_routing_table: Vec<Ipv6RouteEntry>,
    #[serde(default)]
    pub ipv6_enabled: bool,
    #[serde(default)]
    pub vlans: Vec<VlanEntry>,
    #[serde(default)]
    pub dhcp_pools: Vec<DhcpPool>,
    #[serde(default)]
    pub dns_records: Vec<DnsRecord>,
}

impl Device {
    /// New device with the default interface set for its kind (what the
    /// editor palette seeds when a device is dropped on the canvas).
    pub fn new(id: &str, label: &str, kind: DeviceKind) -> Self {
        let interfaces = match kind {
            DeviceKind::Router => vec![Interface::new("Gig0/0"), Interface::new("Gig0/1")],
            DeviceKind::Switch => (1..=4)
                .map(|n| Interface::new(&format!("Fa0/{n}")))
                .collect(),
            DeviceKind::Pc | DeviceKind::Server | DeviceKind::Hub => vec![Interface::new("Eth0")],
        };
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            hostname: None,
            interfaces,
            routing_table: Vec::new(),
            ipv6_routing_table: Vec::new(),
            ipv6_enabled: false,
            vlans: Vec::new(),
            dhcp_pools: Vec::new(),
            dns_records: Vec::new(),
        }
    }

    /// The name shown in Cisco prompts: configured hostname, else label.
    pub fn display_hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or(&self.label)
    }

    /// Resolve an interface reference the way the CLI does: exact
    /// case-insensitive match first, then case-insensitive substring
    /// (so `Gig0/2` finds `Gig0/2` and `gig0/2` finds it too).
    pub fn find_interface(&self, name: &str) -> Option<&Interface> {
        let lower = name.to_lowercase();
        self.interfaces
            .iter()
            .find(|i| i.name.to_lowercase() == lower)
            .or_else(|| {
                self.interfaces
                    .iter()
                    .find(|i| i.name.to_lowercase().contains(&lower))
            })
    }

    /// Whether any interface on this device carries the given IPv4 address.
    pub fn owns_ipv4(&self, address: &str) -> bool {
        self.interfaces
            .iter()
            .any(|i| i.ip_address.as_deref() == Some(address))
    }
}
