//! Address helpers: IPv4 literal validation, dotted-mask subnet math, and
//! deterministic MAC/autoconfiguration derivation.
//!
//! The MAC derivation is seeded from device id + interface name so that
//! repeated `ipconfig` / `arp` invocations render the same addresses without
//! the simulator storing any per-interface hardware state.

/// Parse a dotted-quad IPv4 literal into octets. Strict: exactly four
/// decimal parts, each 0-255, no empty parts.
pub fn parse_ipv4(s: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut count = 0;
    for part in s.split('.') {
        if count == 4 || part.is_empty() || part.len() > 3 {
            return None;
        }
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u32 = part.parse().ok()?;
        if value > 255 {
            return None;
        }
        octets[count] = value as u8;
        count += 1;
    }
    if count == 4 { Some(octets) } else { None }
}

/// Whether `s` is a valid dotted-quad IPv4 literal.
pub fn is_valid_ipv4(s: &str) -> bool {
    parse_ipv4(s).is_some()
}

/// Whether two IPv4 addresses fall in the same subnet under a dotted mask.
/// Malformed input is simply "not in the same subnet".
pub fn in_same_subnet(ip1: &str, ip2: &str, mask: &str) -> bool {
    let (Some(a), Some(b), Some(m)) = (parse_ipv4(ip1), parse_ipv4(ip2), parse_ipv4(mask)) else {
        return false;
    };
    (0..4).all(|i| a[i] & m[i] == b[i] & m[i])
}

/// 32-bit string hash (djb-style shift-and-subtract with wrapping
/// semantics). Seeds the MAC, autoconfiguration, and transport-name
/// derivations.
pub fn seed_hash(seed: &str) -> i32 {
    let mut hash: i32 = 0;
    for c in seed.chars() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    hash
}

/// Derive a stable MAC address (`XX-XX-XX-XX-XX-XX`) from a seed string.
pub fn mac_from_seed(seed: &str) -> String {
    let hash = seed_hash(seed).unsigned_abs();
    let hex = format!("{hash:012x}");
    let hex = &hex[..12];
    hex.as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).to_uppercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Derive a stable link-local autoconfiguration address (`169.254.x.y`)
/// from a seed string, for interfaces with no configured address.
pub fn autoconf_from_seed(seed: &str) -> String {
    let hash = seed_hash(seed).unsigned_abs();
    format!("169.254.{}.{}", (hash >> 8) & 0xff, hash & 0xff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_addresses() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
    }

    #[test]
    fn invalid_addresses() {
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("1.2.3.4.5"));
        assert!(!is_valid_ipv4("a.b.c.d"));
        assert!(!is_valid_ipv4("1..2.3"));
        assert!(!is_valid_ipv4("webserver"));
        assert!(!is_valid_ipv4(""));
    }

    #[test]
    fn subnet_membership() {
        assert!(in_same_subnet(
            "192.168.1.10",
            "192.168.1.20",
            "255.255.255.0"
        ));
        assert!(!in_same_subnet(
            "192.168.1.10",
            "192.168.2.20",
            "255.255.255.0"
        ));
        assert!(in_same_subnet("10.0.0.1", "10.0.255.9", "255.255.0.0"));
    }

    #[test]
    fn subnet_malformed_is_false() {
        assert!(!in_same_subnet("bogus", "192.168.1.1", "255.255.255.0"));
        assert!(!in_same_subnet("192.168.1.1", "192.168.1.2", "not-a-mask"));
    }

    #[test]
    fn mac_is_stable_and_formatted() {
        let a = mac_from_seed("pc1Eth0");
        let b = mac_from_seed("pc1Eth0");
        assert_eq!(a, b);
        assert_eq!(a.len(), 17);
        assert_eq!(a.matches('-').count(), 5);
    }

    #[test]
    fn mac_differs_per_seed() {
        assert_ne!(mac_from_seed("pc1Eth0"), mac_from_seed("pc2Eth0"));
    }

    #[test]
    fn autoconf_in_link_local_range() {
        let addr = autoconf_from_seed("pc3Eth0");
        assert!(addr.starts_with("169.254."));
        assert!(is_valid_ipv4(&addr));
    }

    proptest! {
        #[test]
        fn parse_never_panics(s in "\\PC*") {
            let _ = parse_ipv4(&s);
        }

        #[test]
        fn well_formed_quads_parse(a in 0u8..=255, b in 0u8..=255, c in 0u8..=255, d in 0u8..=255) {
            let s = format!("{a}.{b}.{c}.{d}");
            prop_assert_eq!(parse_ipv4(&s), Some([a, b, c, d]));
        }

        #[test]
        fn mac_seed_deterministic(s in "\\PC{1,40}") {
            prop_assert_eq!(mac_from_seed(&s), mac_from_seed(&s));
        }
    }
}
