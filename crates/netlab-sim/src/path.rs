//! Breadth-first path search over the device/link graph.

use std::collections::{HashSet, VecDeque};

use netlab_model::{Device, Link};

/// Find the shortest hop path from a source device to the device owning a
/// target IPv4 address.
///
/// The adjacency view is rebuilt from the live link list on every call --
/// the surrounding editor may have added or removed devices and cables
/// since the last invocation, so nothing is cached. Links are undirected.
///
/// Returns the ordered device-id path (source first, target last), or
/// `None` when the address is not owned by any device or no cable path
/// exists. A missing path is a normal outcome, not an error; callers
/// render it as a timeout.
pub fn find_path(
    devices: &[Device],
    links: &[Link],
    source_id: &str,
    target_addr: &str,
) -> Option<Vec<String>> {
    devices.iter().find(|d| d.id == source_id)?;
    let target = devices.iter().find(|d| d.owns_ipv4(target_addr))?;

    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<Vec<String>> = VecDeque::new();
    queue.push_back(vec![source_id.to_string()]);

    while let Some(path) = queue.pop_front() {
        let Some(current) = path.last().cloned() else {
            continue;
        };
        if current == target.id {
            log::debug!("path to {target_addr}: {} hops", path.len());
            return Some(path);
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        for link in links {
            if let Some(peer) = link.peer_of(&current)
                && !visited.contains(peer)
            {
                let mut next = path.clone();
                next.push(peer.to_string());
                queue.push_back(next);
            }
        }
    }

    None
}
