//! Packet marker animation: a single-threaded stepper that advances every
//! active packet one hop per interval and removes arrived packets after a
//! short linger.
//!
//! Time is virtual: the embedding host calls [`PacketScheduler::tick`] with
//! elapsed milliseconds (once per frame, or from a timer). Tests drive the
//! same entry point with synthetic time, so there are no real timers here.

/// Visual flavor of a packet marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    Ping,
    Traceroute,
}

/// Default hop interval: one hop every 600 ms.
pub const DEFAULT_HOP_INTERVAL_MS: u32 = 600;

/// Default linger after arrival before the marker disappears.
pub const DEFAULT_LINGER_MS: u32 = 500;

/// One packet marker in flight.
#[derive(Debug, Clone)]
pub struct ActivePacket {
    pub id: String,
    pub path: Vec<String>,
    pub hop: usize,
    pub kind: PacketKind,
    /// Remaining linger after arrival; `None` while still travelling.
    linger_left: Option<u32>,
}

impl ActivePacket {
    /// Device id the marker currently sits on.
    pub fn current_device(&self) -> &str {
        &self.path[self.hop]
    }

    /// Whether the marker has reached the final path element.
    pub fn arrived(&self) -> bool {
        self.hop + 1 >= self.path.len()
    }
}

/// Advances all registered packet markers on a shared repeating interval.
///
/// Entries progress independently and concurrently; there is no ordering
/// guarantee between entries started at different times, only that each
/// entry's own hops are strictly sequential.
#[derive(Debug)]
pub struct PacketScheduler {
    entries: Vec<ActivePacket>,
    hop_interval_ms: u32,
    linger_ms: u32,
    carry_ms: u32,
}

impl Default for PacketScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketScheduler {
    /// Scheduler with the stock 600 ms hop interval and 500 ms linger.
    pub fn new() -> Self {
        Self::with_timing(DEFAULT_HOP_INTERVAL_MS, DEFAULT_LINGER_MS)
    }

    /// Scheduler with explicit timing (tests use small values).
    pub fn with_timing(hop_interval_ms: u32, linger_ms: u32) -> Self {
        Self {
            entries: Vec::new(),
            hop_interval_ms: hop_interval_ms.max(1),
            linger_ms,
            carry_ms: 0,
        }
    }

    /// Register a packet marker at the start of its path. Empty paths are
    /// ignored (nothing to draw).
    pub fn spawn(&mut self, id: &str, path: Vec<String>, kind: PacketKind) {
        if path.is_empty() {
            return;
        }
        self.entries.push(ActivePacket {
            id: id.to_string(),
            path,
            hop: 0,
            kind,
            linger_left: None,
        });
    }

    /// All markers currently in flight (including lingering arrivals).
    pub fn active(&self) -> &[ActivePacket] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every marker immediately.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.carry_ms = 0;
    }

    /// Advance virtual time by `dt_ms`.
    ///
    /// Linger countdowns run on wall time; hop advancement happens on each
    /// elapsed interval boundary. An entry that reaches its final hop stays
    /// visible for the linger window, then is removed.
    pub fn tick(&mut self, dt_ms: u32) {
        // Count down arrivals marked on earlier ticks.
        for entry in &mut self.entries {
            if let Some(left) = entry.linger_left.as_mut() {
                *left = left.saturating_sub(dt_ms);
            }
        }
        self.entries.retain(|e| {
            let expired = e.linger_left == Some(0);
            if expired {
                log::debug!("packet {} removed after arrival", e.id);
            }
            !expired
        });

        self.carry_ms += dt_ms;
        while self.carry_ms >= self.hop_interval_ms {
            self.carry_ms -= self.hop_interval_ms;
            for entry in &mut self.entries {
                if entry.linger_left.is_some() {
                    continue;
                }
                if entry.arrived() {
                    entry.linger_left = Some(self.linger_ms.max(1));
                } else {
                    entry.hop += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn advances_one_hop_per_interval() {
        let mut sched = PacketScheduler::with_timing(600, 500);
        sched.spawn("p1", path(&["a", "b", "c"]), PacketKind::Ping);
        assert_eq!(sched.active()[0].current_device(), "a");

        sched.tick(600);
        assert_eq!(sched.active()[0].current_device(), "b");
        sched.tick(600);
        assert_eq!(sched.active()[0].current_device(), "c");
        assert!(sched.active()[0].arrived());
    }

    #[test]
    fn partial_ticks_accumulate() {
        let mut sched = PacketScheduler::with_timing(600, 500);
        sched.spawn("p1", path(&["a", "b"]), PacketKind::Ping);
        sched.tick(300);
        assert_eq!(sched.active()[0].current_device(), "a");
        sched.tick(300);
        assert_eq!(sched.active()[0].current_device(), "b");
    }

    #[test]
    fn large_tick_advances_multiple_hops() {
        let mut sched = PacketScheduler::with_timing(100, 500);
        sched.spawn("p1", path(&["a", "b", "c", "d"]), PacketKind::Traceroute);
        sched.tick(250);
        assert_eq!(sched.active()[0].current_device(), "c");
    }

    #[test]
    fn arrived_marker_lingers_then_disappears() {
        let mut sched = PacketScheduler::with_timing(100, 50);
        sched.spawn("p1", path(&["a", "b"]), PacketKind::Ping);
        sched.tick(100); // reaches b
        sched.tick(100); // arrival noticed, linger starts
        assert_eq!(sched.active().len(), 1);
        sched.tick(100); // linger expired
        assert!(sched.is_empty());
    }

    #[test]
    fn entries_progress_independently() {
        let mut sched = PacketScheduler::with_timing(100, 1000);
        sched.spawn("early", path(&["a", "b", "c"]), PacketKind::Ping);
        sched.tick(100);
        sched.spawn("late", path(&["x", "y", "z"]), PacketKind::Traceroute);
        sched.tick(100);

        let early = sched.active().iter().find(|e| e.id == "early").unwrap();
        let late = sched.active().iter().find(|e| e.id == "late").unwrap();
        assert_eq!(early.current_device(), "c");
        assert_eq!(late.current_device(), "y");
    }

    #[test]
    fn single_node_path_still_lingers() {
        let mut sched = PacketScheduler::with_timing(100, 50);
        sched.spawn("p1", path(&["a"]), PacketKind::Ping);
        sched.tick(100); // arrival noticed immediately
        assert_eq!(sched.active().len(), 1);
        sched.tick(100);
        assert!(sched.is_empty());
    }

    #[test]
    fn empty_path_is_ignored() {
        let mut sched = PacketScheduler::new();
        sched.spawn("p1", vec![], PacketKind::Ping);
        assert!(sched.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut sched = PacketScheduler::new();
        sched.spawn("p1", path(&["a", "b"]), PacketKind::Ping);
        sched.spawn("p2", path(&["c", "d"]), PacketKind::Traceroute);
        sched.clear();
        assert!(sched.is_empty());
    }
}
