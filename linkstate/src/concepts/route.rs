use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

use educe::Educe;
use serde::{Deserialize, Serialize};

use crate::framework::RoutingSystem;

/// A single forwarding decision
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct RoutingEntry<T: RoutingSystem> {
    /// the destination address
    pub dst: T::InterfaceAddress,
    /// the peer address packets for `dst` are handed to
    pub next_hop: T::InterfaceAddress,
    /// the local interface `next_hop` is reachable through
    pub interface: T::InterfaceAddress,
    /// total cost of the path to `dst`
    pub cost: u32,
}

impl<T: RoutingSystem> RoutingEntry<T> {
    /// Loopback entry for one of the node's own addresses
    pub fn local(addr: T::InterfaceAddress) -> Self {
        Self {
            dst: addr.clone(),
            next_hop: addr.clone(),
            interface: addr,
            cost: 0,
        }
    }

    /// Presentation order: ascending cost, then ascending destination
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.dst.cmp(&other.dst))
    }
}

impl<T: RoutingSystem> Display for RoutingEntry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.dst, self.next_hop, self.interface, self.cost
        )
    }
}

/// The forwarding table of a node. It is rebuilt from scratch on every shortest path computation.
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct RoutingTable<T: RoutingSystem> {
    pub entries: Vec<RoutingEntry<T>>,
}

impl<T: RoutingSystem> Default for RoutingTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RoutingSystem> RoutingTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, entry: RoutingEntry<T>) {
        self.entries.push(entry);
    }

    pub fn add_self_entry(&mut self, addr: T::InterfaceAddress) {
        self.entries.push(RoutingEntry::local(addr));
    }

    /// Overwrites the cost of every entry toward `dst`, returns how many entries were touched
    pub fn update_entry(&mut self, dst: &T::InterfaceAddress, cost: u32) -> usize {
        let mut updated = 0;
        for entry in self.entries.iter_mut().filter(|e| e.dst == *dst) {
            entry.cost = cost;
            updated += 1;
        }
        updated
    }

    pub fn get(&self, dst: &T::InterfaceAddress) -> Option<&RoutingEntry<T>> {
        self.entries.iter().find(|e| e.dst == *dst)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutingEntry<T>> {
        self.entries.iter()
    }

    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.display_order(b));
    }

    /// A copy of this table in presentation order
    pub fn sorted(&self) -> Self {
        let mut table = self.clone();
        table.sort();
        table
    }

    /// Writes `label:` followed by one `dst | next_hop | interface | cost` row per entry, in presentation order
    pub fn write_to<W: Write>(&self, label: &impl Display, w: &mut W) -> io::Result<()> {
        writeln!(w, "{label}:")?;
        for entry in self.sorted().iter() {
            writeln!(w, "{entry}")?;
        }
        Ok(())
    }
}
