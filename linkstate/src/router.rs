use crate::concepts::interface::Interface;
use crate::concepts::neighbour::{Neighbour, NodeHandle};
use crate::concepts::packet::{OutboundPacket, RouteMsg};
use crate::concepts::route::{RoutingEntry, RoutingTable};
use crate::feedback::TopologyError;
use crate::framework::{NodeId, ProtocolParams, RoutingSystem};
use crate::spf::dijkstra;
use crate::topology::AdjacencyMatrix;
use educe::Educe;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::serde_as;
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use std::sync::Arc;

#[serde_as]
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct Router<T: RoutingSystem> {
    pub name: T::NodeAddress,
    pub id: NodeId,
    /// number of nodes in the network, the size of the adjacency matrix
    pub node_count: usize,
    pub adjacency: AdjacencyMatrix,
    pub interfaces: Vec<Interface<T>>,
    /// direct neighbours, this is what the router advertises
    #[serde_as(as = "Vec<(_, _)>")]
    pub neighbours: BTreeMap<T::NodeAddress, Neighbour>,
    /// every address seen as a message sender, and the node it belongs to.
    /// These are the destinations of the routing table.
    #[serde_as(as = "Vec<(_, _)>")]
    pub known: BTreeMap<T::InterfaceAddress, NodeId>,
    /// highest sequence number accepted per sender address
    #[serde_as(as = "Vec<(_, _)>")]
    pub seen: HashMap<T::InterfaceAddress, u32>,
    pub table: RoutingTable<T>,
    /// sequence number of the next emission round
    pub ord: u32,
    pub outbound_packets: Vec<OutboundPacket<T>>,
    pub params: ProtocolParams,
}

/// What happened to a delivered message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// merged, recomputed and flooded
    Accepted,
    /// the sequence number was not newer than the last one accepted from this sender
    Duplicate,
}

impl<T: RoutingSystem> Router<T> {
    pub fn new(id: NodeId, node_count: usize, name: T::NodeAddress) -> Self {
        Self {
            name,
            id,
            node_count,
            adjacency: AdjacencyMatrix::new(node_count),
            interfaces: Vec::new(),
            neighbours: BTreeMap::new(),
            known: BTreeMap::new(),
            seen: HashMap::new(),
            table: RoutingTable::new(),
            ord: 0,
            outbound_packets: Vec::new(),
            params: T::config(),
        }
    }

    pub fn handle(&self) -> NodeHandle<T> {
        NodeHandle {
            id: self.id,
            name: self.name.clone(),
        }
    }

    // region Topology
    /// Attaches a link toward `peer` and recomputes the table.
    /// Only the direction `self -> peer` is recorded, the peer has to add its own interface back.
    pub fn add_interface(
        &mut self,
        local: T::InterfaceAddress,
        peer_addr: T::InterfaceAddress,
        cost: u32,
        peer: &NodeHandle<T>,
    ) -> Result<(), TopologyError> {
        self.adjacency.set(self.id, peer.id, cost)?;
        self.interfaces
            .push(Interface::new(local.clone(), peer_addr, cost, peer.id));
        self.neighbours
            .insert(peer.name.clone(), Neighbour { id: peer.id, cost });
        self.known.insert(local, self.id);

        self.compute_shortest_paths()
    }

    pub fn is_my_interface(&self, addr: &T::InterfaceAddress) -> bool {
        self.interfaces.iter().any(|itf| itf.local == *addr)
    }

    /// Out of band adjustment, used for link teardown.
    /// Rewrites the cost of every table entry toward `dst` and drops every interface whose peer is `dst`.
    /// The adjacency matrix is left alone, so a later recomputation that still routes through the
    /// dropped link reports [`TopologyError::NoInterfaceToward`].
    pub fn update_entry(&mut self, dst: &T::InterfaceAddress, cost: u32) {
        self.table.update_entry(dst, cost);
        self.interfaces.retain(|itf| itf.peer != *dst);
    }

    pub fn reset_table(&mut self) {
        self.table.reset();
    }

    /// Snapshot of the routing table in presentation order
    pub fn get_table(&self) -> RoutingTable<T> {
        self.table.sorted()
    }

    pub fn print_table<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.table.write_to(&self.name, w)
    }
    // endregion

    // region Messages
    /// Writes one advertisement per interface to the outbound packet queue.
    /// Every message of a round carries the same sequence number.
    /// Fails without queueing anything once the sequence numbers are used up.
    pub fn emit(&mut self) -> Result<(), TopologyError> {
        let ord = self.ord;
        self.ord = ord
            .checked_add(1)
            .ok_or(TopologyError::SequenceExhausted(self.id))?;
        let table = Arc::new(self.table.clone());
        for itf in &self.interfaces {
            self.outbound_packets.push(OutboundPacket {
                itf: itf.local.clone(),
                dest: itf.peer.clone(),
                peer_id: itf.peer_id,
                packet: RouteMsg {
                    from: itf.local.clone(),
                    table: table.clone(),
                    recv: itf.peer.clone(),
                    from_id: self.id,
                    neighbours: self.neighbours.clone(),
                    ord,
                },
            });
        }
        Ok(())
    }

    /// Handle a single message that arrived over the link whose far end is `via`.
    /// Our own advertisements are not special: the first echo of each of our addresses is
    /// accepted and re-flooded, which is how addresses behind our other interfaces spread.
    pub fn handle_packet(
        &mut self,
        msg: &RouteMsg<T>,
        via: &T::InterfaceAddress,
    ) -> Result<Delivery, TopologyError> {
        if let Some(&seen) = self.seen.get(&msg.from) {
            if seen >= msg.ord {
                trace!(
                    "{} dropped stale advertisement from {} (ord {} <= {})",
                    json!(self.name),
                    json!(msg.from),
                    msg.ord,
                    seen
                );
                return Ok(Delivery::Duplicate);
            }
        }

        // reject the whole message before touching any state
        self.adjacency.check(msg.from_id)?;
        for neigh in msg.neighbours.values() {
            self.adjacency.check(neigh.id)?;
        }

        for neigh in msg.neighbours.values() {
            self.adjacency.set(msg.from_id, neigh.id, neigh.cost)?;
        }
        self.known.insert(msg.from.clone(), msg.from_id);
        self.seen.insert(msg.from.clone(), msg.ord);
        debug!(
            "{} accepted advertisement from {} (node {}, ord {}) via {}",
            json!(self.name),
            json!(msg.from),
            msg.from_id,
            msg.ord,
            json!(via)
        );

        let recomputed = self.compute_shortest_paths();
        self.flood(msg, via);
        recomputed.map(|_| Delivery::Accepted)
    }

    /// writes an unmodified copy of `msg` to the outbound packet queue for every interface
    fn flood(&mut self, msg: &RouteMsg<T>, via: &T::InterfaceAddress) {
        for itf in &self.interfaces {
            if !self.params.flood_to_sender && itf.peer == *via {
                continue;
            }
            self.outbound_packets.push(OutboundPacket {
                itf: itf.local.clone(),
                dest: itf.peer.clone(),
                peer_id: itf.peer_id,
                packet: msg.clone(),
            });
        }
    }
    // endregion

    // region Route Selection
    /// Rebuilds the routing table from the adjacency matrix.
    /// Unreachable destinations get no entry. Destinations whose first hop has no local interface
    /// get no entry either, and the first of them is reported once the table is rebuilt.
    pub fn compute_shortest_paths(&mut self) -> Result<(), TopologyError> {
        self.reset_table();
        let paths = dijkstra(&self.adjacency, self.id)?;

        let mut inconsistency = None;
        for (addr, &owner) in &self.known {
            if owner == self.id {
                self.table.add_self_entry(addr.clone());
                continue;
            }
            let Some(root) = paths.root_of(owner) else {
                trace!("{} has no path to {}", json!(self.name), json!(addr));
                continue;
            };
            trace!(
                "{} reaches {} along {:?}",
                json!(self.name),
                json!(addr),
                paths.path_to(owner).unwrap_or_default()
            );
            match self.interfaces.iter().find(|itf| itf.reaches(root)) {
                Some(itf) => self.table.push(RoutingEntry {
                    dst: addr.clone(),
                    next_hop: itf.peer.clone(),
                    interface: itf.local.clone(),
                    cost: paths.distance(owner),
                }),
                None => {
                    warn!(
                        "{} routes {} through node {}, but has no interface toward it",
                        json!(self.name),
                        json!(addr),
                        root
                    );
                    inconsistency.get_or_insert(TopologyError::NoInterfaceToward {
                        destination: addr.to_string(),
                        root,
                    });
                }
            }
        }
        match inconsistency {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
    // endregion
}
