//! In-memory network that owns every router and delivers their outbound packets.

use std::collections::VecDeque;
use std::io::{self, Write};

use anyhow::{ensure, Context};
use educe::Educe;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::concepts::packet::OutboundPacket;
use crate::feedback::TopologyError;
use crate::framework::{NodeId, ProtocolParams, RoutingSystem};
use crate::router::{Delivery, Router};
use crate::topology::Registry;

#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct Network<T: RoutingSystem> {
    pub registry: Registry,
    /// indexed by node identity
    pub routers: Vec<Router<T>>,
    pub params: ProtocolParams,
    in_flight: VecDeque<OutboundPacket<T>>,
    /// messages accepted by their receiver
    pub delivered: usize,
    /// messages dropped as stale or duplicate
    pub dropped: usize,
}

impl<T: RoutingSystem> Network<T> {
    pub fn new(node_count: usize) -> Self {
        Self::with_params(node_count, T::config())
    }

    pub fn with_params(node_count: usize, params: ProtocolParams) -> Self {
        Self {
            registry: Registry::new(node_count),
            routers: Vec::new(),
            params,
            in_flight: VecDeque::new(),
            delivered: 0,
            dropped: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.registry.node_count()
    }

    // region Topology
    pub fn add_node(&mut self, name: T::NodeAddress) -> Result<NodeId, TopologyError> {
        let mut router = self.registry.construct::<T>(name)?;
        router.params = self.params.clone();
        let id = router.id;
        self.routers.push(router);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Router<T>, TopologyError> {
        self.routers.get(id).ok_or(TopologyError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Router<T>, TopologyError> {
        self.routers.get_mut(id).ok_or(TopologyError::UnknownNode(id))
    }

    pub fn find(&self, name: &T::NodeAddress) -> Option<&Router<T>> {
        self.routers.iter().find(|r| r.name == *name)
    }

    /// Adds the directed link `node -> peer`
    pub fn add_interface(
        &mut self,
        node: NodeId,
        local: T::InterfaceAddress,
        peer_addr: T::InterfaceAddress,
        cost: u32,
        peer: NodeId,
    ) -> Result<(), TopologyError> {
        let handle = self.node(peer)?.handle();
        self.node_mut(node)?
            .add_interface(local, peer_addr, cost, &handle)
    }

    /// Adds a symmetric link between `a` and `b`
    pub fn connect(
        &mut self,
        a: NodeId,
        a_addr: T::InterfaceAddress,
        b: NodeId,
        b_addr: T::InterfaceAddress,
        cost: u32,
    ) -> Result<(), TopologyError> {
        self.add_interface(a, a_addr.clone(), b_addr.clone(), cost, b)?;
        self.add_interface(b, b_addr, a_addr, cost, a)
    }

    /// Tears down `node`'s interfaces toward `dst`, see [`Router::update_entry`]
    pub fn update_entry(
        &mut self,
        node: NodeId,
        dst: &T::InterfaceAddress,
        cost: u32,
    ) -> Result<(), TopologyError> {
        self.node_mut(node)?.update_entry(dst, cost);
        Ok(())
    }
    // endregion

    // region Delivery
    /// moves every router's outbound packets onto the wire
    fn flush_packets(&mut self) {
        for router in &mut self.routers {
            self.in_flight.extend(router.outbound_packets.drain(..));
        }
    }

    /// Delivers packets until no router has anything left to send.
    /// Every packet is delivered even if some of them fail, the first failure is returned.
    pub fn deliver_all(&mut self) -> Result<(), TopologyError> {
        self.flush_packets();
        let mut failure = None;
        while let Some(OutboundPacket {
            itf,
            peer_id,
            packet,
            ..
        }) = self.in_flight.pop_front()
        {
            let Some(router) = self.routers.get_mut(peer_id) else {
                warn!("dropped packet from {} toward unknown node {peer_id}", json!(itf));
                failure.get_or_insert(TopologyError::UnknownNode(peer_id));
                continue;
            };
            match router.handle_packet(&packet, &itf) {
                Ok(Delivery::Accepted) => self.delivered += 1,
                Ok(Delivery::Duplicate) => self.dropped += 1,
                Err(err) => {
                    warn!(
                        "{} failed to handle packet from {}: {err}",
                        json!(router.name),
                        json!(itf)
                    );
                    failure.get_or_insert(err);
                }
            }
            self.in_flight.extend(router.outbound_packets.drain(..));
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// `node` advertises itself to its neighbours, then the network settles
    pub fn emit(&mut self, node: NodeId) -> Result<(), TopologyError> {
        self.node_mut(node)?.emit()?;
        self.deliver_all()
    }

    /// Runs the configured number of exchange rounds, every node emitting once per round.
    /// A failing node does not stop the others, the first failure is returned after the last round.
    pub fn run_convergence(&mut self) -> Result<(), TopologyError> {
        let rounds = self
            .params
            .rounds
            .unwrap_or(self.routers.len().saturating_sub(1));
        let mut failure = None;
        for round in 0..rounds {
            for id in 0..self.routers.len() {
                if let Err(err) = self.emit(id) {
                    warn!("round {}: emission of node {id} failed: {err}", round + 1);
                    failure.get_or_insert(err);
                }
            }
            debug!(
                "round {} done, {} delivered, {} dropped",
                round + 1,
                self.delivered,
                self.dropped
            );
        }
        info!(
            "converged {} nodes in {rounds} rounds ({} delivered, {} dropped)",
            self.routers.len(),
            self.delivered,
            self.dropped
        );
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn print_tables<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for router in &self.routers {
            router.print_table(w)?;
        }
        Ok(())
    }
    // endregion

    // region Snapshots
    pub fn freeze(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self)
    }

    /// Restores a frozen network, checking that every router still fits the registry
    pub fn restore(state: &str) -> anyhow::Result<Self> {
        let network: Self = serde_json::from_str(state).context("malformed network snapshot")?;
        let expected = network.node_count();
        ensure!(
            network.routers.len() <= expected,
            TopologyError::RegistryExhausted(expected)
        );
        ensure!(
            network.registry.assigned() == network.routers.len(),
            "registry has assigned {} identities, but the snapshot holds {} routers",
            network.registry.assigned(),
            network.routers.len()
        );
        for (index, router) in network.routers.iter().enumerate() {
            ensure!(router.id == index, TopologyError::UnknownNode(router.id));
            let actual = router.adjacency.size();
            ensure!(
                actual == expected && router.node_count == expected,
                TopologyError::MatrixSizeMismatch { expected, actual }
            );
            router
                .adjacency
                .check(router.id)
                .with_context(|| {
                    format!("router {} has a corrupt adjacency matrix", json!(router.name))
                })?;
        }
        Ok(network)
    }
    // endregion
}
