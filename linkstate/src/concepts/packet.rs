use std::collections::BTreeMap;
use std::sync::Arc;

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::concepts::neighbour::Neighbour;
use crate::concepts::route::RoutingTable;
use crate::framework::{NodeId, RoutingSystem};

/// A link-state advertisement. Flooded unmodified, so every field describes the original sender.
#[serde_as]
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct RouteMsg<T: RoutingSystem> {
    /// the sender's interface address this message was emitted from
    pub from: T::InterfaceAddress,
    /// the sender's routing table at emission time, shared by every copy of the message
    pub table: Arc<RoutingTable<T>>,
    /// the address the message was first sent to
    pub recv: T::InterfaceAddress,
    pub from_id: NodeId,
    /// the advertisement itself, the sender's direct neighbours and link costs
    #[serde_as(as = "Vec<(_, _)>")]
    pub neighbours: BTreeMap<T::NodeAddress, Neighbour>,
    /// sequence number, strictly increasing per sender
    pub ord: u32,
}

#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct OutboundPacket<T: RoutingSystem> {
    /// send via this local interface
    pub itf: T::InterfaceAddress,
    /// to this peer address
    pub dest: T::InterfaceAddress,
    /// owned by this node
    pub peer_id: NodeId,
    pub packet: RouteMsg<T>,
}
