use crate::framework::{NodeId, RoutingSystem};
use educe::Educe;
use serde::{Deserialize, Serialize};

/// One end of a point-to-point link, owned by the node at the `local` end
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct Interface<T: RoutingSystem> {
    /// address of this end of the link
    pub local: T::InterfaceAddress,
    /// address of the directly connected peer
    pub peer: T::InterfaceAddress,
    /// cost of sending over this link, never zero on a usable link
    pub cost: u32,
    /// identity of the peer node, messages are addressed to it
    pub peer_id: NodeId,
}

impl<T: RoutingSystem> Interface<T> {
    pub fn new(
        local: T::InterfaceAddress,
        peer: T::InterfaceAddress,
        cost: u32,
        peer_id: NodeId,
    ) -> Self {
        Interface {
            local,
            peer,
            cost,
            peer_id,
        }
    }

    /// true if this interface leads to the node `id`
    pub fn reaches(&self, id: NodeId) -> bool {
        self.peer_id == id
    }
}
