use crate::framework::{NodeId, RoutingSystem};
use educe::Educe;
use serde::{Deserialize, Serialize};

/// A directly attached neighbour, as advertised in link-state messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbour {
    pub id: NodeId,
    /// Direct link-cost to this neighbour. Lower is better.
    pub cost: u32,
}

/// Identity and label of a node, enough to attach an interface to it
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct NodeHandle<T: RoutingSystem> {
    pub id: NodeId,
    pub name: T::NodeAddress,
}
