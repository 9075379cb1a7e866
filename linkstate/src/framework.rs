use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub trait RoutingSystem {
    /// Label of a node, advertised to the rest of the network, MUST be unique per node
    type NodeAddress: Ord + PartialOrd + RootData + RootKey + Display;
    /// Address of one end of a point-to-point link.
    /// Destinations, next hops and egress interfaces in a routing table are all of this type.
    type InterfaceAddress: Ord + PartialOrd + RootData + RootKey + Display;
    fn config() -> ProtocolParams {
        Default::default()
    }
}

pub trait RootData: Clone + Debug + Serialize + DeserializeOwned + Sized {}
pub trait RootKey: Eq + PartialEq + Hash {}
impl<T: Eq + PartialEq + Hash> RootKey for T {}
impl<T: Clone + Debug + Serialize + DeserializeOwned + Sized> RootData for T {}

/// Identity of a node, doubles as its row and column in every adjacency matrix
pub type NodeId = usize;

/// Protocol Parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParams {
    /// Flood an accepted advertisement back over the interface it arrived on as well.
    /// The sender drops that copy through its own sequence number check.
    pub flood_to_sender: bool,
    /// Number of full exchange rounds the network driver runs, `nodes - 1` when unset
    pub rounds: Option<usize>,
}
impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            flood_to_sender: true,
            rounds: None,
        }
    }
}
