use thiserror::Error;

use crate::framework::NodeId;

/// Inconsistencies between the configured topology and what a node knows about it.
/// The protocol itself never needs these, they surface states that would otherwise be silent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// An identity, either configured locally or carried by an advertisement, does not fit in the adjacency matrix
    #[error("node identity {id} does not fit in an adjacency matrix of size {size}")]
    IdentityOutOfRange { id: NodeId, size: usize },
    /// A node's adjacency matrix is not sized for the number of nodes in the network
    #[error("adjacency matrix has size {actual}, but the network is configured for {expected} nodes")]
    MatrixSizeMismatch { expected: usize, actual: usize },
    /// The cost storage of an adjacency matrix does not hold `size * size` entries
    #[error("adjacency matrix of size {size} holds {len} costs")]
    MatrixLengthMismatch { size: usize, len: usize },
    /// The shortest path to `destination` starts at node `root`, but no local interface reaches `root`.
    /// This happens after an interface is torn down while its link is still in the adjacency matrix.
    #[error("no local interface toward node {root}, the first hop to {destination}")]
    NoInterfaceToward { destination: String, root: NodeId },
    #[error("all {0} node identities have already been assigned")]
    RegistryExhausted(usize),
    #[error("no node with identity {0}")]
    UnknownNode(NodeId),
    #[error("node {0} has used up its sequence numbers")]
    SequenceExhausted(NodeId),
}
