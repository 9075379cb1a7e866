//! Per-node knowledge of the network graph, and the registry that hands out node identities.

use serde::{Deserialize, Serialize};

use crate::feedback::TopologyError;
use crate::framework::{NodeId, RoutingSystem};
use crate::router::Router;

/// Cost of an edge that is not known to exist
pub const INF: u32 = u32::MAX;

/// Square matrix of link costs indexed by node identity.
/// The diagonal is always 0, and INF marks a missing edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    size: usize,
    costs: Vec<u32>,
}

impl AdjacencyMatrix {
    pub fn new(size: usize) -> Self {
        let mut costs = vec![INF; size * size];
        for i in 0..size {
            costs[i * size + i] = 0;
        }
        Self { size, costs }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks that `id` has a row and a column in this matrix
    pub fn check(&self, id: NodeId) -> Result<(), TopologyError> {
        if self.size.checked_mul(self.size) != Some(self.costs.len()) {
            return Err(TopologyError::MatrixLengthMismatch {
                size: self.size,
                len: self.costs.len(),
            });
        }
        if id >= self.size {
            return Err(TopologyError::IdentityOutOfRange {
                id,
                size: self.size,
            });
        }
        Ok(())
    }

    pub fn get(&self, from: NodeId, to: NodeId) -> Result<u32, TopologyError> {
        self.check(from)?;
        self.check(to)?;
        Ok(self.costs[from * self.size + to])
    }

    /// Sets the cost of the directed edge `from -> to`. Writes to the diagonal are ignored.
    pub fn set(&mut self, from: NodeId, to: NodeId, cost: u32) -> Result<(), TopologyError> {
        self.check(from)?;
        self.check(to)?;
        if from != to {
            self.costs[from * self.size + to] = cost;
        }
        Ok(())
    }

    /// All outgoing edge costs of `from`, indexed by destination identity
    pub fn row(&self, from: NodeId) -> Result<&[u32], TopologyError> {
        self.check(from)?;
        Ok(&self.costs[from * self.size..(from + 1) * self.size])
    }

    /// Number of known directed edges, the diagonal excluded
    pub fn edge_count(&self) -> usize {
        self.costs
            .iter()
            .filter(|&&cost| cost != 0 && cost != INF)
            .count()
    }
}

/// Hands out node identities `0..node_count` in order.
/// Every router built by one registry shares the same adjacency matrix size.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Registry {
    node_count: usize,
    next_id: NodeId,
}

impl Registry {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            next_id: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// number of identities handed out so far
    pub fn assigned(&self) -> usize {
        self.next_id
    }

    pub fn next_identity(&mut self) -> Result<NodeId, TopologyError> {
        if self.next_id >= self.node_count {
            return Err(TopologyError::RegistryExhausted(self.node_count));
        }
        let id = self.next_id;
        self.next_id += 1;
        Ok(id)
    }

    /// Allocates a router with a fresh identity
    pub fn construct<T: RoutingSystem>(
        &mut self,
        name: T::NodeAddress,
    ) -> Result<Router<T>, TopologyError> {
        let id = self.next_identity()?;
        Ok(Router::new(id, self.node_count, name))
    }
}
