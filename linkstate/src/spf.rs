//! Single-source shortest paths over a node's adjacency matrix.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::feedback::TopologyError;
use crate::framework::NodeId;
use crate::topology::{AdjacencyMatrix, INF};
use crate::util::sum_inf;

#[derive(Debug, Eq, PartialEq)]
struct State {
    cost: u32,
    node: NodeId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap on cost, ties go to the higher identity
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Distances and shortest path tree from one source node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths {
    distances: Vec<u32>,
    parents: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    /// Distance from the source, INF if unreachable or unknown
    pub fn distance(&self, node: NodeId) -> u32 {
        self.distances.get(node).copied().unwrap_or(INF)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node).copied().flatten()
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node) != INF
    }

    /// The node right after the source on the shortest path to `destination`.
    /// None for the source itself and for unreachable nodes.
    pub fn root_of(&self, destination: NodeId) -> Option<NodeId> {
        let mut root = None;
        let mut cur = destination;
        while let Some(parent) = self.parent(cur) {
            root = Some(cur);
            cur = parent;
        }
        root
    }

    /// Every node on the shortest path, source and destination included
    pub fn path_to(&self, destination: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(destination) {
            return None;
        }
        let mut path = vec![destination];
        let mut cur = destination;
        while let Some(parent) = self.parent(cur) {
            path.push(parent);
            cur = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Lazy-deletion Dijkstra from `source`.
/// Edges with cost 0 or INF are not traversed.
pub fn dijkstra(matrix: &AdjacencyMatrix, source: NodeId) -> Result<ShortestPaths, TopologyError> {
    matrix.check(source)?;
    let size = matrix.size();
    let mut distances = vec![INF; size];
    let mut parents = vec![None; size];
    let mut heap = BinaryHeap::new();

    distances[source] = 0;
    heap.push(State {
        cost: 0,
        node: source,
    });

    while let Some(State { node, .. }) = heap.pop() {
        // only reachable through a stale entry
        if distances[node] == INF {
            continue;
        }

        for (next, &edge) in matrix.row(node)?.iter().enumerate() {
            if edge == 0 || edge == INF {
                continue;
            }
            let cost = sum_inf(distances[node], edge);
            if cost < distances[next] {
                distances[next] = cost;
                parents[next] = Some(node);
                heap.push(State { cost, node: next });
            }
        }
    }

    Ok(ShortestPaths {
        distances,
        parents,
    })
}
