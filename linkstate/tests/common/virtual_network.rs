use linkstate::concepts::route::RoutingTable;
use linkstate::framework::{ProtocolParams, RoutingSystem};
use linkstate::network::Network;
use linkstate::router::Router;
use linkstate::topology::INF;

pub struct VirtualSystem;

impl RoutingSystem for VirtualSystem {
    type NodeAddress = String;
    type InterfaceAddress = String;
}

/// Same network, but floods never go back over the arrival interface
pub struct QuietSystem;

impl RoutingSystem for QuietSystem {
    type NodeAddress = String;
    type InterfaceAddress = String;
    fn config() -> ProtocolParams {
        ProtocolParams {
            flood_to_sender: false,
            ..Default::default()
        }
    }
}

pub type Link<'a> = (i32, &'a str, &'a str, u32);

pub struct VirtualNetwork<T: RoutingSystem<NodeAddress = String, InterfaceAddress = String> = VirtualSystem> {
    pub network: Network<T>,
    pub nodes: Vec<String>,
    pub links: Vec<(i32, String, String, u32)>,
}

impl<T: RoutingSystem<NodeAddress = String, InterfaceAddress = String>> VirtualNetwork<T> {
    /// every node uses its own name as the address of all of its interfaces
    pub fn create(nodes: &[&str], links: &[Link]) -> Self {
        Self::build(nodes, links, |node, _| node.to_string())
    }

    /// every interface gets its own address, `<node>.<link id>`
    pub fn create_multi_address(nodes: &[&str], links: &[Link]) -> Self {
        Self::build(nodes, links, |node, lid| format!("{node}.{lid}"))
    }

    fn build(nodes: &[&str], links: &[Link], addr: impl Fn(&str, i32) -> String) -> Self {
        let mut network = Network::new(nodes.len());
        for node in nodes {
            network.add_node(node.to_string()).unwrap();
        }
        let id = |name: &str| {
            nodes
                .iter()
                .position(|n| *n == name)
                .unwrap_or_else(|| panic!("No node {name} found"))
        };
        for &(lid, a, b, cost) in links {
            network
                .connect(id(a), addr(a, lid), id(b), addr(b, lid), cost)
                .unwrap();
        }
        VirtualNetwork {
            network,
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            links: links
                .iter()
                .map(|&(lid, a, b, cost)| (lid, a.to_string(), b.to_string(), cost))
                .collect(),
        }
    }

    pub fn converge(&mut self) {
        self.network.run_convergence().unwrap();
    }

    pub fn get_node(&self, node: &str) -> &Router<T> {
        self.network
            .find(&node.to_string())
            .unwrap_or_else(|| panic!("No node {node} found"))
    }

    pub fn table(&self, node: &str) -> RoutingTable<T> {
        self.get_node(node).get_table()
    }

    pub fn get_next_hop(&self, cur: &str, dst: &str) -> String {
        self.table(cur)
            .get(&dst.to_string())
            .unwrap_or_else(|| panic!("No route found to {dst}"))
            .next_hop
            .clone()
    }

    pub fn get_metric_to(&self, cur: &str, dst: &str) -> u32 {
        self.table(cur)
            .get(&dst.to_string())
            .unwrap_or_else(|| panic!("No route found to {dst}"))
            .cost
    }

    pub fn link_cost(&self, a: &str, b: &str) -> u32 {
        self.links
            .iter()
            .filter(|(_, x, y, _)| (x == a && y == b) || (x == b && y == a))
            .map(|(_, _, _, cost)| *cost)
            .min()
            .unwrap_or(INF)
    }

    /// Floyd-Warshall over the configured links, indexed like `nodes`
    pub fn expected_distances(&self) -> Vec<Vec<u32>> {
        let n = self.nodes.len();
        let idx = |name: &str| self.nodes.iter().position(|x| x == name).unwrap();
        let mut dist = vec![vec![u64::MAX; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0;
        }
        for (_, a, b, cost) in &self.links {
            let (a, b) = (idx(a), idx(b));
            dist[a][b] = dist[a][b].min(*cost as u64);
            dist[b][a] = dist[b][a].min(*cost as u64);
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if dist[i][k] != u64::MAX && dist[k][j] != u64::MAX && dist[i][k] + dist[k][j] < dist[i][j] {
                        dist[i][j] = dist[i][k] + dist[k][j];
                    }
                }
            }
        }
        dist.into_iter()
            .map(|row| row.into_iter().map(|d| if d == u64::MAX { INF } else { d as u32 }).collect())
            .collect()
    }

    pub fn freeze(&self) -> String {
        self.network.freeze().unwrap()
    }
}
