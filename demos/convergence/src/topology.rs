use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use linkstate::framework::{ProtocolParams, RoutingSystem};
use linkstate::network::Network;
use serde::{Deserialize, Serialize};

pub struct DemoSystem;

impl RoutingSystem for DemoSystem {
    type NodeAddress = String;
    type InterfaceAddress = String;
}

/// A symmetric link, addresses default to the node names
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkSpec {
    pub a: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_addr: Option<String>,
    pub b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_addr: Option<String>,
    pub cost: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TopologyFile {
    pub nodes: Vec<String>,
    pub links: Vec<LinkSpec>,
    #[serde(default)]
    pub params: ProtocolParams,
}

impl TopologyFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read topology file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("invalid topology file {}", path.display()))
    }

    /// five routers on four point-to-point subnets, plus a backup link
    pub fn sample() -> Self {
        let link = |a: &str, a_addr: &str, b: &str, b_addr: &str, cost| LinkSpec {
            a: a.to_string(),
            a_addr: Some(a_addr.to_string()),
            b: b.to_string(),
            b_addr: Some(b_addr.to_string()),
            cost,
        };
        Self {
            nodes: ["A", "B", "C", "D", "E"].iter().map(|n| n.to_string()).collect(),
            links: vec![
                link("A", "10.0.1.1", "B", "10.0.1.2", 2),
                link("A", "10.0.2.1", "C", "10.0.2.3", 1),
                link("B", "10.0.3.2", "C", "10.0.3.3", 4),
                link("B", "10.0.4.2", "D", "10.0.4.4", 5),
                link("C", "10.0.5.3", "E", "10.0.5.5", 8),
                link("D", "10.0.6.4", "E", "10.0.6.5", 1),
            ],
            params: ProtocolParams::default(),
        }
    }

    pub fn build(&self, params: ProtocolParams) -> anyhow::Result<Network<DemoSystem>> {
        let mut network = Network::with_params(self.nodes.len(), params);
        for node in &self.nodes {
            network.add_node(node.clone())?;
        }
        let id = |name: &str| {
            self.nodes
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| anyhow!("link refers to unknown node {name}"))
        };
        for link in &self.links {
            let a_addr = link.a_addr.clone().unwrap_or_else(|| link.a.clone());
            let b_addr = link.b_addr.clone().unwrap_or_else(|| link.b.clone());
            network
                .connect(id(&link.a)?, a_addr, id(&link.b)?, b_addr, link.cost)
                .with_context(|| format!("failed to connect {} and {}", link.a, link.b))?;
        }
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_converges() {
        let mut network = TopologyFile::sample().build(ProtocolParams::default()).unwrap();
        network.run_convergence().unwrap();
        let a = network.find(&"A".to_string()).unwrap().get_table();
        let e = a.get(&"10.0.6.5".to_string()).unwrap();
        assert_eq!((e.next_hop.as_str(), e.cost), ("10.0.1.2", 8));
    }

    #[test]
    fn addresses_default_to_node_names() {
        let file: TopologyFile = serde_json::from_str(
            r#"{"nodes": ["x", "y"], "links": [{"a": "x", "b": "y", "cost": 3}]}"#,
        )
        .unwrap();
        assert!(file.params.flood_to_sender);
        let mut network = file.build(file.params.clone()).unwrap();
        network.run_convergence().unwrap();
        let x = network.find(&"x".to_string()).unwrap().get_table();
        assert_eq!(x.get(&"y".to_string()).map(|e| e.cost), Some(3));
    }

    #[test]
    fn unknown_node_in_link() {
        let file: TopologyFile = serde_json::from_str(
            r#"{"nodes": ["x"], "links": [{"a": "x", "b": "nope", "cost": 1}]}"#,
        )
        .unwrap();
        let err = file.build(ProtocolParams::default()).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
