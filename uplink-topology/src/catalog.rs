use crate::error::Result;
use crate::model::{Node, NodeIdentity, Protocol, TopologyEdge};
use std::collections::HashMap;

/// Read access to the node inventory. Each call returns a fresh snapshot;
/// implementations may block while querying their backend.
pub trait NodeCatalog: Send + Sync {
    /// Ordered snapshot of every node in the inventory.
    fn nodes(&self) -> Result<Vec<Node>>;

    /// Look a single node up by its requisition identity.
    fn find_by_identity(&self, identity: &NodeIdentity) -> Result<Option<Node>>;
}

/// Read access to discovered topology edges, per protocol.
pub trait EdgeCatalog: Send + Sync {
    fn edges(&self, protocol: Protocol) -> Result<Vec<TopologyEdge>>;
}

/// In-memory catalog over owned node and edge vectors. Backs the file-driven
/// CLI mode and the test suites.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    nodes: Vec<Node>,
    by_identity: HashMap<NodeIdentity, usize>,
    edges: Vec<TopologyEdge>,
}

impl InMemoryCatalog {
    pub fn new(nodes: Vec<Node>, edges: Vec<TopologyEdge>) -> Self {
        let by_identity = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.identity.clone(), i))
            .collect();
        Self {
            nodes,
            by_identity,
            edges,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl NodeCatalog for InMemoryCatalog {
    fn nodes(&self) -> Result<Vec<Node>> {
        Ok(self.nodes.clone())
    }

    fn find_by_identity(&self, identity: &NodeIdentity) -> Result<Option<Node>> {
        Ok(self
            .by_identity
            .get(identity)
            .map(|&i| self.nodes[i].clone()))
    }
}

impl EdgeCatalog for InMemoryCatalog {
    fn edges(&self, protocol: Protocol) -> Result<Vec<TopologyEdge>> {
        Ok(self
            .edges
            .iter()
            .filter(|e| e.protocol == protocol)
            .cloned()
            .collect())
    }
}
