use crate::catalog::NodeCatalog;
use crate::error::Result;
use crate::model::{EdgeEndpoint, TopologyEdge};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Undirected node-label adjacency graph for a single protocol.
///
/// Symmetric by construction: linking `a` to `b` inserts both directions, and
/// set semantics make duplicate edges idempotent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    links: HashMap<String, HashSet<String>>,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an undirected link between two labels.
    pub fn link(&mut self, a: &str, b: &str) {
        self.links
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.links
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Labels directly connected to `label`. Empty when the label has no
    /// entry in this graph.
    pub fn neighbors(&self, label: &str) -> HashSet<String> {
        self.links.get(label).cloned().unwrap_or_default()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.links.contains_key(label)
    }

    pub fn node_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }
}

/// Build the adjacency graph for one protocol's edge set.
///
/// `Node` and `Port` endpoints resolve to labels through the node catalog;
/// an edge touching a `Segment` endpoint, or whose identity is not present in
/// the catalog, is dropped and the build continues.
pub fn build_adjacency(
    edges: &[TopologyEdge],
    catalog: &dyn NodeCatalog,
) -> Result<AdjacencyGraph> {
    let mut graph = AdjacencyGraph::new();
    for edge in edges {
        let source = resolve_endpoint(&edge.id, &edge.source, catalog)?;
        let target = resolve_endpoint(&edge.id, &edge.target, catalog)?;
        match (source, target) {
            (Some(source), Some(target)) => graph.link(&source, &target),
            _ => debug!(edge = %edge.id, "dropping edge with unresolvable endpoint"),
        }
    }
    Ok(graph)
}

fn resolve_endpoint(
    edge_id: &str,
    endpoint: &EdgeEndpoint,
    catalog: &dyn NodeCatalog,
) -> Result<Option<String>> {
    let Some(identity) = endpoint.node_identity() else {
        debug!(edge = edge_id, "segment endpoint has no node identity");
        return Ok(None);
    };
    let node = catalog.find_by_identity(identity)?;
    if node.is_none() {
        debug!(edge = edge_id, identity = %identity, "endpoint identity not in catalog");
    }
    Ok(node.map(|n| n.label))
}
