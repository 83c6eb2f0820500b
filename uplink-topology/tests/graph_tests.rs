// Tests for adjacency graph construction

use uplink_topology::catalog::InMemoryCatalog;
use uplink_topology::graph::{AdjacencyGraph, build_adjacency};
use uplink_topology::model::{EdgeEndpoint, Node, NodeIdentity, Protocol, TopologyEdge};

const FS: &str = "GraphTests";

fn node(label: &str) -> Node {
    Node {
        identity: NodeIdentity::new(FS, label),
        label: label.to_string(),
        location: "HQ".to_string(),
        categories: Default::default(),
        meta_data: Vec::new(),
        ip_interfaces: Vec::new(),
    }
}

fn catalog(labels: &[&str]) -> InMemoryCatalog {
    InMemoryCatalog::new(labels.iter().map(|l| node(l)).collect(), Vec::new())
}

fn node_endpoint(label: &str) -> EdgeEndpoint {
    EdgeEndpoint::Node {
        identity: NodeIdentity::new(FS, label),
    }
}

fn port_endpoint(label: &str) -> EdgeEndpoint {
    EdgeEndpoint::Port {
        node: NodeIdentity::new(FS, label),
    }
}

fn edge(id: &str, source: EdgeEndpoint, target: EdgeEndpoint) -> TopologyEdge {
    TopologyEdge::new(id, Protocol::Lldp, source, target)
}

// ============================================================================
// Direct graph operations
// ============================================================================

#[test]
fn test_link_is_symmetric() {
    let mut graph = AdjacencyGraph::new();
    graph.link("a", "b");
    assert!(graph.neighbors("a").contains("b"));
    assert!(graph.neighbors("b").contains("a"));
}

#[test]
fn test_neighbors_of_unknown_label_is_empty() {
    let graph = AdjacencyGraph::new();
    assert!(graph.neighbors("nowhere").is_empty());
    assert!(!graph.contains("nowhere"));
}

#[test]
fn test_duplicate_links_are_idempotent() {
    let mut graph = AdjacencyGraph::new();
    graph.link("a", "b");
    graph.link("a", "b");
    graph.link("b", "a");
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.neighbors("a").len(), 1);
    assert_eq!(graph.neighbors("b").len(), 1);
}

// ============================================================================
// Building from edge sets
// ============================================================================

#[test]
fn test_build_from_port_endpoints() {
    let catalog = catalog(&["sw", "h1"]);
    let edges = vec![edge("e1", port_endpoint("sw"), port_endpoint("h1"))];

    let graph = build_adjacency(&edges, &catalog).unwrap();
    assert!(graph.neighbors("sw").contains("h1"));
    assert!(graph.neighbors("h1").contains("sw"));
}

#[test]
fn test_build_from_node_endpoints() {
    let catalog = catalog(&["gw", "sw"]);
    let edges = vec![edge("e1", node_endpoint("gw"), node_endpoint("sw"))];

    let graph = build_adjacency(&edges, &catalog).unwrap();
    assert!(graph.neighbors("gw").contains("sw"));
    assert!(graph.neighbors("sw").contains("gw"));
}

#[test]
fn test_every_inserted_edge_is_symmetric() {
    let catalog = catalog(&["sw", "h1", "h2", "h3"]);
    let edges = vec![
        edge("e1", port_endpoint("sw"), port_endpoint("h1")),
        edge("e2", port_endpoint("sw"), port_endpoint("h2")),
        edge("e3", node_endpoint("h2"), node_endpoint("h3")),
    ];

    let graph = build_adjacency(&edges, &catalog).unwrap();
    for a in graph.labels() {
        for b in graph.neighbors(a) {
            assert!(
                graph.neighbors(&b).contains(a),
                "edge {}-{} missing reverse direction",
                a,
                b
            );
        }
    }
}

#[test]
fn test_segment_edge_is_dropped() {
    let catalog = catalog(&["sw", "h1"]);
    let edges = vec![
        edge("e1", port_endpoint("sw"), port_endpoint("h1")),
        edge(
            "e2",
            port_endpoint("sw"),
            EdgeEndpoint::Segment {
                criteria: "s:1:1|m:unknown".to_string(),
            },
        ),
    ];

    let graph = build_adjacency(&edges, &catalog).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.neighbors("sw").len(), 1);
}

#[test]
fn test_dangling_identity_edge_is_dropped() {
    let catalog = catalog(&["sw"]);
    let edges = vec![edge("e1", port_endpoint("sw"), port_endpoint("ghost"))];

    let graph = build_adjacency(&edges, &catalog).unwrap();
    assert!(graph.is_empty());
}

#[test]
fn test_empty_edge_set_builds_empty_graph() {
    let catalog = catalog(&["sw"]);
    let graph = build_adjacency(&[], &catalog).unwrap();
    assert!(graph.is_empty());
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn test_duplicate_edges_from_catalog_are_idempotent() {
    let catalog = catalog(&["sw", "h1"]);
    let edges = vec![
        edge("e1", port_endpoint("sw"), port_endpoint("h1")),
        edge("e2", port_endpoint("h1"), port_endpoint("sw")),
    ];

    let graph = build_adjacency(&edges, &catalog).unwrap();
    assert_eq!(graph.neighbors("sw").len(), 1);
    assert_eq!(graph.neighbors("h1").len(), 1);
}
