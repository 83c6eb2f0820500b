use crate::gateway::GatewayMap;
use crate::graph::AdjacencyGraph;
use crate::model::Protocol;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Nearest resolved parent per node label; the authoritative output of one
/// discovery cycle.
pub type ParentMap = HashMap<String, String>;

/// Tunables for bounded parent discovery.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Hard hop limit for the level-by-level walk from each gateway.
    pub max_hops: usize,
    /// Assign unresolved hinted children their own gateway as parent after
    /// all protocols have run, making the result total over the gateway map.
    pub orphan_fallback: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_hops: 10,
            orphan_fallback: true,
        }
    }
}

/// Run discovery over every protocol graph in priority order and merge the
/// results first-writer-wins: a child resolved by a higher-priority protocol
/// is never overwritten by a lower-priority one.
pub fn resolve_parents(
    graphs: &HashMap<Protocol, AdjacencyGraph>,
    gateway_map: &GatewayMap,
    options: &DiscoveryOptions,
) -> ParentMap {
    let by_gateway = gateway_map.by_gateway();
    let mut parents = ParentMap::new();

    for protocol in Protocol::PRIORITY {
        let Some(graph) = graphs.get(&protocol) else {
            continue;
        };
        let found = discover_protocol(graph, &by_gateway, options.max_hops);
        info!(%protocol, found = found.len(), "protocol discovery pass complete");
        for (child, parent) in found {
            parents.entry(child).or_insert(parent);
        }
    }

    if options.orphan_fallback {
        let before = parents.len();
        for (child, gateway) in gateway_map.children() {
            if child != gateway {
                parents
                    .entry(child.to_string())
                    .or_insert_with(|| gateway.to_string());
            }
        }
        info!(
            orphans = parents.len() - before,
            "assigned gateway fallback to unresolved children"
        );
    }

    parents
}

/// Bounded nearest-ancestor search over one protocol's adjacency graph.
///
/// From each gateway, walk outward level by level for at most `max_hops`
/// rounds, claiming hinted children the first time they become reachable. A
/// strict visited set terminates the walk on cyclic graphs independently of
/// the hop cap. Children not reached within the bound are simply left
/// unresolved.
pub fn discover_protocol(
    graph: &AdjacencyGraph,
    by_gateway: &HashMap<String, HashSet<String>>,
    max_hops: usize,
) -> ParentMap {
    let mut parents = ParentMap::new();

    if graph.is_empty() {
        debug!("adjacency graph is empty, nothing to discover");
        return parents;
    }
    if by_gateway.is_empty() {
        debug!("gateway map is empty, nothing to discover");
        return parents;
    }

    for (gateway, children) in by_gateway {
        if !graph.contains(gateway) {
            debug!(gateway = %gateway, "gateway has no edges in this graph");
            continue;
        }
        let mut remaining = children.clone();
        debug!(gateway = %gateway, children = remaining.len(), "walking from gateway");

        let mut frontier: HashSet<String> = HashSet::from([gateway.clone()]);
        let mut visited: HashSet<String> = HashSet::new();
        let mut hops = 0;

        while !frontier.is_empty() && !remaining.is_empty() && hops < max_hops {
            frontier = expand_level(graph, &frontier, &mut visited, &mut remaining, &mut parents);
            hops += 1;
        }
    }

    parents
}

/// Process one frontier level: claim reachable children and return the next
/// frontier (all newly reachable labels minus the visited set).
fn expand_level(
    graph: &AdjacencyGraph,
    frontier: &HashSet<String>,
    visited: &mut HashSet<String>,
    remaining: &mut HashSet<String>,
    parents: &mut ParentMap,
) -> HashSet<String> {
    let mut next: HashSet<String> = HashSet::new();

    for level in frontier {
        visited.insert(level.clone());
        let reachable = graph.neighbors(level);

        let matched: Vec<String> = reachable
            .iter()
            .filter(|label| label.as_str() != level.as_str() && remaining.contains(label.as_str()))
            .cloned()
            .collect();
        for child in matched {
            debug!(level = %level, child = %child, "claimed child at this level");
            remaining.remove(&child);
            parents.insert(child, level.clone());
        }

        next.extend(reachable);
    }

    next.retain(|label| !visited.contains(label));
    next
}
