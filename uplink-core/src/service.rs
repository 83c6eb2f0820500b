use crate::config::ResolverConfig;
use crate::snapshot::{ParentSnapshot, SnapshotCell};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};
use uplink_topology::catalog::{EdgeCatalog, NodeCatalog};
use uplink_topology::discovery::{DiscoveryOptions, resolve_parents};
use uplink_topology::error::Result;
use uplink_topology::gateway::{GatewayMap, GatewayResolver};
use uplink_topology::graph::{AdjacencyGraph, build_adjacency};
use uplink_topology::model::{Node, Protocol};

/// Returned when neither an operator override nor a computed entry exists.
pub const NO_PARENT_FOUND: &str = "NoParentNodeFound";
/// Returned when a gateway IP has no resolved owning device.
pub const NO_GATEWAY_LABEL: &str = "noGatewayLabelFound";

/// Counters from one completed discovery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub cycle: u64,
    pub nodes: usize,
    pub gateways: usize,
    pub parents: usize,
}

/// State retained from the last completed cycle for the diagnostic accessors.
#[derive(Debug, Default)]
struct CycleState {
    nodes: Vec<Node>,
    locations: HashSet<String>,
    gateway_map: GatewayMap,
    graphs: HashMap<Protocol, AdjacencyGraph>,
}

/// Parent resolution service: runs the discovery pipeline and answers parent
/// lookups against the latest published snapshot.
///
/// Lookups are safe to call concurrently with an in-progress cycle; they see
/// either the prior complete map or the new one, never a torn intermediate.
pub struct ParentService {
    node_catalog: Arc<dyn NodeCatalog>,
    edge_catalog: Arc<dyn EdgeCatalog>,
    config: ResolverConfig,
    snapshot: SnapshotCell,
    state: RwLock<CycleState>,
    cycles_run: AtomicU64,
}

impl ParentService {
    pub fn new(
        node_catalog: Arc<dyn NodeCatalog>,
        edge_catalog: Arc<dyn EdgeCatalog>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            node_catalog,
            edge_catalog,
            config,
            snapshot: SnapshotCell::new(),
            state: RwLock::new(CycleState::default()),
            cycles_run: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Run one synchronous discovery cycle and publish the result.
    ///
    /// A catalog failure aborts the cycle with an error; the previously
    /// published snapshot stays authoritative until the next successful run.
    pub fn run_cycle(&self) -> Result<CycleSummary> {
        let nodes = self.node_catalog.nodes()?;
        info!(nodes = nodes.len(), "cycle: loaded node snapshot");

        let resolver = GatewayResolver::new(
            &self.config.context,
            &self.config.gateway_key,
            &self.config.excluded_foreign_source,
        );
        let gateway_map = resolver.resolve(&nodes);
        info!(gateways = gateway_map.len(), "cycle: resolved gateway hints");

        let locations: HashSet<String> = nodes.iter().map(|n| n.location.clone()).collect();

        let mut graphs = HashMap::new();
        for protocol in Protocol::PRIORITY {
            let edges = self.edge_catalog.edges(protocol)?;
            let graph = build_adjacency(&edges, self.node_catalog.as_ref())?;
            info!(
                %protocol,
                edges = edges.len(),
                labels = graph.node_count(),
                "cycle: built adjacency graph"
            );
            graphs.insert(protocol, graph);
        }

        let options = DiscoveryOptions {
            max_hops: self.config.max_hops,
            orphan_fallback: self.config.orphan_fallback,
        };
        let parents = resolve_parents(&graphs, &gateway_map, &options);

        let cycle = self.cycles_run.fetch_add(1, Ordering::SeqCst) + 1;
        let summary = CycleSummary {
            cycle,
            nodes: nodes.len(),
            gateways: gateway_map.len(),
            parents: parents.len(),
        };
        info!(cycle, parents = parents.len(), "cycle: publishing parent map");

        self.snapshot.store(ParentSnapshot {
            parents,
            computed_at: Utc::now(),
            cycle,
        });
        self.replace_state(CycleState {
            nodes,
            locations,
            gateway_map,
            graphs,
        });

        Ok(summary)
    }

    /// Resolved parent for a node: the operator metadata override when
    /// present, else the computed map, else the sentinel.
    pub fn parent_of(&self, node: &Node) -> String {
        if let Some(parent) = self.parent_by_parent_key(node) {
            return parent;
        }
        self.parent_by_gateway_key(node)
    }

    /// The operator-declared parent override, verbatim, when the node carries
    /// one. Bypasses computed resolution entirely.
    pub fn parent_by_parent_key(&self, node: &Node) -> Option<String> {
        let parent = node
            .meta_value(&self.config.context, &self.config.parent_key)
            .map(str::to_string);
        match &parent {
            Some(p) => debug!(node = %node.label, parent = %p, "parent override present"),
            None => debug!(node = %node.label, "no parent override"),
        }
        parent
    }

    /// Computed parent from the latest published snapshot, or the sentinel.
    pub fn parent_by_gateway_key(&self, node: &Node) -> String {
        match self.snapshot.load().parent_of(&node.label) {
            Some(parent) => parent.to_string(),
            None => NO_PARENT_FOUND.to_string(),
        }
    }

    /// Every node from the last cycle with a resolvable parent (override or
    /// computed), keyed by label. Sentinel misses are omitted.
    pub fn parent_map(&self) -> HashMap<String, String> {
        let snapshot = self.snapshot.load();
        let state = self.read_state();
        state
            .nodes
            .iter()
            .filter_map(|node| {
                let parent = self
                    .parent_by_parent_key(node)
                    .or_else(|| snapshot.parent_of(&node.label).map(str::to_string))?;
                Some((node.label.clone(), parent))
            })
            .collect()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<ParentSnapshot> {
        self.snapshot.load()
    }

    /// Locations seen in the last node snapshot.
    pub fn locations(&self) -> HashSet<String> {
        self.read_state().locations.clone()
    }

    /// Gateway labels resolved in the last cycle.
    pub fn gateways(&self) -> HashSet<String> {
        self.read_state()
            .gateway_map
            .gateways()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Child -> gateway assignments from the last cycle.
    pub fn gateway_map(&self) -> HashMap<String, String> {
        self.read_state()
            .gateway_map
            .children()
            .map(|(c, g)| (c.to_string(), g.to_string()))
            .collect()
    }

    /// Label of the device owning a gateway IP, or the sentinel.
    pub fn gateway_label(&self, ip: &IpAddr) -> String {
        match self.read_state().gateway_map.gateway_label(ip) {
            Some(label) => label.to_string(),
            None => NO_GATEWAY_LABEL.to_string(),
        }
    }

    /// Every label present in one protocol's last-built graph.
    pub fn graph_labels(&self, protocol: Protocol) -> Vec<String> {
        self.read_state()
            .graphs
            .get(&protocol)
            .map(|g| g.labels().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Direct neighbors of a label in one protocol's last-built graph.
    pub fn neighbors(&self, protocol: Protocol, label: &str) -> HashSet<String> {
        self.read_state()
            .graphs
            .get(&protocol)
            .map(|g| g.neighbors(label))
            .unwrap_or_default()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, CycleState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn replace_state(&self, state: CycleState) {
        match self.state.write() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }
}
