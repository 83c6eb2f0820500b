use crate::model::Node;
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use tracing::{debug, warn};

/// Resolved gateway assignments for one discovery cycle.
///
/// Maps each hinted child label to the label of the device owning its gateway
/// IP. Also keeps the raw IP-to-label index for operational tooling.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GatewayMap {
    children: HashMap<String, String>,
    labels_by_ip: HashMap<IpAddr, String>,
}

impl GatewayMap {
    /// Record a resolved child -> gateway assignment.
    pub fn insert(&mut self, child: impl Into<String>, gateway: impl Into<String>) {
        self.children.insert(child.into(), gateway.into());
    }

    /// The resolved gateway label for a child, if the child carried a hint
    /// that resolved.
    pub fn gateway_of(&self, child: &str) -> Option<&str> {
        self.children.get(child).map(String::as_str)
    }

    /// Group the map into gateway label -> set of hinted children, the shape
    /// the discovery engine walks.
    pub fn by_gateway(&self) -> HashMap<String, HashSet<String>> {
        let mut grouped: HashMap<String, HashSet<String>> = HashMap::new();
        for (child, gateway) in &self.children {
            grouped
                .entry(gateway.clone())
                .or_default()
                .insert(child.clone());
        }
        grouped
    }

    /// Label of the device owning a gateway IP, when one resolved this cycle.
    pub fn gateway_label(&self, ip: &IpAddr) -> Option<&str> {
        self.labels_by_ip.get(ip).map(String::as_str)
    }

    pub fn gateways(&self) -> HashSet<&str> {
        self.children.values().map(String::as_str).collect()
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &str)> {
        self.children.iter().map(|(c, g)| (c.as_str(), g.as_str()))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Resolves per-node gateway-IP metadata hints into node labels.
#[derive(Debug, Clone)]
pub struct GatewayResolver {
    context: String,
    gateway_key: String,
    excluded_foreign_source: String,
}

impl GatewayResolver {
    pub fn new(
        context: impl Into<String>,
        gateway_key: impl Into<String>,
        excluded_foreign_source: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            gateway_key: gateway_key.into(),
            excluded_foreign_source: excluded_foreign_source.into(),
        }
    }

    /// Resolve every gateway hint in the node snapshot.
    ///
    /// A malformed address or a hint with no owning device excludes that node
    /// from the map; neither is fatal. A node owning its own hinted IP is
    /// skipped so no node becomes its own gateway.
    pub fn resolve(&self, nodes: &[Node]) -> GatewayMap {
        let mut map = GatewayMap::default();

        for node in nodes {
            let Some(hint) = node.meta_value(&self.context, &self.gateway_key) else {
                continue;
            };
            let ip: IpAddr = match hint.parse() {
                Ok(ip) => ip,
                Err(_) => {
                    warn!(node = %node.label, hint, "malformed gateway address in metadata");
                    continue;
                }
            };

            let Some(gateway) = self.find_gateway_label(nodes, &node.location, &ip) else {
                debug!(node = %node.label, %ip, "no device found owning gateway address");
                continue;
            };
            if gateway == node.label {
                debug!(node = %node.label, %ip, "node owns its own gateway address, skipping");
                continue;
            }

            debug!(node = %node.label, %ip, gateway = %gateway, "resolved gateway hint");
            map.labels_by_ip.insert(ip, gateway.clone());
            map.children.insert(node.label.clone(), gateway);
        }

        map
    }

    /// First node in the snapshot owning `ip` at `location`, excluding nodes
    /// from the excluded foreign source.
    fn find_gateway_label(&self, nodes: &[Node], location: &str, ip: &IpAddr) -> Option<String> {
        nodes
            .iter()
            .find(|n| {
                n.identity.foreign_source != self.excluded_foreign_source
                    && n.location == location
                    && n.owns_ip(ip)
            })
            .map(|n| n.label.clone())
    }
}
