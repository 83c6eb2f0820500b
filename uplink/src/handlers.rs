use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use uplink_core::config::ResolverConfig;
use uplink_core::inventory::Inventory;
use uplink_core::scheduler::Scheduler;
use uplink_core::service::ParentService;
use uplink_topology::model::Protocol;

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/uplink/config.json";

/// Load the resolver config: an explicit path must exist, the default path is
/// optional, and with neither the built-in defaults apply.
pub fn load_config(path: Option<&String>) -> Result<ResolverConfig> {
    if let Some(path) = path {
        let expanded = shellexpand::tilde(path);
        return Ok(ResolverConfig::from_file(Path::new(expanded.as_ref()))?);
    }
    let expanded = shellexpand::tilde(DEFAULT_CONFIG_PATH);
    let default_path = Path::new(expanded.as_ref());
    if default_path.exists() {
        Ok(ResolverConfig::from_file(default_path)?)
    } else {
        Ok(ResolverConfig::default())
    }
}

pub fn parse_protocol(name: &str) -> Option<Protocol> {
    match name.to_ascii_lowercase().as_str() {
        "lldp" => Some(Protocol::Lldp),
        "cdp" => Some(Protocol::Cdp),
        "bridge" => Some(Protocol::Bridge),
        _ => None,
    }
}

/// Render a label -> label map as sorted "child -> parent" lines.
pub fn format_label_map(map: &std::collections::HashMap<String, String>) -> String {
    let sorted: BTreeMap<_, _> = map.iter().collect();
    let mut out = String::new();
    for (child, parent) in sorted {
        out.push_str(&format!("  {} -> {}\n", child, parent));
    }
    out
}

fn build_service(inventory_path: &PathBuf, config: ResolverConfig) -> Result<Arc<ParentService>> {
    let expanded = shellexpand::tilde(
        inventory_path
            .to_str()
            .context("inventory path is not valid UTF-8")?,
    );
    let catalog = Arc::new(Inventory::from_file(Path::new(expanded.as_ref()))?.into_catalog());
    Ok(Arc::new(ParentService::new(
        catalog.clone(),
        catalog,
        config,
    )))
}

fn service_from_args(args: &ArgMatches) -> Result<Arc<ParentService>> {
    let inventory = args.get_one::<PathBuf>("inventory").unwrap();
    let config = load_config(args.get_one::<String>("config"))?;
    build_service(inventory, config)
}

pub fn handle_resolve(args: &ArgMatches) -> Result<()> {
    let service = service_from_args(args)?;
    let format = args.get_one::<String>("format").unwrap();

    let summary = service.run_cycle()?;
    let snapshot = service.snapshot();

    match format.as_str() {
        "json" => {
            let sorted: BTreeMap<_, _> = snapshot.parents.iter().collect();
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }
        _ => {
            println!(
                "{} Cycle {} complete: {} nodes, {} gateways, {} parents",
                "✓".green().bold(),
                summary.cycle,
                summary.nodes,
                summary.gateways,
                summary.parents
            );
            println!();
            print!("{}", format_label_map(&snapshot.parents));
        }
    }
    Ok(())
}

pub async fn handle_watch(args: &ArgMatches) -> Result<()> {
    let service = service_from_args(args)?;
    let config = service.config();

    let initial_delay = args
        .get_one::<u64>("initial-delay")
        .copied()
        .unwrap_or(config.initial_delay_ms);
    let delay = args
        .get_one::<u64>("delay")
        .copied()
        .unwrap_or(config.delay_ms);

    println!(
        "{} Watching: first cycle in {} ms, then every {} ms after each finish (Ctrl-C to stop)",
        "→".blue(),
        initial_delay,
        delay
    );

    let scheduler = Scheduler::start(
        service,
        Duration::from_millis(initial_delay),
        Duration::from_millis(delay),
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    println!("\n{} Shutting down", "→".blue());
    scheduler.shutdown().await;
    println!("{} Scheduler stopped", "✓".green().bold());
    Ok(())
}

pub fn handle_gateways(args: &ArgMatches) -> Result<()> {
    let service = service_from_args(args)?;
    service.run_cycle()?;

    let gateways = service.gateways();
    println!(
        "{} {} gateway device(s) resolved",
        "✓".green().bold(),
        gateways.len()
    );
    let mut sorted: Vec<_> = gateways.into_iter().collect();
    sorted.sort();
    for gateway in sorted {
        println!("  {}", gateway.bright_white());
    }

    println!();
    println!("Hinted children:");
    print!("{}", format_label_map(&service.gateway_map()));
    Ok(())
}

pub fn handle_graph(args: &ArgMatches) -> Result<()> {
    let service = service_from_args(args)?;
    service.run_cycle()?;

    let protocol_name = args.get_one::<String>("protocol").unwrap();
    let Some(protocol) = parse_protocol(protocol_name) else {
        bail!("unknown protocol: {}", protocol_name);
    };

    let print_neighbors = |label: &str, neighbors: &HashSet<String>| {
        let mut sorted: Vec<_> = neighbors.iter().cloned().collect();
        sorted.sort();
        println!("  {} -> {}", label.bright_white(), sorted.join(", "));
    };

    if let Some(label) = args.get_one::<String>("label") {
        print_neighbors(label, &service.neighbors(protocol, label));
        return Ok(());
    }

    // No label given: dump every label in this protocol's graph.
    let mut sorted = service.graph_labels(protocol);
    sorted.sort();
    println!("{} adjacency:", protocol);
    for label in sorted {
        print_neighbors(&label, &service.neighbors(protocol, &label));
    }
    Ok(())
}

pub fn handle_parent(args: &ArgMatches) -> Result<()> {
    let service = service_from_args(args)?;
    service.run_cycle()?;

    let label = args.get_one::<String>("node").unwrap();
    let by_gateway_key = args.get_flag("by-gateway-key");
    let by_parent_key = args.get_flag("by-parent-key");

    let inventory = args.get_one::<PathBuf>("inventory").unwrap();
    let expanded = shellexpand::tilde(
        inventory
            .to_str()
            .context("inventory path is not valid UTF-8")?,
    );
    let nodes = Inventory::from_file(Path::new(expanded.as_ref()))?.nodes;
    let Some(node) = nodes.iter().find(|n| &n.label == label) else {
        bail!("node not found in inventory: {}", label);
    };

    let parent = if by_gateway_key {
        service.parent_by_gateway_key(node)
    } else if by_parent_key {
        service
            .parent_by_parent_key(node)
            .unwrap_or_else(|| "no override".to_string())
    } else {
        service.parent_of(node)
    };
    println!("{} {} -> {}", "✓".green().bold(), label, parent.bright_white());
    Ok(())
}
