// Tests for the fixed-delay scheduler

use std::sync::Arc;
use std::time::Duration;
use uplink_core::config::ResolverConfig;
use uplink_core::scheduler::Scheduler;
use uplink_core::service::ParentService;
use uplink_topology::catalog::InMemoryCatalog;
use uplink_topology::model::{MetaData, Node, NodeIdentity};

fn small_service() -> Arc<ParentService> {
    let nodes = vec![
        Node {
            identity: NodeIdentity::new("SchedTests", "gw"),
            label: "gw".to_string(),
            location: "LAB".to_string(),
            categories: Default::default(),
            meta_data: Vec::new(),
            ip_interfaces: vec!["10.0.0.254".parse().unwrap()],
        },
        Node {
            identity: NodeIdentity::new("SchedTests", "h1"),
            label: "h1".to_string(),
            location: "LAB".to_string(),
            categories: Default::default(),
            meta_data: vec![MetaData::new("provision", "gateway", "10.0.0.254")],
            ip_interfaces: vec!["10.0.0.1".parse().unwrap()],
        },
    ];
    let catalog = Arc::new(InMemoryCatalog::new(nodes, Vec::new()));
    Arc::new(ParentService::new(
        catalog.clone(),
        catalog,
        ResolverConfig::default(),
    ))
}

#[tokio::test]
async fn test_scheduler_runs_cycles() {
    let service = small_service();
    let scheduler = Scheduler::start(
        service.clone(),
        Duration::from_millis(5),
        Duration::from_millis(5),
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    // Orphan fallback resolves h1 to gw even with no edges.
    let snapshot = service.snapshot();
    assert!(snapshot.cycle >= 1);
    assert_eq!(snapshot.parent_of("h1"), Some("gw"));

    scheduler.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_before_first_cycle() {
    let service = small_service();
    let scheduler = Scheduler::start(
        service.clone(),
        Duration::from_secs(3600),
        Duration::from_secs(3600),
    );

    scheduler.shutdown().await;
    assert_eq!(service.snapshot().cycle, 0);
}

#[tokio::test]
async fn test_shutdown_finishes_task() {
    let service = small_service();
    let scheduler = Scheduler::start(
        service,
        Duration::from_millis(1),
        Duration::from_secs(3600),
    );

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!scheduler.is_finished());
    scheduler.shutdown().await;
}
