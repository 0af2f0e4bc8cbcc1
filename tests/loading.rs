//! GeoJSON files through to itineraries

mod common;

use butterfly_indoor::geojson::{load_edges, load_nodes};
use butterfly_indoor::{Config, Direction, Floor, NodeId, RouteError, RouteService};
use std::fs;
use tempfile::TempDir;

use common::{write_building, LAB, LOBBY};

#[test]
fn test_load_building_files() {
    let dir = TempDir::new().unwrap();
    let (nodes_path, edges_path) = write_building(dir.path());

    let nodes = load_nodes(&nodes_path).unwrap();
    assert_eq!(nodes.len(), 7);
    assert_eq!(nodes.blocked_count(), 1);
    assert!(nodes.get("NODE_003").unwrap().blocked);
    // Coordinates from Point geometry when X/Y are absent
    assert_eq!(nodes.coordinates("NODE_003"), Some([4.0, 3.0]));
    assert_eq!(nodes.get("NODE_006").unwrap().floor, Some(Floor(1)));

    let edges = load_edges(&edges_path).unwrap();
    assert_eq!(edges.len(), 7);
    assert!(edges.iter().all(|e| !e.one_way));
}

#[test]
fn test_service_from_config_file() {
    let dir = TempDir::new().unwrap();
    write_building(dir.path());
    let config_path = dir.path().join("butterfly-indoor.yaml");
    fs::write(
        &config_path,
        "nodes: Nodes.geojson\nedges: Edges.geojson\nfloor_names:\n  0: lobby level\n  1: labs\n",
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    assert_eq!(config.floor_name(Floor(1)), "labs");

    let service = RouteService::from_config(config).unwrap();
    let itinerary = service
        .itinerary(&NodeId::from(LOBBY), &NodeId::from(LAB))
        .unwrap();

    let route: Vec<&str> = itinerary.route.nodes.iter().map(NodeId::as_str).collect();
    assert_eq!(
        route,
        vec!["NODE_001", "NODE_002", "NODE_004", "NODE_006", "NODE_007"]
    );
    assert!((itinerary.route.distance - 14.6).abs() < 1e-9);
    assert_eq!(itinerary.steps.len(), 2);
    assert_eq!(itinerary.transitions[0].direction, Direction::Up);
    assert_eq!(itinerary.coordinates.first(), Some(&[0.0, 0.0]));
    assert_eq!(itinerary.coordinates.last(), Some(&[6.0, 3.0]));
}

#[test]
fn test_accessibility_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let (nodes, edges) = write_building(dir.path());
    let config = Config {
        nodes,
        edges,
        respect_accessibility: false,
        ..Config::default()
    };

    let service = RouteService::from_config(config).unwrap();
    let route = service
        .route(&NodeId::from(LOBBY), &NodeId::from(LAB))
        .unwrap();
    assert_eq!(route.len(), 5);
    assert!(route.nodes.contains(&NodeId::from("NODE_003")));
    assert_eq!(route.distance, 10.0);
}

#[test]
fn test_reload_from_disk_picks_up_changes() {
    let dir = TempDir::new().unwrap();
    let (nodes, edges) = write_building(dir.path());
    let config = Config {
        nodes: nodes.clone(),
        edges: edges.clone(),
        ..Config::default()
    };
    let service = RouteService::from_config(config).unwrap();
    assert_eq!(service.stats().directed_edges, 14);

    // Make the stairs one-way upwards
    let patched = common::EDGES.replace(r#""isOneWay": false"#, r#""isOneWay": "true""#);
    fs::write(&edges, patched).unwrap();
    service.reload_from_disk().unwrap();

    assert_eq!(service.stats().directed_edges, 13);
    let down = service.route(&NodeId::from(LAB), &NodeId::from(LOBBY));
    assert!(down.is_err(), "stairs are up-only and the lift car is blocked");
}

#[test]
fn test_broken_files_are_reported() {
    let dir = TempDir::new().unwrap();
    let (nodes, edges) = write_building(dir.path());

    fs::write(&edges, r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"Start_NODE": "A", "End_NODE": "B", "Shape_Length": -2}}
    ]}"#)
    .unwrap();
    assert!(matches!(load_edges(&edges), Err(RouteError::InvalidInput(_))));

    fs::write(&nodes, "not json at all").unwrap();
    assert!(matches!(load_nodes(&nodes), Err(RouteError::Json(_))));
}
