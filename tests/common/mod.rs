//! Shared fixtures for integration tests
//!
//! A two-floor building: a lobby corridor on the ground floor, a lab upstairs,
//! reachable by a lift (ground-floor car blocked) or by the stairs.
//!
//! ```text
//! floor 1:              Lift1 --2-- Lab --3.6-- Stair1
//!                         |1                      |3
//! floor 0:  Lobby --4-- Hall --3-- Lift0(x)       |
//!                         \---------4-------- Stair0
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const NODES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"NODE_ID": "NODE_001", "Floor": "0", "Access": "false", "X": 0.0, "Y": 0.0}, "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}},
    {"type": "Feature", "properties": {"NODE_ID": "NODE_002", "Floor": 0, "X": 4.0, "Y": 0.0}, "geometry": {"type": "Point", "coordinates": [4.0, 0.0]}},
    {"type": "Feature", "properties": {"NODE_ID": "NODE_003", "Floor": "ground", "Access": "true"}, "geometry": {"type": "Point", "coordinates": [4.0, 3.0]}},
    {"type": "Feature", "properties": {"NODE_ID": "NODE_004", "Floor": 0, "Access": 0, "X": 8.0, "Y": 0.0}, "geometry": null},
    {"type": "Feature", "properties": {"NODE_ID": "NODE_005", "Floor": "1", "X": 4.0, "Y": 3.0}, "geometry": null},
    {"type": "Feature", "properties": {"NODE_ID": "NODE_006", "Floor": "first", "X": 8.0, "Y": 0.0}, "geometry": null},
    {"type": "Feature", "properties": {"NODE_ID": "NODE_007", "Floor": 1, "Access": false, "X": 6.0, "Y": 3.0}, "geometry": null}
  ]
}"#;

pub const EDGES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"Start_NODE": "NODE_001", "End_NODE": "NODE_002", "Shape_Length": 4.0}, "geometry": null},
    {"type": "Feature", "properties": {"Start_NODE": "NODE_002", "End_NODE": "NODE_003", "Shape_Length": 3.0}, "geometry": null},
    {"type": "Feature", "properties": {"Start_NODE": "NODE_003", "End_NODE": "NODE_005", "Shape_Length": 1.0}, "geometry": null},
    {"type": "Feature", "properties": {"Start_NODE": "NODE_005", "End_NODE": "NODE_007", "Shape_Length": 2.0}, "geometry": null},
    {"type": "Feature", "properties": {"Start_NODE": "NODE_002", "End_NODE": "NODE_004", "Shape_Length": "4.0"}, "geometry": null},
    {"type": "Feature", "properties": {"Start_NODE": "NODE_004", "End_NODE": "NODE_006", "Shape_Length": 3.0, "isOneWay": false}, "geometry": null},
    {"type": "Feature", "properties": {"Start_NODE": "NODE_006", "End_NODE": "NODE_007", "Shape_Length": 3.6}, "geometry": null}
  ]
}"#;

pub const LOBBY: &str = "NODE_001";
pub const LAB: &str = "NODE_007";

/// Write `Nodes.geojson` and `Edges.geojson` into `dir`
pub fn write_building(dir: &Path) -> (PathBuf, PathBuf) {
    let nodes = dir.join("Nodes.geojson");
    let edges = dir.join("Edges.geojson");
    fs::write(&nodes, NODES).unwrap();
    fs::write(&edges, EDGES).unwrap();
    (nodes, edges)
}
