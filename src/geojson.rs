//! GeoJSON loader for floor-plan node and edge feature collections
//!
//! # Node features
//!
//! | Property  | Meaning                                                  |
//! |-----------|----------------------------------------------------------|
//! | `NODE_ID` | unique id (string or number)                             |
//! | `Floor`   | level: integer, numeric string, `ground` or `first`      |
//! | `Access`  | truthy ⇒ node is **blocked**                             |
//! | `X`, `Y`  | planar coordinates; Point geometry is used when missing  |
//!
//! # Edge features
//!
//! | Property       | Meaning                               |
//! |----------------|---------------------------------------|
//! | `Start_NODE`   | source node id                        |
//! | `End_NODE`     | target node id                        |
//! | `Shape_Length` | non-negative, finite weight           |
//! | `isOneWay`     | optional, truthy ⇒ one-way            |
//!
//! Everything is validated here so the routing core never sees malformed
//! records.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, RouteError};
use crate::graph::EdgeRecord;
use crate::node::{Floor, NodeDirectory, NodeId, NodeRecord};

const NODE_ID: &str = "NODE_ID";
const FLOOR: &str = "Floor";
const ACCESS: &str = "Access";
const X: &str = "X";
const Y: &str = "Y";
const START_NODE: &str = "Start_NODE";
const END_NODE: &str = "End_NODE";
const SHAPE_LENGTH: &str = "Shape_Length";
const IS_ONE_WAY: &str = "isOneWay";

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

fn parse_collection(json: &str) -> Result<Vec<Feature>> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    if collection.kind != "FeatureCollection" {
        return Err(RouteError::InvalidInput(format!(
            "expected a FeatureCollection, found '{}'",
            collection.kind
        )));
    }
    Ok(collection.features)
}

/// String or number property rendered as text
fn text_prop(props: &Map<String, Value>, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Number or numeric-string property
fn number_prop(props: &Map<String, Value>, key: &str) -> Option<f64> {
    match props.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Boolean-like value: `true`, `"true"`, `"yes"`, `1`, `"1"` are truthy.
/// Missing or null is `false`; anything unrecognised is `None`.
fn truthy(value: Option<&Value>) -> Option<bool> {
    match value {
        None | Some(Value::Null) => Some(false),
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" | "" => Some(false),
            _ => None,
        },
        Some(_) => None,
    }
}

fn floor_prop(props: &Map<String, Value>, id: &str) -> Option<Floor> {
    let value = match props.get(FLOOR) {
        None | Some(Value::Null) => return None,
        Some(value) => value,
    };

    let floor = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|v| i32::try_from(v).ok())
            .map(Floor),
        Value::String(s) => Floor::parse_label(s),
        _ => None,
    };

    if floor.is_none() {
        warn!(node = id, %value, "unusable floor value, treating as absent");
    }
    floor
}

fn point_coordinates(geometry: Option<&Geometry>) -> Option<(f64, f64)> {
    let geometry = geometry?;
    if geometry.kind != "Point" {
        return None;
    }
    let coords = geometry.coordinates.as_array()?;
    Some((coords.first()?.as_f64()?, coords.get(1)?.as_f64()?))
}

/// Parse a node feature collection into a [`NodeDirectory`]
pub fn parse_nodes(json: &str) -> Result<NodeDirectory> {
    let features = parse_collection(json)?;
    let mut records = Vec::with_capacity(features.len());

    for (i, feature) in features.iter().enumerate() {
        let empty = Map::new();
        let props = feature.properties.as_ref().unwrap_or(&empty);

        let id = text_prop(props, NODE_ID).ok_or_else(|| {
            RouteError::InvalidInput(format!("node feature {i} has no {NODE_ID}"))
        })?;

        let (x, y) = match (number_prop(props, X), number_prop(props, Y)) {
            (Some(x), Some(y)) => (x, y),
            _ => point_coordinates(feature.geometry.as_ref()).ok_or_else(|| {
                RouteError::InvalidInput(format!("node '{id}' has no coordinates"))
            })?,
        };
        if !x.is_finite() || !y.is_finite() {
            return Err(RouteError::InvalidInput(format!(
                "node '{id}' has invalid coordinates"
            )));
        }

        let blocked = truthy(props.get(ACCESS)).ok_or_else(|| {
            RouteError::InvalidInput(format!("node '{id}' has an unrecognised {ACCESS} value"))
        })?;

        let floor = floor_prop(props, &id);

        records.push(NodeRecord {
            id: NodeId::from(id),
            floor,
            blocked,
            x,
            y,
        });
    }

    let directory = NodeDirectory::from_records(records)?;
    debug!(
        nodes = directory.len(),
        blocked = directory.blocked_count(),
        "parsed node features"
    );
    Ok(directory)
}

/// Parse an edge feature collection into edge records
pub fn parse_edges(json: &str) -> Result<Vec<EdgeRecord>> {
    let features = parse_collection(json)?;
    let mut edges = Vec::with_capacity(features.len());

    for (i, feature) in features.iter().enumerate() {
        let empty = Map::new();
        let props = feature.properties.as_ref().unwrap_or(&empty);

        let from = text_prop(props, START_NODE).ok_or_else(|| {
            RouteError::InvalidInput(format!("edge feature {i} has no {START_NODE}"))
        })?;
        let to = text_prop(props, END_NODE).ok_or_else(|| {
            RouteError::InvalidInput(format!("edge feature {i} has no {END_NODE}"))
        })?;

        let weight = number_prop(props, SHAPE_LENGTH).ok_or_else(|| {
            RouteError::InvalidInput(format!("edge {from} -> {to} has no {SHAPE_LENGTH}"))
        })?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(RouteError::InvalidInput(format!(
                "edge {from} -> {to} has invalid length {weight}"
            )));
        }

        let one_way = truthy(props.get(IS_ONE_WAY)).ok_or_else(|| {
            RouteError::InvalidInput(format!(
                "edge {from} -> {to} has an unrecognised {IS_ONE_WAY} value"
            ))
        })?;

        edges.push(EdgeRecord {
            from: NodeId::from(from),
            to: NodeId::from(to),
            weight,
            one_way,
        });
    }

    debug!(edges = edges.len(), "parsed edge features");
    Ok(edges)
}

/// Read and parse a node feature collection file
pub fn load_nodes(path: &Path) -> Result<NodeDirectory> {
    let json = fs::read_to_string(path).map_err(|e| {
        RouteError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read nodes file {}: {e}", path.display()),
        ))
    })?;
    parse_nodes(&json)
}

/// Read and parse an edge feature collection file
pub fn load_edges(path: &Path) -> Result<Vec<EdgeRecord>> {
    let json = fs::read_to_string(path).map_err(|e| {
        RouteError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read edges file {}: {e}", path.display()),
        ))
    })?;
    parse_edges(&json)
}
