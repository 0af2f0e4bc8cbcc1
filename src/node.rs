//! Node identifiers, floor levels and the node directory
//!
//! The directory is the side table built from node records: it answers the
//! accessibility and floor lookups the routing core needs, independent of the
//! graph's own structure.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use crate::error::{suggest_node, Result, RouteError};

/// Opaque, unique node identifier (e.g. `NODE_015`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Floor level; 0 is the ground floor, higher is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Floor(pub i32);

impl Floor {
    pub const GROUND: Floor = Floor(0);

    /// Parse a floor label: an integer, or one of the UI names `ground` / `first`.
    pub fn parse_label(label: &str) -> Option<Floor> {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "ground" => Some(Floor(0)),
            "first" => Some(Floor(1)),
            other => other.parse::<i32>().ok().map(Floor),
        }
    }

    /// UI name for this floor (`ground`, `first`, otherwise `floor-N`)
    pub fn name(&self) -> String {
        match self.0 {
            0 => "ground".to_string(),
            1 => "first".to_string(),
            n => format!("floor-{n}"),
        }
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One navigable point from the node feature collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    /// `None` when the source carried no usable floor
    pub floor: Option<Floor>,
    /// Source attribute `Access`: a truthy value means the node is blocked
    pub blocked: bool,
    pub x: f64,
    pub y: f64,
}

impl NodeRecord {
    pub fn new(id: impl Into<NodeId>, floor: Option<Floor>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            floor,
            blocked: false,
            x,
            y,
        }
    }

    pub fn blocked(mut self) -> Self {
        self.blocked = true;
        self
    }
}

/// Answers "is this node blocked?" for the accessibility filter
pub trait AccessLookup {
    fn is_blocked(&self, id: &NodeId) -> bool;
}

/// Answers "which floor is this node on?" for the path segmenter
pub trait FloorLookup {
    fn floor_of(&self, id: &NodeId) -> Option<Floor>;
}

impl AccessLookup for FxHashSet<NodeId> {
    fn is_blocked(&self, id: &NodeId) -> bool {
        self.contains(id)
    }
}

impl<S: std::hash::BuildHasher> AccessLookup for HashMap<NodeId, bool, S> {
    fn is_blocked(&self, id: &NodeId) -> bool {
        self.get(id).copied().unwrap_or(false)
    }
}

impl<S: std::hash::BuildHasher> FloorLookup for HashMap<NodeId, Floor, S> {
    fn floor_of(&self, id: &NodeId) -> Option<Floor> {
        self.get(id).copied()
    }
}

/// Node records in load order, indexed by id
#[derive(Debug, Clone, Default)]
pub struct NodeDirectory {
    records: Vec<NodeRecord>,
    index: FxHashMap<NodeId, usize>,
}

impl NodeDirectory {
    /// Build a directory, rejecting duplicate ids.
    pub fn from_records(records: Vec<NodeRecord>) -> Result<Self> {
        let mut index = FxHashMap::default();
        index.reserve(records.len());

        for (i, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), i).is_some() {
                return Err(RouteError::InvalidInput(format!(
                    "duplicate node id '{}'",
                    record.id
                )));
            }
        }

        Ok(Self { records, index })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&NodeRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Records in load order
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.records.iter().map(|r| &r.id)
    }

    /// Planar `[x, y]` of a node
    pub fn coordinates(&self, id: &str) -> Option<[f64; 2]> {
        self.get(id).map(|r| [r.x, r.y])
    }

    /// Distinct floors present, ascending
    pub fn floors(&self) -> Vec<Floor> {
        let mut floors: Vec<Floor> = self.records.iter().filter_map(|r| r.floor).collect();
        floors.sort_unstable();
        floors.dedup();
        floors
    }

    /// Number of nodes flagged as blocked
    pub fn blocked_count(&self) -> usize {
        self.records.iter().filter(|r| r.blocked).count()
    }

    /// Case-insensitive substring search over ids, sorted by id.
    ///
    /// An empty term matches everything.
    pub fn search(&self, term: &str, limit: usize) -> Vec<&NodeId> {
        let needle = term.trim().to_lowercase();
        let mut hits: Vec<&NodeId> = self
            .ids()
            .filter(|id| id.as_str().to_lowercase().contains(&needle))
            .collect();
        hits.sort_unstable();
        hits.truncate(limit);
        hits
    }

    /// Closest known id to a misspelled one
    pub fn suggest(&self, id: &str) -> Option<NodeId> {
        suggest_node(id, self.ids())
    }
}

impl AccessLookup for NodeDirectory {
    fn is_blocked(&self, id: &NodeId) -> bool {
        self.get(id.as_str()).is_some_and(|r| r.blocked)
    }
}

impl FloorLookup for NodeDirectory {
    fn floor_of(&self, id: &NodeId) -> Option<Floor> {
        self.get(id.as_str()).and_then(|r| r.floor)
    }
}
