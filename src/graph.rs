//! Adjacency graph built from edge records
//!
//! The graph is built once per data load and never mutated afterwards; the
//! accessibility filter derives a new graph instead.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::node::NodeId;

/// One edge feature: endpoints, physical length, direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    /// Physical distance; must be >= 0
    pub weight: f64,
    #[serde(default)]
    pub one_way: bool,
}

impl EdgeRecord {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
            one_way: false,
        }
    }

    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }
}

/// Outgoing adjacency entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub node: NodeId,
    pub weight: f64,
}

/// Mapping from node id to its ordered outgoing neighbor list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    adjacency: FxHashMap<NodeId, Vec<Neighbor>>,
}

impl Graph {
    /// Build the adjacency structure from edge records.
    ///
    /// Both endpoints of every edge become keys. A bidirectional edge adds
    /// `from → to` and `to → from`; a one-way edge only `from → to`.
    /// Duplicate edges are kept as independent neighbor entries.
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a EdgeRecord>,
    {
        let mut adjacency: FxHashMap<NodeId, Vec<Neighbor>> = FxHashMap::default();
        let mut edge_count = 0usize;

        for edge in edges {
            adjacency.entry(edge.from.clone()).or_default().push(Neighbor {
                node: edge.to.clone(),
                weight: edge.weight,
            });
            edge_count += 1;

            let reverse = adjacency.entry(edge.to.clone()).or_default();
            if !edge.one_way {
                reverse.push(Neighbor {
                    node: edge.from.clone(),
                    weight: edge.weight,
                });
                edge_count += 1;
            }
        }

        debug!(
            nodes = adjacency.len(),
            directed_edges = edge_count,
            "built routing graph"
        );

        Self { adjacency }
    }

    pub(crate) fn from_adjacency(adjacency: FxHashMap<NodeId, Vec<Neighbor>>) -> Self {
        Self { adjacency }
    }

    /// The stored key for `id`, borrowed from the graph
    pub(crate) fn key(&self, id: &str) -> Option<&NodeId> {
        self.adjacency.get_key_value(id).map(|(k, _)| k)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Outgoing neighbors, or `None` if the node is not a key
    pub fn neighbors(&self, id: &str) -> Option<&[Neighbor]> {
        self.adjacency.get(id).map(Vec::as_slice)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed neighbor entries
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Node ids (unordered)
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.adjacency.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[Neighbor])> {
        self.adjacency.iter().map(|(id, n)| (id, n.as_slice()))
    }

    /// Weight of the cheapest direct edge `from → to`
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.neighbors(from)?
            .iter()
            .filter(|n| n.node.as_str() == to)
            .map(|n| n.weight)
            .min_by(f64::total_cmp)
    }
}

/// Build a [`Graph`] from edge records
pub fn build_graph(edges: &[EdgeRecord]) -> Graph {
    Graph::from_edges(edges)
}
