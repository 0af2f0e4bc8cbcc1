//! Cached routing state shared between callers
//!
//! A [`RouteService`] holds an immutable [`Snapshot`] of the loaded data behind
//! a `parking_lot::RwLock<Arc<_>>`. Queries clone the `Arc` and drop the lock
//! immediately; [`RouteService::reload`] builds the next snapshot off-lock and
//! swaps it in under the write lock, so in-flight queries finish on the data
//! they started with.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::dijkstra::{shortest_path, Route};
use crate::error::Result;
use crate::geojson;
use crate::graph::{EdgeRecord, Graph};
use crate::nearest::SpatialIndex;
use crate::node::{Floor, NodeDirectory, NodeId};
use crate::route::find_route;
use crate::segment::{segment_by_floor, Step, Transition};

/// One consistent generation of loaded data
pub struct Snapshot {
    pub directory: NodeDirectory,
    pub graph: Graph,
    pub spatial: SpatialIndex,
}

impl Snapshot {
    pub fn build(directory: NodeDirectory, edges: &[EdgeRecord]) -> Self {
        let graph = Graph::from_edges(edges);
        let spatial = SpatialIndex::build(&directory);

        let unplaced = graph.nodes().filter(|id| !directory.contains(id.as_str())).count();
        if unplaced > 0 {
            warn!(unplaced, "graph nodes without a node record have no floor or coordinates");
        }

        Self {
            directory,
            graph,
            spatial,
        }
    }
}

/// A route with its floor breakdown and drawable coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub route: Route,
    pub steps: Vec<Step>,
    pub transitions: Vec<Transition>,
    /// `[x, y]` per route node that has a node record
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceStats {
    pub nodes: usize,
    pub blocked_nodes: usize,
    pub graph_nodes: usize,
    pub directed_edges: usize,
    pub floors: Vec<Floor>,
}

pub struct RouteService {
    config: Config,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl RouteService {
    pub fn new(directory: NodeDirectory, edges: &[EdgeRecord], config: Config) -> Self {
        Self {
            config,
            snapshot: RwLock::new(Arc::new(Snapshot::build(directory, edges))),
        }
    }

    /// Load the node and edge files named by `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let directory = geojson::load_nodes(&config.nodes)?;
        let edges = geojson::load_edges(&config.edges)?;
        info!(
            nodes = directory.len(),
            edges = edges.len(),
            "loaded floor plan data"
        );
        Ok(Self::new(directory, &edges, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current snapshot; the read lock is held only for the clone
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Replace the cached data
    pub fn reload(&self, directory: NodeDirectory, edges: &[EdgeRecord]) {
        let next = Arc::new(Snapshot::build(directory, edges));
        *self.snapshot.write() = next;
        info!("routing data reloaded");
    }

    /// Re-read the configured files and swap them in
    pub fn reload_from_disk(&self) -> Result<()> {
        let directory = geojson::load_nodes(&self.config.nodes)?;
        let edges = geojson::load_edges(&self.config.edges)?;
        self.reload(directory, &edges);
        Ok(())
    }

    /// Shortest route, honouring `respect_accessibility`
    pub fn route(&self, start: &NodeId, end: &NodeId) -> Result<Route> {
        let snapshot = self.snapshot();
        if self.config.respect_accessibility {
            find_route(&snapshot.graph, &snapshot.directory, start, end)
        } else {
            shortest_path(&snapshot.graph, start, end)
        }
    }

    /// Route plus per-floor steps and coordinates for drawing
    pub fn itinerary(&self, start: &NodeId, end: &NodeId) -> Result<Itinerary> {
        let snapshot = self.snapshot();
        let route = if self.config.respect_accessibility {
            find_route(&snapshot.graph, &snapshot.directory, start, end)?
        } else {
            shortest_path(&snapshot.graph, start, end)?
        };

        let segmentation = segment_by_floor(&route.nodes, &snapshot.directory);
        let coordinates = route
            .nodes
            .iter()
            .filter_map(|id| snapshot.directory.coordinates(id.as_str()))
            .collect();

        Ok(Itinerary {
            route,
            steps: segmentation.steps,
            transitions: segmentation.transitions,
            coordinates,
        })
    }

    /// Closest node to a point, optionally on one floor
    pub fn nearest(&self, point: [f64; 2], floor: Option<Floor>) -> Option<NodeId> {
        self.snapshot().spatial.nearest(point, floor)
    }

    pub fn search(&self, term: &str, limit: usize) -> Vec<NodeId> {
        self.snapshot()
            .directory
            .search(term, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> ServiceStats {
        let snapshot = self.snapshot();
        ServiceStats {
            nodes: snapshot.directory.len(),
            blocked_nodes: snapshot.directory.blocked_count(),
            graph_nodes: snapshot.graph.node_count(),
            directed_edges: snapshot.graph.edge_count(),
            floors: snapshot.directory.floors(),
        }
    }
}
