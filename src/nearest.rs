//! Nearest-node lookup for snapping map clicks onto the graph
//!
//! Coordinates are planar `[x, y]` as stored on the node records; distance is
//! Euclidean.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::node::{Floor, NodeDirectory, NodeId, NodeRecord};

fn distance_2(record: &NodeRecord, point: [f64; 2]) -> f64 {
    let dx = record.x - point[0];
    let dy = record.y - point[1];
    dx * dx + dy * dy
}

fn on_floor(record: &NodeRecord, floor: Option<Floor>) -> bool {
    floor.is_none() || record.floor == floor
}

/// Linear search for the nearest node - O(n)
///
/// With `floor` set, only nodes on that floor are candidates. On equal
/// distance the record loaded first wins. Use [`SpatialIndex`] for O(log n).
pub fn nearest_node(point: [f64; 2], nodes: &NodeDirectory, floor: Option<Floor>) -> Option<NodeId> {
    let mut best: Option<(&NodeRecord, f64)> = None;

    for record in nodes.iter().filter(|r| on_floor(r, floor)) {
        let d = distance_2(record, point);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((record, d));
        }
    }

    best.map(|(record, _)| record.id.clone())
}

/// Point with its directory position for the R-tree
#[derive(Clone, Copy, Debug, PartialEq)]
struct IndexedPoint {
    coords: [f64; 2],
    /// Position in load order; breaks distance ties like the linear scan
    order: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.coords[0] - point[0];
        let dy = self.coords[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over node records
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
    ids: Vec<NodeId>,
    floors: Vec<Option<Floor>>,
}

impl SpatialIndex {
    /// Build the index from a node directory
    pub fn build(nodes: &NodeDirectory) -> Self {
        let mut points = Vec::with_capacity(nodes.len());
        let mut ids = Vec::with_capacity(nodes.len());
        let mut floors = Vec::with_capacity(nodes.len());

        for (order, record) in nodes.iter().enumerate() {
            points.push(IndexedPoint {
                coords: [record.x, record.y],
                order,
            });
            ids.push(record.id.clone());
            floors.push(record.floor);
        }

        Self {
            tree: RTree::bulk_load(points),
            ids,
            floors,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Nearest node, optionally restricted to one floor
    pub fn nearest(&self, point: [f64; 2], floor: Option<Floor>) -> Option<NodeId> {
        let mut candidates = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&point)
            .filter(|(p, _)| floor.is_none() || self.floors[p.order] == floor);

        let (first, best_d) = candidates.next()?;
        let mut winner = first.order;

        // Equidistant candidates come out in arbitrary order; keep load order
        for (p, d) in candidates {
            if d > best_d {
                break;
            }
            winner = winner.min(p.order);
        }

        Some(self.ids[winner].clone())
    }
}
