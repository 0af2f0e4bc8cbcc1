//! Single-source shortest path with early exit on the target
//!
//! Binary-heap frontier with lazy decrease-key: an improved distance is pushed
//! as a new entry and older entries for the same node are discarded when they
//! surface. Weights must be non-negative.
//!
//! Ties are broken on node id: among frontier entries with equal distance the
//! lexicographically smaller id is settled first, and a predecessor is only
//! replaced on strict improvement. The same inputs always give the same path.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{trace, warn};

use crate::error::{suggest_node, Result, RouteError};
use crate::graph::Graph;
use crate::node::NodeId;

/// Minimum-weight path between two nodes
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Route {
    /// Start first, end last
    pub nodes: Vec<NodeId>,
    /// Sum of edge weights along `nodes`
    pub distance: f64,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn start(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn end(&self) -> Option<&NodeId> {
        self.nodes.last()
    }
}

// Frontier entry; ordering is reversed so BinaryHeap pops the minimum
#[derive(Debug, Clone, Copy)]
struct FrontierEntry<'g> {
    cost: f64,
    node: &'g NodeId,
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

/// Search counters, logged at trace level
#[derive(Debug, Default)]
struct SearchStats {
    settled: usize,
    stale_pops: usize,
    relaxed: usize,
    pushes: usize,
}

fn missing(graph: &Graph, id: &NodeId) -> RouteError {
    RouteError::NodeNotInGraph {
        node: id.clone(),
        suggestion: suggest_node(id.as_str(), graph.nodes()),
    }
}

/// Minimum-total-weight path from `start` to `end`.
///
/// Fails with [`RouteError::NodeNotInGraph`] if either endpoint is not a key
/// of `graph`, and with [`RouteError::Unreachable`] if no path exists.
/// Neighbor entries whose target is not a key are never relaxed.
pub fn shortest_path(graph: &Graph, start: &NodeId, end: &NodeId) -> Result<Route> {
    let start_key = graph.key(start.as_str()).ok_or_else(|| missing(graph, start))?;
    let end_key = graph.key(end.as_str()).ok_or_else(|| missing(graph, end))?;

    if start_key == end_key {
        return Ok(Route {
            nodes: vec![start_key.clone()],
            distance: 0.0,
        });
    }

    let mut stats = SearchStats::default();
    let mut distance: FxHashMap<&NodeId, f64> = FxHashMap::default();
    let mut predecessor: FxHashMap<&NodeId, &NodeId> = FxHashMap::default();
    let mut frontier = BinaryHeap::new();

    distance.insert(start_key, 0.0);
    frontier.push(FrontierEntry {
        cost: 0.0,
        node: start_key,
    });
    stats.pushes += 1;

    let mut reached = false;
    while let Some(FrontierEntry { cost, node }) = frontier.pop() {
        let best = distance.get(node).copied().unwrap_or(f64::INFINITY);
        if cost > best {
            stats.stale_pops += 1;
            continue;
        }
        stats.settled += 1;

        if node == end_key {
            reached = true;
            break;
        }

        for neighbor in graph.neighbors(node.as_str()).unwrap_or_default() {
            let Some(target) = graph.key(neighbor.node.as_str()) else {
                continue;
            };
            stats.relaxed += 1;

            let alt = cost + neighbor.weight;
            if alt < distance.get(target).copied().unwrap_or(f64::INFINITY) {
                distance.insert(target, alt);
                predecessor.insert(target, node);
                frontier.push(FrontierEntry {
                    cost: alt,
                    node: target,
                });
                stats.pushes += 1;
            }
        }
    }

    trace!(
        from = %start,
        to = %end,
        settled = stats.settled,
        stale_pops = stats.stale_pops,
        relaxed = stats.relaxed,
        pushes = stats.pushes,
        reached,
        "dijkstra finished"
    );

    let unreachable = || RouteError::Unreachable {
        from: start.clone(),
        to: end.clone(),
    };

    if !reached {
        return Err(unreachable());
    }

    let nodes = walk_back(&predecessor, start_key, end_key, graph.node_count())
        .ok_or_else(unreachable)?;

    Ok(Route {
        nodes,
        distance: distance[end_key],
    })
}

/// Follow predecessors from `end` back to `start`.
///
/// Gives up after `limit` hops so a corrupted predecessor chain cannot loop.
fn walk_back<'g>(
    predecessor: &FxHashMap<&'g NodeId, &'g NodeId>,
    start: &NodeId,
    end: &'g NodeId,
    limit: usize,
) -> Option<Vec<NodeId>> {
    let mut path = vec![end.clone()];
    let mut current = end;

    while current != start {
        if path.len() > limit {
            warn!(%start, %end, limit, "predecessor chain exceeds node count, aborting");
            return None;
        }
        current = *predecessor.get(current)?;
        path.push(current.clone());
    }

    path.reverse();
    Some(path)
}
