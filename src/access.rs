//! Accessibility filter
//!
//! Derives a routable graph that excludes blocked nodes and the edges that
//! lead into them. The start and end of the requested route are always kept,
//! whatever their own flag says.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::graph::{Graph, Neighbor};
use crate::node::{AccessLookup, NodeId};

/// Produce a new graph without blocked nodes.
///
/// - blocked nodes are dropped unless they are `start` or `end`;
/// - neighbor entries pointing at blocked nodes are dropped, with the same
///   exemption for `start` / `end`;
/// - a node whose neighbor list this filtering empties is dropped, except
///   `start` / `end`. Nodes that had no outgoing edges to begin with (one-way
///   sinks) are kept.
///
/// Never fails: callers check whether the endpoints survived.
pub fn filter_accessible<A>(graph: &Graph, access: &A, start: &NodeId, end: &NodeId) -> Graph
where
    A: AccessLookup + ?Sized,
{
    let exempt = |id: &NodeId| id == start || id == end;
    let passable = |id: &NodeId| exempt(id) || !access.is_blocked(id);

    let mut adjacency: FxHashMap<NodeId, Vec<Neighbor>> = FxHashMap::default();
    let mut dropped_blocked = 0usize;
    let mut dropped_stranded = 0usize;

    for (id, neighbors) in graph.iter() {
        if !passable(id) {
            dropped_blocked += 1;
            continue;
        }

        let kept: Vec<Neighbor> = neighbors
            .iter()
            .filter(|n| passable(&n.node))
            .cloned()
            .collect();

        if kept.is_empty() && !neighbors.is_empty() && !exempt(id) {
            dropped_stranded += 1;
            continue;
        }

        adjacency.insert(id.clone(), kept);
    }

    debug!(
        kept = adjacency.len(),
        dropped_blocked, dropped_stranded, "filtered graph for accessibility"
    );

    Graph::from_adjacency(adjacency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, EdgeRecord};
    use rustc_hash::FxHashSet;

    fn blocked(ids: &[&str]) -> FxHashSet<NodeId> {
        ids.iter().map(|s| NodeId::from(*s)).collect()
    }

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    // A - B - C
    //  \     /
    //   - D -
    fn diamond() -> Graph {
        build_graph(&[
            EdgeRecord::new("A", "B", 1.0),
            EdgeRecord::new("B", "C", 1.0),
            EdgeRecord::new("A", "D", 2.0),
            EdgeRecord::new("D", "C", 2.0),
        ])
    }

    #[test]
    fn test_blocked_node_and_incoming_edges_removed() {
        let filtered = filter_accessible(&diamond(), &blocked(&["B"]), &id("A"), &id("C"));
        assert!(!filtered.contains("B"));
        assert_eq!(filtered.edge_weight("A", "B"), None);
        assert_eq!(filtered.edge_weight("A", "D"), Some(2.0));
        assert_eq!(filtered.node_count(), 3);
    }

    #[test]
    fn test_start_and_end_survive_their_own_flag() {
        let filtered = filter_accessible(&diamond(), &blocked(&["A", "C"]), &id("A"), &id("C"));
        assert!(filtered.contains("A"));
        assert!(filtered.contains("C"));
        // Edges into the endpoints stay too
        assert_eq!(filtered.edge_weight("B", "A"), Some(1.0));
        assert_eq!(filtered.edge_weight("D", "C"), Some(2.0));
    }

    #[test]
    fn test_node_emptied_by_filter_is_pruned() {
        // F only leads to blocked B
        let graph = build_graph(&[
            EdgeRecord::new("F", "B", 1.0).one_way(),
            EdgeRecord::new("A", "B", 1.0),
            EdgeRecord::new("A", "C", 1.0),
        ]);

        let filtered = filter_accessible(&graph, &blocked(&["B"]), &id("A"), &id("C"));
        assert!(!filtered.contains("F"));
        assert!(filtered.contains("A"));
        assert_eq!(filtered.neighbors("A").map(<[Neighbor]>::len), Some(1));
    }

    #[test]
    fn test_stranded_endpoints_are_kept() {
        // S - X - T with X blocked: both endpoints lose every neighbor
        let graph = build_graph(&[
            EdgeRecord::new("S", "X", 1.0),
            EdgeRecord::new("X", "T", 1.0),
        ]);

        let filtered = filter_accessible(&graph, &blocked(&["X"]), &id("S"), &id("T"));
        assert!(filtered.contains("S"));
        assert!(filtered.contains("T"));
        assert!(!filtered.contains("X"));
        assert_eq!(filtered.neighbors("S"), Some(&[][..]));
    }

    #[test]
    fn test_one_way_sink_is_kept() {
        let graph = build_graph(&[EdgeRecord::new("A", "Z", 1.0).one_way()]);
        let filtered = filter_accessible(&graph, &blocked(&[]), &id("A"), &id("Z"));
        assert!(filtered.contains("Z"));
        assert_eq!(filtered, graph);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let access = blocked(&["B"]);
        let once = filter_accessible(&diamond(), &access, &id("A"), &id("C"));
        let twice = filter_accessible(&once, &access, &id("A"), &id("C"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_base_graph_is_untouched() {
        let graph = diamond();
        let before = graph.clone();
        let _ = filter_accessible(&graph, &blocked(&["B"]), &id("A"), &id("C"));
        assert_eq!(graph, before);
    }
}
