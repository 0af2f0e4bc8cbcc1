use tracing::{debug, warn};

use crate::access::filter_accessible;
use crate::dijkstra::{shortest_path, Route};
use crate::error::Result;
use crate::graph::Graph;
use crate::node::{AccessLookup, NodeId};

/// Filter out inaccessible nodes, then search the routable graph.
///
/// Start and end are exempt from the filter. A start whose every neighbor is
/// blocked stays in the graph, so routing from it fails with
/// [`RouteError::Unreachable`](crate::RouteError::Unreachable) and routing it
/// to itself gives the one-node route.
pub fn find_route<A>(graph: &Graph, access: &A, start: &NodeId, end: &NodeId) -> Result<Route>
where
    A: AccessLookup + ?Sized,
{
    let routable = filter_accessible(graph, access, start, end);
    debug!(
        base_nodes = graph.node_count(),
        routable_nodes = routable.node_count(),
        %start,
        %end,
        "routing on filtered graph"
    );
    shortest_path(&routable, start, end)
}

/// Sentinel form of [`find_route`]: the node sequence, or an empty `Vec` on
/// any failure (missing endpoint, unreachable target).
pub fn find_path<A>(graph: &Graph, access: &A, start: &NodeId, end: &NodeId) -> Vec<NodeId>
where
    A: AccessLookup + ?Sized,
{
    match find_route(graph, access, start, end) {
        Ok(route) => route.nodes,
        Err(e) => {
            warn!("{e}");
            Vec::new()
        }
    }
}
