//! # Butterfly-indoor
//!
//! Indoor wayfinding over floor-plan graphs.
//!
//! Node and edge records (usually GeoJSON feature collections) become an
//! adjacency [`Graph`]; routes are found with Dijkstra after filtering out
//! inaccessible nodes, then split into per-floor [`Step`]s for display.
//!
//! ```
//! use butterfly_indoor::{build_graph, find_route, segment_by_floor};
//! use butterfly_indoor::{EdgeRecord, Floor, NodeDirectory, NodeId, NodeRecord};
//!
//! let graph = build_graph(&[
//!     EdgeRecord::new("A", "B", 1.0),
//!     EdgeRecord::new("B", "C", 2.0),
//!     EdgeRecord::new("A", "C", 5.0),
//! ]);
//! let nodes = NodeDirectory::from_records(vec![
//!     NodeRecord::new("A", Some(Floor(0)), 0.0, 0.0),
//!     NodeRecord::new("B", Some(Floor(0)), 1.0, 0.0),
//!     NodeRecord::new("C", Some(Floor(1)), 1.0, 0.0),
//! ])?;
//!
//! let route = find_route(&graph, &nodes, &NodeId::from("A"), &NodeId::from("C"))?;
//! assert_eq!(route.distance, 3.0);
//!
//! let steps = segment_by_floor(&route.nodes, &nodes).steps;
//! assert_eq!(steps.len(), 2);
//! # Ok::<(), butterfly_indoor::RouteError>(())
//! ```

pub mod access;
pub mod config;
pub mod dijkstra;
pub mod error;
pub mod geojson;
pub mod graph;
pub mod nearest;
pub mod node;
pub mod route;
pub mod segment;
pub mod service;

pub use access::filter_accessible;
pub use config::Config;
pub use dijkstra::{shortest_path, Route};
pub use error::{Result, RouteError};
pub use graph::{build_graph, EdgeRecord, Graph, Neighbor};
pub use nearest::{nearest_node, SpatialIndex};
pub use node::{AccessLookup, Floor, FloorLookup, NodeDirectory, NodeId, NodeRecord};
pub use route::{find_path, find_route};
pub use segment::{segment_by_floor, Direction, Segmentation, Step, Transition};
pub use service::{Itinerary, RouteService, ServiceStats};
