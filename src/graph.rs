//! The topology graph.
//!
//! A [`PlanarGraph`] owns its edges, nodes, directed edges and rings
//! and hands out indices into those arenas. Stars, rings and directed
//! edges refer to one another by these ids only, so the graph can be
//! relinked freely without shared ownership.
//!
//! [`GeometryGraph`] builds a planar graph from a single input
//! geometry and nodes it, against itself or against another geometry
//! graph.

/// Index of a node in a [`NodeMap`].
pub type NodeId = usize;
/// Index of a directed edge in a [`PlanarGraph`].
pub type DirEdgeId = usize;
/// Index of an edge ring in a [`PlanarGraph`].
pub type RingId = usize;

mod edge_end;
pub use edge_end::{EdgeEnd, HasEdgeEnd};

mod directed_edge;
pub use directed_edge::{depth_factor, DirectedEdge};

mod star;
pub use star::EdgeEndStar;

mod directed_star;
pub use directed_star::DirectedEdgeStar;

mod node;
pub use node::Node;

mod node_map;
pub use node_map::NodeMap;

mod ring;
pub use ring::{EdgeRing, RingKind};

mod planar;
pub use planar::PlanarGraph;

mod geometry;
pub use geometry::GeometryGraph;
