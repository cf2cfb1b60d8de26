//! Topology graphs for computational geometry on [`geo`] types.
//!
//! 1. [Topology Graph](#topology-graph)
//! 1. [Segment Noding](#segment-noding)
//!
//! # Topology Graph
//!
//! A [`GeometryGraph`] turns an input geometry into a [`PlanarGraph`]
//! of labelled edges and nodes. Each graph element carries a
//! [`Label`] recording where it sits (interior, boundary or exterior)
//! relative to up to two input geometries, and the left and right
//! sides of area edges. Around each node the edge ends are kept
//! sorted by angle in a [`DirectedEdgeStar`], which is what side
//! labels are propagated through and what directed edges are linked
//! by to form [`EdgeRing`]s.
//!
//! These are the building blocks of overlay, relate and validity
//! operations; this crate provides the graph and its invariants, not
//! those operations.
//!
//! # Segment Noding
//!
//! A [`SimpleSweepLineIntersector`] sweeps the x-intervals of edge
//! segments and hands every candidate pair to a
//! [`SegmentIntersector`]. The standard [`EdgeIntersector`] records
//! intersection points on the edges so that they can then be split
//! into fully noded edges.
//!
//! ## Usage
//!
//! ```rust
//! use geo::{Coordinate, Geometry, LineString};
//! use geo_topograph::GeometryGraph;
//!
//! let line: LineString<f64> = vec![(0., 0.), (2., 2.), (2., 0.), (0., 2.)].into();
//! let geom = Geometry::LineString(line);
//! let mut graph = GeometryGraph::new(0, &geom);
//!
//! let si = graph.compute_self_nodes(false);
//! assert_eq!(si.proper_intersection_point(), Some(Coordinate { x: 1., y: 1. }));
//!
//! let mut parts = vec![];
//! graph.compute_split_edges(&mut parts);
//! assert_eq!(parts.len(), 3);
//! ```
mod events;
pub use events::{EventType, SweepLineEvent, SweepPoint};

pub mod topology;
pub use topology::{Depth, Label, Position, Quadrant, TopologyLocation};

mod config;
pub use config::{BoundaryNodeRule, GraphConfig};

mod error;
pub use error::{Result, TopologyError};

mod matrix;
pub use matrix::IntersectionMatrix;

mod component;
pub use component::{ComponentRef, GraphComponent};

pub mod edge;
pub use edge::{Edge, EdgeIntersection, EdgeIntersectionList, EdgeList};

pub mod intersector;
pub use intersector::{EdgeIntersector, SegmentIntersection, SegmentIntersector};

pub mod sweep;
pub use sweep::{EdgeRef, SimpleSweepLineIntersector};

pub mod graph;
pub use graph::{
    DirectedEdge, DirectedEdgeStar, EdgeEnd, EdgeEndStar, EdgeRing, GeometryGraph, Node, NodeMap,
    PlanarGraph, RingKind,
};

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;

pub(crate) mod utils;
