use std::fmt;

use geo::{coordinate_position::CoordPos, Coordinate, GeoFloat};

use super::{DirEdgeId, EdgeEnd, HasEdgeEnd, RingId};
use crate::{
    edge::Edge,
    error::{Result, TopologyError},
    topology::{Label, Position},
};

const NULL_DEPTH: i32 = -999;

/// The change in depth when moving from location `curr` to `next`:
/// `1` when entering an interior, `-1` when leaving it, else `0`.
pub fn depth_factor(curr: Option<CoordPos>, next: Option<CoordPos>) -> i32 {
    match (curr, next) {
        (Some(CoordPos::Outside), Some(CoordPos::Inside)) => 1,
        (Some(CoordPos::Inside), Some(CoordPos::Outside)) => -1,
        _ => 0,
    }
}

/// An edge end that follows its edge forwards or backwards.
///
/// Directed edges are created in pairs, one per direction of an edge;
/// each refers to the other as its `sym`. The `next` links are set by
/// the star linking routines and chain directed edges into rings.
#[derive(Debug, Clone)]
pub struct DirectedEdge<T: GeoFloat> {
    end: EdgeEnd<T>,
    forward: bool,
    sym: DirEdgeId,
    next: Option<DirEdgeId>,
    next_min: Option<DirEdgeId>,
    edge_ring: Option<RingId>,
    min_edge_ring: Option<RingId>,
    depth: [i32; 3],
    in_result: bool,
    visited: bool,
}

impl<T: GeoFloat> DirectedEdge<T> {
    /// The two directed edges of edge `edge_index`, to be stored at
    /// ids `first_id` (forward) and `first_id + 1` (reverse).
    pub fn pair(edge_index: usize, edge: &Edge<T>, first_id: DirEdgeId) -> [Self; 2] {
        [
            Self::new(edge_index, edge, true, first_id + 1),
            Self::new(edge_index, edge, false, first_id),
        ]
    }

    fn new(edge_index: usize, edge: &Edge<T>, forward: bool, sym: DirEdgeId) -> Self {
        let n = edge.num_points();
        let (p0, p1) = if forward {
            (edge.coord(0), edge.coord(1))
        } else {
            (edge.coord(n - 1), edge.coord(n - 2))
        };
        let mut label = edge.label().clone();
        if !forward {
            label.flip();
        }
        DirectedEdge {
            end: EdgeEnd::new(edge_index, p0, p1, label),
            forward,
            sym,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
            depth: [0, NULL_DEPTH, NULL_DEPTH],
            in_result: false,
            visited: false,
        }
    }

    #[inline]
    pub fn edge(&self) -> usize {
        self.end.edge()
    }

    #[inline]
    pub fn label(&self) -> &Label {
        self.end.label()
    }

    #[inline]
    pub fn label_mut(&mut self) -> &mut Label {
        self.end.label_mut()
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate<T> {
        self.end.coordinate()
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    #[inline]
    pub fn sym(&self) -> DirEdgeId {
        self.sym
    }

    #[inline]
    pub fn next(&self) -> Option<DirEdgeId> {
        self.next
    }

    pub fn set_next(&mut self, next: DirEdgeId) {
        self.next = Some(next);
    }

    #[inline]
    pub fn next_min(&self) -> Option<DirEdgeId> {
        self.next_min
    }

    pub fn set_next_min(&mut self, next: DirEdgeId) {
        self.next_min = Some(next);
    }

    #[inline]
    pub fn edge_ring(&self) -> Option<RingId> {
        self.edge_ring
    }

    pub(crate) fn set_node(&mut self, node: super::NodeId) {
        self.end.set_node(node);
    }

    #[inline]
    pub fn node(&self) -> Option<super::NodeId> {
        self.end.node()
    }

    pub(crate) fn set_edge_ring(&mut self, ring: Option<RingId>) {
        self.edge_ring = ring;
    }

    #[inline]
    pub fn min_edge_ring(&self) -> Option<RingId> {
        self.min_edge_ring
    }

    pub(crate) fn set_min_edge_ring(&mut self, ring: Option<RingId>) {
        self.min_edge_ring = ring;
    }

    #[inline]
    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    /// Depth at `pos`; `-999` if not assigned.
    pub fn depth(&self, pos: Position) -> i32 {
        self.depth[pos.index()]
    }

    /// Assign the depth at `pos`.
    ///
    /// Fails if a different depth was already assigned.
    pub fn set_depth(&mut self, pos: Position, depth: i32) -> Result<(), T> {
        let slot = &mut self.depth[pos.index()];
        if *slot != NULL_DEPTH && *slot != depth {
            return Err(TopologyError::AssignedDepthMismatch(self.end.coordinate()));
        }
        *slot = depth;
        Ok(())
    }

    /// The depth delta of the parent edge, in the direction of this
    /// edge.
    pub fn depth_delta(&self, edge: &Edge<T>) -> i32 {
        if self.forward {
            edge.depth_delta()
        } else {
            -edge.depth_delta()
        }
    }

    /// Set the depth at `pos` and derive the depth of the opposite
    /// side from the edge's depth delta.
    pub fn set_edge_depths(&mut self, depth_delta: i32, pos: Position, depth: i32) -> Result<(), T> {
        let direction_factor = if pos == Position::Left { -1 } else { 1 };
        let opposite_depth = depth + depth_delta * direction_factor;
        self.set_depth(pos, depth)?;
        self.set_depth(pos.opposite(), opposite_depth)
    }

    /// A line edge, or an area edge with the exterior on both sides
    /// for every areal geometry.
    pub fn is_line_edge(&self) -> bool {
        let label = self.label();
        let is_line = label.is_line(0) || label.is_line(1);
        let exterior_if_area =
            |i| !label.is_area_for(i) || label.all_positions_equal(i, Some(CoordPos::Outside));
        is_line && exterior_if_area(0) && exterior_if_area(1)
    }

    /// An area edge with the interior on both sides for both
    /// geometries.
    pub fn is_interior_area_edge(&self) -> bool {
        let label = self.label();
        (0..2).all(|i| {
            label.is_area_for(i)
                && label.location(i, Position::Left) == Some(CoordPos::Inside)
                && label.location(i, Position::Right) == Some(CoordPos::Inside)
        })
    }
}

impl<T: GeoFloat> HasEdgeEnd for DirectedEdge<T> {
    type Scalar = T;

    fn edge_end(&self) -> &EdgeEnd<T> {
        &self.end
    }

    fn edge_end_mut(&mut self) -> &mut EdgeEnd<T> {
        &mut self.end
    }
}

impl<T: GeoFloat> fmt::Display for DirectedEdge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} ({})",
            self.end,
            self.depth[Position::Left.index()],
            self.depth[Position::Right.index()],
            if self.in_result { "in result" } else { "" }
        )
    }
}
