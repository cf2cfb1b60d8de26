use std::{cmp::Ordering, fmt};

use geo::{
    kernels::{Kernel, Orientation},
    Coordinate, GeoFloat,
};

use super::NodeId;
use crate::{
    topology::{Label, Quadrant},
    utils::orientation_as_ordering,
};

/// One end of an edge: a ray leaving `p0` in the direction of `p1`.
///
/// Edge ends leaving a node are ordered by the angle of their
/// direction, counter-clockwise from the positive x-axis. The
/// ordering compares quadrants first, and only falls back to an
/// orientation test within the same quadrant.
#[derive(Debug, Clone)]
pub struct EdgeEnd<T: GeoFloat> {
    edge: usize,
    label: Label,
    node: Option<NodeId>,
    p0: Coordinate<T>,
    p1: Coordinate<T>,
    dx: T,
    dy: T,
    quadrant: Quadrant,
}

impl<T: GeoFloat> EdgeEnd<T> {
    /// Create an end of edge `edge` leaving `p0` towards `p1`.
    ///
    /// # Panics
    ///
    /// If `p0 == p1`.
    pub fn new(edge: usize, p0: Coordinate<T>, p1: Coordinate<T>, label: Label) -> Self {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        EdgeEnd {
            edge,
            label,
            node: None,
            p0,
            p1,
            dx,
            dy,
            quadrant: Quadrant::new(dx, dy),
        }
    }

    /// Index of the parent edge in its graph.
    #[inline]
    pub fn edge(&self) -> usize {
        self.edge
    }

    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }

    #[inline]
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// The node this end leaves, once inserted in a graph.
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub(crate) fn set_node(&mut self, node: NodeId) {
        self.node = Some(node);
    }

    /// The anchor point.
    #[inline]
    pub fn coordinate(&self) -> Coordinate<T> {
        self.p0
    }

    #[inline]
    pub fn directed_coordinate(&self) -> Coordinate<T> {
        self.p1
    }

    #[inline]
    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    #[inline]
    pub fn dx(&self) -> T {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> T {
        self.dy
    }

    /// Compare the directions of two edge ends leaving the same
    /// point.
    ///
    /// Returns `Greater` if `self` is counter-clockwise of `other`.
    pub fn compare_direction(&self, other: &EdgeEnd<T>) -> Ordering {
        if self.dx == other.dx && self.dy == other.dy {
            return Ordering::Equal;
        }
        match self.quadrant.cmp(&other.quadrant) {
            Ordering::Equal => {
                orientation_as_ordering(T::Ker::orient2d(other.p0, other.p1, self.p1)).reverse()
            }
            o => o,
        }
    }

    /// Whether `p` is strictly to the left of the end's direction.
    pub fn is_left_of(&self, p: Coordinate<T>) -> bool {
        T::Ker::orient2d(self.p0, self.p1, p) == Orientation::CounterClockwise
    }
}

impl<T: GeoFloat> PartialEq for EdgeEnd<T> {
    fn eq(&self, other: &Self) -> bool {
        self.compare_direction(other) == Ordering::Equal
    }
}

impl<T: GeoFloat> Eq for EdgeEnd<T> {}

impl<T: GeoFloat> PartialOrd for EdgeEnd<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare_direction(other))
    }
}

impl<T: GeoFloat> Ord for EdgeEnd<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_direction(other)
    }
}

/// Types that wrap an [`EdgeEnd`], such as directed edges.
///
/// Lets an [`EdgeEndStar`](super::EdgeEndStar) work over an arena of
/// any such type.
pub trait HasEdgeEnd {
    type Scalar: GeoFloat;

    fn edge_end(&self) -> &EdgeEnd<Self::Scalar>;
    fn edge_end_mut(&mut self) -> &mut EdgeEnd<Self::Scalar>;
}

impl<T: GeoFloat> HasEdgeEnd for EdgeEnd<T> {
    type Scalar = T;

    fn edge_end(&self) -> &EdgeEnd<T> {
        self
    }

    fn edge_end_mut(&mut self) -> &mut EdgeEnd<T> {
        self
    }
}

impl<T: GeoFloat> fmt::Display for EdgeEnd<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let angle = self.dy.atan2(self.dx);
        write!(
            f,
            "  EdgeEnd: {:?} - {:?} {:?}:{:?}   {}",
            self.p0, self.p1, self.quadrant, angle, self.label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end(x: f64, y: f64) -> EdgeEnd<f64> {
        EdgeEnd::new(
            0,
            Coordinate { x: 0., y: 0. },
            Coordinate { x, y },
            Label::line(None),
        )
    }

    #[test]
    fn test_ordering_by_angle() {
        let mut ends = vec![
            end(1., -1.),
            end(-1., 1.),
            end(1., 2.),
            end(2., 1.),
            end(-1., -1.),
            end(1., 0.),
        ];
        ends.sort();
        let dirs: Vec<_> = ends.iter().map(|e| (e.dx(), e.dy())).collect();
        assert_eq!(
            dirs,
            vec![(1., 0.), (2., 1.), (1., 2.), (-1., 1.), (-1., -1.), (1., -1.)]
        );
    }

    #[test]
    fn test_same_direction_equal() {
        let a = end(1., 1.);
        let b = EdgeEnd::new(
            3,
            Coordinate { x: 0., y: 0. },
            Coordinate { x: 1., y: 1. },
            Label::line(None),
        );
        assert_eq!(a.compare_direction(&b), Ordering::Equal);
        assert!(end(1., 2.) > end(2., 1.));
    }

    #[test]
    fn test_is_left_of() {
        let e = end(2., 0.);
        assert!(e.is_left_of(Coordinate { x: 1., y: 1. }));
        assert!(!e.is_left_of(Coordinate { x: 1., y: -1. }));
        assert!(!e.is_left_of(Coordinate { x: 5., y: 0. }));
    }

    #[test]
    #[should_panic(expected = "zero-length direction")]
    fn test_zero_length_panics() {
        let _ = end(0., 0.);
    }
}
