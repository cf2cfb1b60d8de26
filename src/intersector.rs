//! Segment intersection: the predicate the sweep consults for every
//! candidate pair, and the sink that decides what gets recorded on
//! the edges.

use geo::{
    line_intersection::{line_intersection, LineIntersection},
    Coordinate, GeoFloat, Line,
};
use log::trace;
use smallvec::{smallvec, SmallVec};

use crate::sweep::EdgeRef;

/// Intersection of two line segments.
///
/// Holds one point for a crossing or touch, and two points for a
/// collinear overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentIntersection<T: GeoFloat> {
    segments: [Line<T>; 2],
    points: SmallVec<[Coordinate<T>; 2]>,
    is_proper: bool,
}

impl<T: GeoFloat> SegmentIntersection<T> {
    /// Intersect two segments; `None` if they are disjoint.
    pub fn between(a: Line<T>, b: Line<T>) -> Option<Self> {
        line_intersection(a, b).map(|isec| {
            let (points, is_proper) = match isec {
                LineIntersection::SinglePoint {
                    intersection,
                    is_proper,
                } => (smallvec![intersection], is_proper),
                LineIntersection::Collinear { intersection } => {
                    if intersection.start == intersection.end {
                        (smallvec![intersection.start], false)
                    } else {
                        (smallvec![intersection.start, intersection.end], false)
                    }
                }
            };
            SegmentIntersection {
                segments: [a, b],
                points,
                is_proper,
            }
        })
    }

    #[inline]
    pub fn points(&self) -> &[Coordinate<T>] {
        &self.points
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Whether the segments cross at a point interior to both.
    #[inline]
    pub fn is_proper(&self) -> bool {
        self.is_proper
    }

    #[inline]
    pub fn is_collinear(&self) -> bool {
        self.points.len() == 2
    }

    /// The input segment at `segment_index` (`0` or `1`).
    pub fn segment(&self, segment_index: usize) -> Line<T> {
        self.segments[segment_index]
    }

    pub fn is_intersection(&self, pt: Coordinate<T>) -> bool {
        self.points.iter().any(|p| *p == pt)
    }

    /// Distance of intersection point `point_index` along input
    /// segment `segment_index`. See [`edge_distance`].
    pub fn edge_distance(&self, segment_index: usize, point_index: usize) -> T {
        let seg = self.segments[segment_index];
        edge_distance(self.points[point_index], seg.start, seg.end)
    }
}

/// A robust proxy of the distance of `p` from `p0` along the segment
/// `p0 -> p1`.
///
/// Uses the offset along the dominant axis of the segment, so it is
/// exact for points computed on the segment and monotone along it. It
/// is zero only at `p0`.
pub fn edge_distance<T: GeoFloat>(p: Coordinate<T>, p0: Coordinate<T>, p1: Coordinate<T>) -> T {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();

    if p == p0 {
        T::zero()
    } else if p == p1 {
        dx.max(dy)
    } else {
        let pdx = (p.x - p0.x).abs();
        let pdy = (p.y - p0.y).abs();
        let dist = if dx > dy { pdx } else { pdy };
        if dist.is_zero() {
            // Non-endpoints must have a non-zero distance.
            pdx.max(pdy)
        } else {
            dist
        }
    }
}

/// One segment of an edge as seen by a [`SegmentIntersector`].
#[derive(Debug, Clone, Copy)]
pub struct SegmentRef<'a, T: GeoFloat> {
    pub edge: EdgeRef,
    pub segment_index: usize,
    pub coords: &'a [Coordinate<T>],
}

impl<'a, T: GeoFloat> SegmentRef<'a, T> {
    pub fn line(&self) -> Line<T> {
        Line::new(
            self.coords[self.segment_index],
            self.coords[self.segment_index + 1],
        )
    }

    /// Whether the owning edge is closed.
    pub fn is_closed(&self) -> bool {
        self.coords.first() == self.coords.last()
    }
}

/// What to record for a candidate segment pair.
#[derive(Debug, Clone)]
pub struct PairOutcome<T: GeoFloat> {
    /// Intersection to add to both edges (segment `0` of the
    /// intersection is the first segment of the pair).
    pub intersection: Option<SegmentIntersection<T>>,
    /// Whether both edges should be marked as not isolated.
    pub touched: bool,
}

impl<T: GeoFloat> PairOutcome<T> {
    pub fn none() -> Self {
        PairOutcome {
            intersection: None,
            touched: false,
        }
    }
}

/// The pluggable intersection test called for each candidate pair of
/// segments found by the sweep.
pub trait SegmentIntersector<T: GeoFloat> {
    fn process_pair(&mut self, a: SegmentRef<'_, T>, b: SegmentRef<'_, T>) -> PairOutcome<T>;
}

/// Standard segment intersector used for noding graphs.
///
/// Records every non-trivial intersection and keeps statistics about
/// what was found.
#[derive(Debug, Clone)]
pub struct EdgeIntersector<T: GeoFloat> {
    include_proper: bool,
    record_isolated: bool,
    boundary_nodes: Option<[Vec<Coordinate<T>>; 2]>,

    has_intersection: bool,
    has_proper: bool,
    has_proper_interior: bool,
    proper_point: Option<Coordinate<T>>,

    num_tests: usize,
    num_intersections: usize,
}

impl<T: GeoFloat> EdgeIntersector<T> {
    /// Create an intersector.
    ///
    /// Proper intersections are only recorded on the edges if
    /// `include_proper` is set. If `record_isolated` is set, edges
    /// that touch anything are marked as not isolated.
    pub fn new(include_proper: bool, record_isolated: bool) -> Self {
        EdgeIntersector {
            include_proper,
            record_isolated,
            boundary_nodes: None,
            has_intersection: false,
            has_proper: false,
            has_proper_interior: false,
            proper_point: None,
            num_tests: 0,
            num_intersections: 0,
        }
    }

    /// Set the boundary points of both geometries; a proper
    /// intersection at one of these is not an interior one.
    pub fn set_boundary_nodes(&mut self, bdy0: Vec<Coordinate<T>>, bdy1: Vec<Coordinate<T>>) {
        self.boundary_nodes = Some([bdy0, bdy1]);
    }

    /// Whether some non-trivial intersection was found.
    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    pub fn has_proper_intersection(&self) -> bool {
        self.has_proper
    }

    /// Whether a proper intersection was found that is not a boundary
    /// point of either geometry.
    pub fn has_proper_interior_intersection(&self) -> bool {
        self.has_proper_interior
    }

    /// The last proper intersection point found.
    pub fn proper_intersection_point(&self) -> Option<Coordinate<T>> {
        self.proper_point
    }

    pub fn num_tests(&self) -> usize {
        self.num_tests
    }

    pub fn num_intersections(&self) -> usize {
        self.num_intersections
    }

    /// An intersection between adjacent segments of one edge at their
    /// common vertex is inherent to the edge and not a noding point.
    fn is_trivial(
        &self,
        a: &SegmentRef<'_, T>,
        b: &SegmentRef<'_, T>,
        isec: &SegmentIntersection<T>,
    ) -> bool {
        if a.edge != b.edge || isec.num_points() != 1 {
            return false;
        }
        let (i, j) = (a.segment_index, b.segment_index);
        if i + 1 == j || j + 1 == i {
            return true;
        }
        if a.is_closed() {
            let max_segment_index = a.coords.len() - 2;
            if (i == 0 && j == max_segment_index) || (j == 0 && i == max_segment_index) {
                return true;
            }
        }
        false
    }

    fn is_boundary_point(&self, isec: &SegmentIntersection<T>) -> bool {
        match &self.boundary_nodes {
            Some(nodes) => nodes
                .iter()
                .flat_map(|n| n.iter())
                .any(|c| isec.is_intersection(*c)),
            None => false,
        }
    }
}

impl<T: GeoFloat> SegmentIntersector<T> for EdgeIntersector<T> {
    fn process_pair(&mut self, a: SegmentRef<'_, T>, b: SegmentRef<'_, T>) -> PairOutcome<T> {
        if a.edge == b.edge && a.segment_index == b.segment_index {
            return PairOutcome::none();
        }
        self.num_tests += 1;

        let isec = match SegmentIntersection::between(a.line(), b.line()) {
            Some(isec) => isec,
            None => return PairOutcome::none(),
        };
        self.num_intersections += 1;
        let touched = self.record_isolated;

        if self.is_trivial(&a, &b, &isec) {
            return PairOutcome {
                intersection: None,
                touched,
            };
        }
        trace!(
            "intersection {:?} between {:?}#{} and {:?}#{}",
            isec.points(),
            a.edge,
            a.segment_index,
            b.edge,
            b.segment_index
        );
        self.has_intersection = true;

        if isec.is_proper() {
            self.proper_point = Some(isec.points()[0]);
            self.has_proper = true;
            if !self.is_boundary_point(&isec) {
                self.has_proper_interior = true;
            }
        }

        let intersection = if self.include_proper || !isec.is_proper() {
            Some(isec)
        } else {
            None
        };
        PairOutcome {
            intersection,
            touched,
        }
    }
}
