//! Edges of a topology graph and the points at which they are cut.

mod intersection;
pub use intersection::{EdgeIntersection, EdgeIntersectionList};

mod list;
pub use list::EdgeList;

use std::fmt;

use geo::{
    coordinate_position::CoordPos, dimensions::Dimensions, prelude::BoundingRect, Coordinate,
    GeoFloat, LineString, Rect,
};
use itertools::Itertools;

use crate::{
    component::GraphComponent,
    intersector::SegmentIntersection,
    matrix::IntersectionMatrix,
    topology::{Depth, Label, Position},
};

/// A polyline of a topology graph.
///
/// Besides its label, an edge carries the depths used by area
/// operations, and the list of points at which it must be split.
#[derive(Debug, Clone)]
pub struct Edge<T: GeoFloat> {
    coords: Vec<Coordinate<T>>,
    component: GraphComponent,
    depth: Depth,
    depth_delta: i32,
    isolated: bool,
    intersections: EdgeIntersectionList<T>,
}

impl<T: GeoFloat> Edge<T> {
    /// Create an edge from its coordinates and label.
    ///
    /// # Panics
    ///
    /// If there are less than two coordinates.
    pub fn new(coords: Vec<Coordinate<T>>, label: Label) -> Self {
        assert!(coords.len() >= 2, "an edge requires at least two coordinates");
        Edge {
            coords,
            component: GraphComponent::new(label),
            depth: Depth::default(),
            depth_delta: 0,
            isolated: true,
            intersections: EdgeIntersectionList::default(),
        }
    }

    #[inline]
    pub fn coords(&self) -> &[Coordinate<T>] {
        &self.coords
    }

    #[inline]
    pub fn coord(&self, i: usize) -> Coordinate<T> {
        self.coords[i]
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn max_segment_index(&self) -> usize {
        self.coords.len() - 1
    }

    #[inline]
    pub fn component(&self) -> &GraphComponent {
        &self.component
    }

    #[inline]
    pub fn component_mut(&mut self) -> &mut GraphComponent {
        &mut self.component
    }

    #[inline]
    pub fn label(&self) -> &Label {
        self.component.label()
    }

    #[inline]
    pub fn label_mut(&mut self) -> &mut Label {
        self.component.label_mut()
    }

    pub fn depth(&self) -> &Depth {
        &self.depth
    }

    pub fn depth_mut(&mut self) -> &mut Depth {
        &mut self.depth
    }

    /// Change in area depth when crossing the edge from right to left.
    pub fn depth_delta(&self) -> i32 {
        self.depth_delta
    }

    pub fn set_depth_delta(&mut self, delta: i32) {
        self.depth_delta = delta;
    }

    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn set_isolated(&mut self, isolated: bool) {
        self.isolated = isolated;
    }

    pub fn intersections(&self) -> &EdgeIntersectionList<T> {
        &self.intersections
    }

    pub fn is_closed(&self) -> bool {
        self.coords.first() == self.coords.last()
    }

    /// An area edge that goes out to a point and straight back.
    pub fn is_collapsed(&self) -> bool {
        self.label().is_area() && self.coords.len() == 3 && self.coords[0] == self.coords[2]
    }

    /// The line edge an [collapsed](Self::is_collapsed) edge reduces
    /// to.
    pub fn collapsed_edge(&self) -> Edge<T> {
        Edge::new(
            vec![self.coords[0], self.coords[1]],
            Label::to_line_label(self.label()),
        )
    }

    /// Bounding box of the edge's coordinates.
    pub fn envelope(&self) -> Rect<T> {
        let first = self.coords[0];
        self.line_string()
            .bounding_rect()
            .unwrap_or_else(|| Rect::new(first, first))
    }

    pub fn line_string(&self) -> LineString<T> {
        LineString::from(self.coords.clone())
    }

    /// Record all the points of `isec` on this edge.
    ///
    /// `segment_index` is the segment of this edge that was
    /// intersected, and `geom_index` tells which of the two input
    /// segments of `isec` it is.
    pub fn add_intersections(
        &mut self,
        isec: &SegmentIntersection<T>,
        segment_index: usize,
        geom_index: usize,
    ) {
        for i in 0..isec.num_points() {
            self.add_intersection(isec, segment_index, geom_index, i);
        }
    }

    /// Record point `int_index` of `isec` on this edge.
    ///
    /// A point at the end of its segment is stored as the start of the
    /// next segment, so every point has a single representation.
    pub fn add_intersection(
        &mut self,
        isec: &SegmentIntersection<T>,
        segment_index: usize,
        geom_index: usize,
        int_index: usize,
    ) -> EdgeIntersection<T> {
        let int_pt = isec.points()[int_index];
        let mut normalized_index = segment_index;
        let mut dist = isec.edge_distance(geom_index, int_index);

        let next_index = normalized_index + 1;
        if next_index < self.coords.len() && int_pt == self.coords[next_index] {
            normalized_index = next_index;
            dist = T::zero();
        }
        self.intersections.add(int_pt, normalized_index, dist)
    }

    /// Add the first and last points to the intersection list.
    pub fn add_endpoints(&mut self) {
        self.intersections.add_endpoints(&self.coords);
    }

    /// Split the edge at its recorded intersections and append the
    /// parts to `out`.
    ///
    /// Parts of zero length are dropped.
    pub fn add_split_edges(&mut self, out: &mut Vec<Edge<T>>) {
        self.add_endpoints();
        let coords = &self.coords;
        let label = self.component.label();
        out.extend(
            self.intersections
                .iter()
                .tuple_windows()
                .map(|(ei0, ei1)| EdgeIntersectionList::split_coords(coords, ei0, ei1))
                .filter(|pts| pts.iter().any(|p| *p != pts[0]))
                .map(|pts| Edge::new(pts, label.clone())),
        );
    }

    /// Whether the coordinates equal those of `other`, in order.
    pub fn is_pointwise_equal(&self, other: &Edge<T>) -> bool {
        self.coords == other.coords
    }

    /// Contribute this edge's label to `im`.
    pub fn compute_im(&self, im: &mut IntersectionMatrix) {
        update_im(self.label(), im);
    }
}

fn side_location(label: &Label, geom_index: usize, pos: Position) -> Option<CoordPos> {
    if label.is_area_for(geom_index) {
        label.location(geom_index, pos)
    } else {
        None
    }
}

/// Update `im` with the contribution of an edge label.
pub(crate) fn update_im(label: &Label, im: &mut IntersectionMatrix) {
    im.set_at_least_if_valid(
        label.on_location(0),
        label.on_location(1),
        Dimensions::OneDimensional,
    );
    if label.is_area() {
        for pos in [Position::Left, Position::Right].iter().copied() {
            im.set_at_least_if_valid(
                side_location(label, 0, pos),
                side_location(label, 1, pos),
                Dimensions::TwoDimensional,
            );
        }
    }
}

/// Edges are equal if their coordinates agree, in order or reversed.
impl<T: GeoFloat> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.coords.len() != other.coords.len() {
            return false;
        }
        self.coords == other.coords || self.coords.iter().eq(other.coords.iter().rev())
    }
}

impl<T: GeoFloat> fmt::Display for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge {}: LINESTRING (", self.label())?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?} {:?}", c.x, c.y)?;
        }
        write!(f, ") {} {}", self.label(), self.depth_delta)
    }
}

#[cfg(test)]
mod tests {
    use geo::Line;

    use super::*;

    fn coords(pts: &[(f64, f64)]) -> Vec<Coordinate<f64>> {
        pts.iter().map(|&(x, y)| Coordinate { x, y }).collect()
    }

    #[test]
    fn test_intersection_normalized_to_next_segment() {
        let mut edge = Edge::new(
            coords(&[(0., 0.), (2., 0.), (4., 0.)]),
            Label::line_for(0, Some(CoordPos::Inside)),
        );
        let isec = SegmentIntersection::between(
            Line::from([(0., 0.), (2., 0.)]),
            Line::from([(2., -1.), (2., 1.)]),
        )
        .unwrap();
        let ei = edge.add_intersection(&isec, 0, 0, 0);
        assert_eq!(ei.segment_index, 1);
        assert_eq!(ei.dist, 0.);

        // The same point seen from the next segment is not added again.
        let isec = SegmentIntersection::between(
            Line::from([(2., 0.), (4., 0.)]),
            Line::from([(2., -1.), (2., 1.)]),
        )
        .unwrap();
        edge.add_intersections(&isec, 1, 0);
        assert_eq!(edge.intersections().len(), 1);
    }

    #[test]
    fn test_split_round_trip() {
        let original = coords(&[(0., 0.), (2., 0.), (2., 2.), (4., 2.)]);
        let mut edge = Edge::new(original.clone(), Label::line_for(0, Some(CoordPos::Inside)));

        let cutters = [
            Line::from([(1., -1.), (1., 1.)]),
            Line::from([(1., 1.), (3., 1.)]),
            Line::from([(3., 1.), (3., 3.)]),
        ];
        for seg in 0..3 {
            let line = Line::new(original[seg], original[seg + 1]);
            for cutter in cutters.iter() {
                if let Some(isec) = SegmentIntersection::between(line, *cutter) {
                    edge.add_intersections(&isec, seg, 0);
                }
            }
        }

        let mut parts = vec![];
        edge.add_split_edges(&mut parts);
        assert_eq!(parts.len(), 4);

        let mut joined: Vec<Coordinate<f64>> = vec![];
        for part in parts.iter() {
            for c in part.coords() {
                if joined.last() != Some(c) {
                    joined.push(*c);
                }
            }
        }
        let mut expected = original;
        expected.insert(1, Coordinate { x: 1., y: 0. });
        expected.insert(3, Coordinate { x: 2., y: 1. });
        expected.insert(5, Coordinate { x: 3., y: 2. });
        assert_eq!(joined, expected);
    }

    #[test]
    fn test_degenerate_split_dropped() {
        let mut edge = Edge::new(
            coords(&[(0., 0.), (0., 0.)]),
            Label::line_for(0, Some(CoordPos::Inside)),
        );
        let mut parts = vec![];
        edge.add_split_edges(&mut parts);
        assert!(parts.is_empty());
    }

    #[test]
    fn test_equality_reversed() {
        let label = Label::line(None);
        let a = Edge::new(coords(&[(0., 0.), (1., 0.), (1., 1.)]), label.clone());
        let b = Edge::new(coords(&[(1., 1.), (1., 0.), (0., 0.)]), label.clone());
        let c = Edge::new(coords(&[(0., 0.), (1., 1.)]), label);
        assert_eq!(a, b);
        assert!(!a.is_pointwise_equal(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_collapsed() {
        let edge = Edge::new(
            coords(&[(0., 0.), (1., 0.), (0., 0.)]),
            Label::area_for(0, Some(CoordPos::OnBoundary), Some(CoordPos::Outside), Some(CoordPos::Outside)),
        );
        assert!(edge.is_collapsed());
        let collapsed = edge.collapsed_edge();
        assert_eq!(collapsed.num_points(), 2);
        assert!(collapsed.label().is_line(0));
    }

    #[test]
    fn test_envelope() {
        let edge = Edge::new(
            coords(&[(1., 3.), (-2., 0.5), (4., 1.)]),
            Label::line(None),
        );
        let env = edge.envelope();
        assert_eq!(env.min(), Coordinate { x: -2., y: 0.5 });
        assert_eq!(env.max(), Coordinate { x: 4., y: 3. });
    }

    #[test]
    fn test_compute_im() {
        let edge = Edge::new(
            coords(&[(0., 0.), (1., 0.)]),
            Label::area(Some(CoordPos::OnBoundary), Some(CoordPos::Inside), Some(CoordPos::Outside)),
        );
        let mut im = IntersectionMatrix::new();
        edge.compute_im(&mut im);
        assert_eq!(im.to_string(), "2FFF1FFF2");
    }
}
