use std::{cmp::Ordering, collections::BTreeSet, fmt};

use geo::{Coordinate, GeoFloat};

/// A point at which an edge is cut.
///
/// The position is given by the index of the segment containing the
/// point, and the [edge distance](crate::intersector::edge_distance) of the point
/// along that segment.
#[derive(Debug, Clone, Copy)]
pub struct EdgeIntersection<T: GeoFloat> {
    pub coord: Coordinate<T>,
    pub segment_index: usize,
    pub dist: T,
}

impl<T: GeoFloat> EdgeIntersection<T> {
    pub fn new(coord: Coordinate<T>, segment_index: usize, dist: T) -> Self {
        EdgeIntersection {
            coord,
            segment_index,
            dist,
        }
    }

    /// Whether this is the first or the last point of an edge, given
    /// the edge's [`max_segment_index`](crate::edge::Edge::max_segment_index).
    pub fn is_end_point(&self, max_segment_index: usize) -> bool {
        (self.segment_index == 0 && self.dist.is_zero())
            || self.segment_index == max_segment_index
    }
}

/// Equality consistent with the ordering: the coordinate is ignored.
impl<T: GeoFloat> PartialEq for EdgeIntersection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: GeoFloat> Eq for EdgeIntersection<T> {}

/// Order by segment index, then by distance along the segment.
impl<T: GeoFloat> PartialOrd for EdgeIntersection<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.segment_index
                .cmp(&other.segment_index)
                .then(self.dist.partial_cmp(&other.dist)?),
        )
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl<T: GeoFloat> Ord for EdgeIntersection<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

impl<T: GeoFloat> fmt::Display for EdgeIntersection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} seg # = {} dist = {:?}",
            self.coord, self.segment_index, self.dist
        )
    }
}

/// The ordered set of intersections along one edge.
#[derive(Debug, Clone)]
pub struct EdgeIntersectionList<T: GeoFloat> {
    nodes: BTreeSet<EdgeIntersection<T>>,
}

impl<T: GeoFloat> Default for EdgeIntersectionList<T> {
    fn default() -> Self {
        EdgeIntersectionList {
            nodes: BTreeSet::new(),
        }
    }
}

impl<T: GeoFloat> EdgeIntersectionList<T> {
    /// Add an intersection unless one with the same position is
    /// already present. Returns the stored intersection.
    ///
    /// The `segment_index` and `dist` are expected to be normalized.
    pub fn add(&mut self, coord: Coordinate<T>, segment_index: usize, dist: T) -> EdgeIntersection<T> {
        let ei = EdgeIntersection::new(coord, segment_index, dist);
        self.nodes.insert(ei);
        *self.nodes.get(&ei).unwrap_or(&ei)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection<T>> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_intersection(&self, pt: Coordinate<T>) -> bool {
        self.nodes.iter().any(|ei| ei.coord == pt)
    }

    /// Add entries for the first and last points of the edge.
    pub(crate) fn add_endpoints(&mut self, coords: &[Coordinate<T>]) {
        let max_segment_index = coords.len() - 1;
        self.add(coords[0], 0, T::zero());
        self.add(coords[max_segment_index], max_segment_index, T::zero());
    }

    /// The coordinates of the part of `coords` between two
    /// consecutive intersections.
    pub(crate) fn split_coords(
        coords: &[Coordinate<T>],
        ei0: &EdgeIntersection<T>,
        ei1: &EdgeIntersection<T>,
    ) -> Vec<Coordinate<T>> {
        let last_seg_start = coords[ei1.segment_index];
        // The last intersection is only needed if it is not the
        // start of its segment.
        let use_int_pt1 = ei1.dist > T::zero() || ei1.coord != last_seg_start;

        let mut pts = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
        pts.push(ei0.coord);
        pts.extend_from_slice(&coords[ei0.segment_index + 1..=ei1.segment_index]);
        if use_int_pt1 {
            pts.push(ei1.coord);
        }
        pts
    }
}

impl<T: GeoFloat> fmt::Display for EdgeIntersectionList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Intersections:")?;
        for ei in self.nodes.iter() {
            writeln!(f, "{}", ei)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut list = EdgeIntersectionList::default();
        let first = list.add(Coordinate { x: 1., y: 1. }, 0, 1.);
        let again = list.add(Coordinate { x: 1., y: 1. }, 0, 1.);
        assert_eq!(first, again);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_ordering() {
        let mut list = EdgeIntersectionList::default();
        list.add(Coordinate { x: 3., y: 0. }, 1, 1.);
        list.add(Coordinate { x: 1., y: 0. }, 0, 1.);
        list.add(Coordinate { x: 2.5, y: 0. }, 1, 0.5);
        let order: Vec<_> = list.iter().map(|ei| ei.coord.x).collect();
        assert_eq!(order, vec![1., 2.5, 3.]);
        assert!(list.is_intersection(Coordinate { x: 2.5, y: 0. }));
    }

    #[test]
    fn test_split_coords() {
        let coords = vec![
            Coordinate { x: 0., y: 0. },
            Coordinate { x: 2., y: 0. },
            Coordinate { x: 4., y: 0. },
        ];
        let ei0 = EdgeIntersection::new(Coordinate { x: 1., y: 0. }, 0, 1.);
        let ei1 = EdgeIntersection::new(Coordinate { x: 4., y: 0. }, 2, 0.);
        let pts = EdgeIntersectionList::split_coords(&coords, &ei0, &ei1);
        assert_eq!(
            pts,
            vec![
                Coordinate { x: 1., y: 0. },
                Coordinate { x: 2., y: 0. },
                Coordinate { x: 4., y: 0. },
            ]
        );
    }

    #[test]
    fn test_end_points() {
        let coords = vec![
            Coordinate { x: 0., y: 0. },
            Coordinate { x: 2., y: 0. },
            Coordinate { x: 4., y: 0. },
        ];
        let mut list = EdgeIntersectionList::default();
        list.add_endpoints(&coords);
        list.add(Coordinate { x: 1., y: 0. }, 0, 1.);
        list.add(Coordinate { x: 2., y: 0. }, 1, 0.);

        let ends: Vec<_> = list.iter().map(|ei| ei.is_end_point(2)).collect();
        assert_eq!(ends, vec![true, false, false, true]);
    }
}
