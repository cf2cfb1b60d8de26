use geo::{coordinate_position::CoordPos, Coordinate, Geometry};
use log::trace;

use super::HasEdgeEnd;
use crate::{
    error::{Result, TopologyError},
    topology::Position,
    utils::locate_in_area,
};

/// The edge ends leaving a node, sorted counter-clockwise.
///
/// The star stores ids into an arena of edge ends (any type that is
/// [`HasEdgeEnd`]); the arena is passed to every operation that
/// needs to look at the ends. Inserting an end with the same
/// direction as one already present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct EdgeEndStar {
    ends: Vec<usize>,
}

impl EdgeEndStar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert end `id` in direction order. Returns `false` if an end
    /// with the same direction is already present.
    pub fn insert<E: HasEdgeEnd>(&mut self, id: usize, arena: &[E]) -> bool {
        let end = arena[id].edge_end();
        match self
            .ends
            .binary_search_by(|probe| arena[*probe].edge_end().compare_direction(end))
        {
            Ok(_) => false,
            Err(pos) => {
                self.ends.insert(pos, id);
                true
            }
        }
    }

    /// The ids of the ends in counter-clockwise order.
    #[inline]
    pub fn ids(&self) -> &[usize] {
        &self.ends
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.ends.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// The common anchor of the ends.
    pub fn coordinate<E: HasEdgeEnd>(&self, arena: &[E]) -> Option<Coordinate<E::Scalar>> {
        self.ends.first().map(|id| arena[*id].edge_end().coordinate())
    }

    /// Position of end `id` in the star.
    pub fn find_index(&self, id: usize) -> Option<usize> {
        self.ends.iter().position(|e| *e == id)
    }

    /// The end following `id` in clockwise order, wrapping around.
    pub fn next_cw(&self, id: usize) -> Option<usize> {
        let i = self.find_index(id)?;
        let next = if i == 0 { self.ends.len() - 1 } else { i - 1 };
        Some(self.ends[next])
    }

    /// Complete the labels of the ends.
    ///
    /// Side labels are first propagated around the star. Locations
    /// still undefined are then exterior if some line end of that
    /// geometry lies on its boundary (a dimensional collapse), or
    /// else the location of the node in the areal part of the
    /// geometry in `geoms`.
    pub fn compute_labelling<E: HasEdgeEnd>(
        &self,
        arena: &mut [E],
        geoms: &[&Geometry<E::Scalar>],
    ) -> Result<(), E::Scalar> {
        self.propagate_side_labels(arena, 0)?;
        self.propagate_side_labels(arena, 1)?;

        let mut has_dimensional_collapse = [false; 2];
        for id in self.ends.iter() {
            let label = arena[*id].edge_end().label();
            for (gi, collapse) in has_dimensional_collapse.iter_mut().enumerate() {
                if label.is_line(gi) && label.on_location(gi) == Some(CoordPos::OnBoundary) {
                    *collapse = true;
                }
            }
        }

        let mut area_location: [Option<CoordPos>; 2] = [None, None];
        for id in self.ends.iter() {
            let end = arena[*id].edge_end_mut();
            let pt = end.coordinate();
            for gi in 0..2 {
                if !end.label().is_any_empty(gi) {
                    continue;
                }
                let loc = if has_dimensional_collapse[gi] {
                    Some(CoordPos::Outside)
                } else {
                    if area_location[gi].is_none() {
                        area_location[gi] = geoms.get(gi).map(|g| locate_in_area(g, pt));
                    }
                    area_location[gi]
                };
                end.label_mut().set_all_locations_if_empty(gi, loc);
            }
        }
        Ok(())
    }

    /// Fill in side locations around the star from a known left
    /// location, checking that the known ones agree.
    pub fn propagate_side_labels<E: HasEdgeEnd>(
        &self,
        arena: &mut [E],
        geom_index: usize,
    ) -> Result<(), E::Scalar> {
        let ends: &[E] = arena;
        let start_loc = self
            .ends
            .iter()
            .rev()
            .map(|id| ends[*id].edge_end().label())
            .find(|l| l.is_area_for(geom_index) && l.location(geom_index, Position::Left).is_some())
            .and_then(|l| l.location(geom_index, Position::Left));
        let mut curr_loc = match start_loc {
            Some(loc) => Some(loc),
            None => return Ok(()),
        };

        for id in self.ends.iter() {
            let end = arena[*id].edge_end_mut();
            let pt = end.coordinate();
            let label = end.label_mut();
            if label.on_location(geom_index).is_none() {
                label.set_on_location(geom_index, curr_loc);
            }
            if !label.is_area_for(geom_index) {
                continue;
            }
            let left_loc = label.location(geom_index, Position::Left);
            let right_loc = label.location(geom_index, Position::Right);
            match right_loc {
                Some(_) => {
                    if right_loc != curr_loc {
                        trace!("side location conflict at {:?}", pt);
                        return Err(TopologyError::SideLocationConflict(pt));
                    }
                    if left_loc.is_none() {
                        return Err(TopologyError::SingleNullSide(pt));
                    }
                    curr_loc = left_loc;
                }
                None => {
                    if left_loc.is_some() {
                        return Err(TopologyError::SingleNullSide(pt));
                    }
                    label.set_location(geom_index, Position::Right, curr_loc);
                    label.set_location(geom_index, Position::Left, curr_loc);
                }
            }
        }
        Ok(())
    }

    /// Whether the area sides of geometry `geom_index` are consistent
    /// around the star: walking counter-clockwise, each right location
    /// must equal the previous left location, and no end may have the
    /// same location on both sides.
    pub fn is_area_labels_consistent<E: HasEdgeEnd>(
        &self,
        arena: &[E],
        geom_index: usize,
    ) -> Result<bool, E::Scalar> {
        let last = match self.ends.last() {
            Some(id) => arena[*id].edge_end(),
            None => return Ok(true),
        };
        if !last.label().is_area_for(geom_index) {
            return Err(TopologyError::NonAreaEdge(last.coordinate()));
        }
        let start_loc = match last.label().location(geom_index, Position::Left) {
            Some(loc) => loc,
            None => return Err(TopologyError::UnlabelledAreaEdge(last.coordinate())),
        };

        let mut curr_loc = start_loc;
        for id in self.ends.iter() {
            let end = arena[*id].edge_end();
            let label = end.label();
            if !label.is_area_for(geom_index) {
                return Err(TopologyError::NonAreaEdge(end.coordinate()));
            }
            let left_loc = label.location(geom_index, Position::Left);
            let right_loc = label.location(geom_index, Position::Right);
            if left_loc == right_loc || right_loc != Some(curr_loc) {
                return Ok(false);
            }
            curr_loc = match left_loc {
                Some(loc) => loc,
                None => return Ok(false),
            };
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use geo::polygon;

    use super::*;
    use crate::{graph::EdgeEnd, topology::Label};

    const I: Option<CoordPos> = Some(CoordPos::Inside);
    const B: Option<CoordPos> = Some(CoordPos::OnBoundary);
    const E: Option<CoordPos> = Some(CoordPos::Outside);

    fn end(x: f64, y: f64, label: Label) -> EdgeEnd<f64> {
        EdgeEnd::new(0, Coordinate { x: 0., y: 0. }, Coordinate { x, y }, label)
    }

    fn is_sorted(star: &EdgeEndStar, arena: &[EdgeEnd<f64>]) -> bool {
        star.ids()
            .windows(2)
            .all(|w| arena[w[0]].compare_direction(&arena[w[1]]) == Ordering::Less)
    }

    fn star_of(arena: &[EdgeEnd<f64>]) -> EdgeEndStar {
        let mut star = EdgeEndStar::new();
        for id in 0..arena.len() {
            star.insert(id, arena);
        }
        star
    }

    #[test]
    fn test_insert_and_next_cw() {
        let arena = vec![
            end(0., -1., Label::line(None)),
            end(1., 0., Label::line(None)),
            end(0., 1., Label::line(None)),
            end(-1., 0., Label::line(None)),
            end(2., 0., Label::line(None)),
        ];
        let star = star_of(&arena);
        assert_eq!(star.ids(), &[1, 2, 3, 0]);
        assert!(is_sorted(&star, &arena));

        assert_eq!(star.next_cw(2), Some(1));
        assert_eq!(star.next_cw(1), Some(0));
        assert_eq!(star.next_cw(4), None);
        assert_eq!(star.coordinate(&arena), Some(Coordinate { x: 0., y: 0. }));
    }

    #[test]
    fn test_area_labels_consistent() {
        // A corner of a square polygon: interior is between the
        // edges going east and north.
        let arena = vec![
            end(1., 0., Label::area_for(0, B, I, E)),
            end(0., 1., Label::area_for(0, B, E, I)),
        ];
        let star = star_of(&arena);
        assert!(star.is_area_labels_consistent(&arena, 0).unwrap());

        let arena = vec![
            end(1., 0., Label::area_for(0, B, I, E)),
            end(0., 1., Label::area_for(0, B, I, E)),
        ];
        let star = star_of(&arena);
        assert!(!star.is_area_labels_consistent(&arena, 0).unwrap());

        let arena = vec![end(1., 0., Label::line_for(0, I))];
        let star = star_of(&arena);
        assert!(star.is_area_labels_consistent(&arena, 0).is_err());
    }

    #[test]
    fn test_propagate_side_labels() {
        let mut arena = vec![
            end(1., 0., Label::area_for(0, B, I, E)),
            end(1., 1., Label::area(None, None, None)),
            end(0., 1., Label::area_for(0, B, E, I)),
        ];
        let star = star_of(&arena);
        star.propagate_side_labels(&mut arena, 0).unwrap();
        assert_eq!(arena[1].label().location(0, Position::Left), I);
        assert_eq!(arena[1].label().location(0, Position::Right), I);
        assert_eq!(arena[1].label().on_location(0), I);
    }

    #[test]
    fn test_side_location_conflict() {
        let mut arena = vec![
            end(1., 0., Label::area_for(0, B, I, E)),
            end(0., 1., Label::area_for(0, B, I, E)),
        ];
        let star = star_of(&arena);
        let err = star.propagate_side_labels(&mut arena, 0).unwrap_err();
        assert_eq!(err, TopologyError::SideLocationConflict(Coordinate { x: 0., y: 0. }));
    }

    #[test]
    fn test_compute_labelling_locates_node() {
        let other: Geometry<f64> =
            polygon![(x: -1., y: -1.), (x: 1., y: -1.), (x: 1., y: 1.), (x: -1., y: 1.)].into();
        let line: Geometry<f64> = Geometry::LineString(vec![(0., 0.), (1., 0.)].into());

        let mut arena = vec![end(1., 0., Label::line_for(0, I))];
        let star = star_of(&arena);
        star.compute_labelling(&mut arena, &[&line, &other]).unwrap();
        assert_eq!(arena[0].label().on_location(1), I);
    }
}
