use std::fmt;

use geo::coordinate_position::CoordPos;

use super::{Position, TopologyLocation};

/// The topological relationship of a graph component to the (up to)
/// two input geometries.
///
/// Slot `0` describes the first geometry and slot `1` the second; for
/// single-geometry operations slot `1` stays undefined. Each graph
/// component owns its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    elts: [TopologyLocation; 2],
}

impl Label {
    /// A line label with the same `on` location for both geometries.
    pub fn line(on: Option<CoordPos>) -> Self {
        Label {
            elts: [TopologyLocation::line(on), TopologyLocation::line(on)],
        }
    }

    /// An area label with the same locations for both geometries.
    pub fn area(on: Option<CoordPos>, left: Option<CoordPos>, right: Option<CoordPos>) -> Self {
        Label {
            elts: [
                TopologyLocation::area(on, left, right),
                TopologyLocation::area(on, left, right),
            ],
        }
    }

    /// A line label for geometry `geom_index`; the other geometry is
    /// undefined.
    pub fn line_for(geom_index: usize, on: Option<CoordPos>) -> Self {
        let mut label = Label::line(None);
        label.elts[geom_index].set_on_location(on);
        label
    }

    /// An area label for geometry `geom_index`; the other geometry is
    /// an undefined area location.
    pub fn area_for(
        geom_index: usize,
        on: Option<CoordPos>,
        left: Option<CoordPos>,
        right: Option<CoordPos>,
    ) -> Self {
        let mut label = Label::area(None, None, None);
        label.elts[geom_index].set_locations(on, left, right);
        label
    }

    /// Converts a label to a line label keeping only the `on` slots.
    pub fn to_line_label(label: &Label) -> Label {
        Label {
            elts: [
                TopologyLocation::line(label.elts[0].on()),
                TopologyLocation::line(label.elts[1].on()),
            ],
        }
    }

    pub fn flip(&mut self) {
        self.elts[0].flip();
        self.elts[1].flip();
    }

    /// Location of geometry `geom_index` at `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` is a side and the location is a line location.
    pub fn location(&self, geom_index: usize, pos: Position) -> Option<CoordPos> {
        self.elts[geom_index].get(pos)
    }

    #[inline]
    pub fn on_location(&self, geom_index: usize) -> Option<CoordPos> {
        self.elts[geom_index].on()
    }

    pub fn set_location(&mut self, geom_index: usize, pos: Position, loc: Option<CoordPos>) {
        self.elts[geom_index].set_location(pos, loc);
    }

    pub fn set_on_location(&mut self, geom_index: usize, loc: Option<CoordPos>) {
        self.elts[geom_index].set_on_location(loc);
    }

    pub fn set_all_locations(&mut self, geom_index: usize, loc: Option<CoordPos>) {
        self.elts[geom_index].set_all_locations(loc);
    }

    pub fn set_all_locations_if_empty(&mut self, geom_index: usize, loc: Option<CoordPos>) {
        self.elts[geom_index].set_all_locations_if_empty(loc);
    }

    /// Merge `other` into `self`: undefined slots take the value of
    /// `other`, defined slots never change.
    pub fn merge(&mut self, other: &Label) {
        self.elts[0].merge(&other.elts[0]);
        self.elts[1].merge(&other.elts[1]);
    }

    /// Number of geometries with some defined location.
    pub fn geometry_count(&self) -> usize {
        self.elts.iter().filter(|e| !e.is_empty()).count()
    }

    pub fn is_empty(&self, geom_index: usize) -> bool {
        self.elts[geom_index].is_empty()
    }

    pub fn is_any_empty(&self, geom_index: usize) -> bool {
        self.elts[geom_index].is_any_empty()
    }

    /// Whether either geometry has an area location.
    pub fn is_area(&self) -> bool {
        self.elts[0].is_area() || self.elts[1].is_area()
    }

    pub fn is_area_for(&self, geom_index: usize) -> bool {
        self.elts[geom_index].is_area()
    }

    pub fn is_line(&self, geom_index: usize) -> bool {
        self.elts[geom_index].is_line()
    }

    pub fn is_equal_on_side(&self, other: &Label, pos: Position) -> bool {
        self.elts[0].is_equal_on_side(&other.elts[0], pos)
            && self.elts[1].is_equal_on_side(&other.elts[1], pos)
    }

    pub fn all_positions_equal(&self, geom_index: usize, loc: Option<CoordPos>) -> bool {
        self.elts[geom_index].all_positions_equal(loc)
    }

    /// Collapse the location of `geom_index` to a line location.
    pub fn to_line(&mut self, geom_index: usize) {
        if self.elts[geom_index].is_area() {
            self.elts[geom_index] = TopologyLocation::line(self.elts[geom_index].on());
        }
    }

    pub fn topology_location(&self, geom_index: usize) -> &TopologyLocation {
        &self.elts[geom_index]
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.elts[0], self.elts[1])
    }
}
