use std::fmt;

use geo::coordinate_position::CoordPos;
use smallvec::{smallvec, SmallVec};

use super::{location_symbol, Position};

/// The locations of a graph component relative to one input geometry.
///
/// A line location has a single `on` slot and describes a point or
/// line component. An area location has `on`, `left` and `right`
/// slots and describes an edge of an area: `left` and `right` are
/// relative to the direction of the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyLocation {
    locations: SmallVec<[Option<CoordPos>; 3]>,
}

impl TopologyLocation {
    /// A line (single slot) location.
    pub fn line(on: Option<CoordPos>) -> Self {
        TopologyLocation {
            locations: smallvec![on],
        }
    }

    /// An area (three slot) location.
    pub fn area(on: Option<CoordPos>, left: Option<CoordPos>, right: Option<CoordPos>) -> Self {
        TopologyLocation {
            locations: smallvec![on, left, right],
        }
    }

    /// Get the location at `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` is a side and this is a line location.
    pub fn get(&self, pos: Position) -> Option<CoordPos> {
        self.check_slot(pos);
        self.locations[pos.index()]
    }

    #[inline]
    pub fn on(&self) -> Option<CoordPos> {
        self.locations[0]
    }

    #[inline]
    fn check_slot(&self, pos: Position) {
        assert!(
            pos.index() < self.locations.len(),
            "side {:?} requested from a line location",
            pos
        );
    }

    /// Whether no slot is defined.
    pub fn is_empty(&self) -> bool {
        self.locations.iter().all(Option::is_none)
    }

    /// Whether some slot is undefined.
    pub fn is_any_empty(&self) -> bool {
        self.locations.iter().any(Option::is_none)
    }

    pub fn is_equal_on_side(&self, other: &TopologyLocation, pos: Position) -> bool {
        self.get(pos) == other.get(pos)
    }

    #[inline]
    pub fn is_area(&self) -> bool {
        self.locations.len() > 1
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        self.locations.len() == 1
    }

    /// Swap the sides. Does nothing for a line location.
    pub fn flip(&mut self) {
        if self.is_area() {
            self.locations.swap(1, 2);
        }
    }

    pub fn set_all_locations(&mut self, loc: Option<CoordPos>) {
        self.locations.iter_mut().for_each(|l| *l = loc);
    }

    pub fn set_all_locations_if_empty(&mut self, loc: Option<CoordPos>) {
        self.locations
            .iter_mut()
            .filter(|l| l.is_none())
            .for_each(|l| *l = loc);
    }

    /// Set the location at `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` is a side and this is a line location.
    pub fn set_location(&mut self, pos: Position, loc: Option<CoordPos>) {
        self.check_slot(pos);
        self.locations[pos.index()] = loc;
    }

    pub fn set_on_location(&mut self, loc: Option<CoordPos>) {
        self.locations[0] = loc;
    }

    /// Set all three slots.
    ///
    /// # Panics
    ///
    /// If this is a line location.
    pub fn set_locations(
        &mut self,
        on: Option<CoordPos>,
        left: Option<CoordPos>,
        right: Option<CoordPos>,
    ) {
        self.set_location(Position::On, on);
        self.set_location(Position::Left, left);
        self.set_location(Position::Right, right);
    }

    pub fn locations(&self) -> &[Option<CoordPos>] {
        &self.locations
    }

    pub fn all_positions_equal(&self, loc: Option<CoordPos>) -> bool {
        self.locations.iter().all(|l| *l == loc)
    }

    /// Fill undefined slots from `other`; defined slots are never
    /// overwritten. A line location merged with an area location
    /// becomes an area location.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if other.locations.len() > self.locations.len() {
            self.locations.resize(3, None);
        }
        for (dst, src) in self.locations.iter_mut().zip(other.locations.iter()) {
            if dst.is_none() {
                *dst = *src;
            }
        }
    }
}

impl fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_area() {
            write!(
                f,
                "{}{}{}",
                location_symbol(self.locations[1]),
                location_symbol(self.locations[0]),
                location_symbol(self.locations[2])
            )
        } else {
            write!(f, "{}", location_symbol(self.locations[0]))
        }
    }
}
