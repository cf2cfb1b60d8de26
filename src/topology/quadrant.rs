use geo::{Coordinate, GeoFloat};

/// Quadrant of a direction vector, numbered counter-clockwise from
/// the positive x-axis:
///
/// ```text
/// NW | NE
/// ---+---
/// SW | SE
/// ```
///
/// A vector lying on an axis belongs to the quadrant on its
/// counter-clockwise side, except that `+y` is `NE` and `-x` is `NW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quadrant {
    NE,
    NW,
    SW,
    SE,
}

impl Quadrant {
    /// Returns the quadrant of a direction vector `(dx, dy)`.
    ///
    /// # Panics
    ///
    /// If both `dx` and `dy` are zero: a zero vector has no direction.
    pub fn new<T: GeoFloat>(dx: T, dy: T) -> Quadrant {
        assert!(
            !(dx.is_zero() && dy.is_zero()),
            "cannot compute the quadrant of a zero-length direction vector"
        );
        if dx >= T::zero() {
            if dy >= T::zero() {
                Quadrant::NE
            } else {
                Quadrant::SE
            }
        } else if dy >= T::zero() {
            Quadrant::NW
        } else {
            Quadrant::SW
        }
    }

    /// Returns the quadrant of the directed segment from `p0` to `p1`.
    ///
    /// # Panics
    ///
    /// If the points are equal.
    pub fn from_coords<T: GeoFloat>(p0: Coordinate<T>, p1: Coordinate<T>) -> Quadrant {
        Quadrant::new(p1.x - p0.x, p1.y - p0.y)
    }

    #[inline]
    fn index(self) -> u8 {
        match self {
            Quadrant::NE => 0,
            Quadrant::NW => 1,
            Quadrant::SW => 2,
            Quadrant::SE => 3,
        }
    }

    fn from_index(idx: u8) -> Quadrant {
        match idx % 4 {
            0 => Quadrant::NE,
            1 => Quadrant::NW,
            2 => Quadrant::SW,
            _ => Quadrant::SE,
        }
    }

    /// Whether the two quadrants are diagonally opposite.
    pub fn is_opposite(self, other: Quadrant) -> bool {
        if self == other {
            return false;
        }
        (self.index() + 2) % 4 == other.index()
    }

    /// Returns the right-hand quadrant of the half-plane defined by
    /// the two quadrants, or `None` if they are opposite. Identical
    /// quadrants return themselves.
    pub fn common_half_plane(self, other: Quadrant) -> Option<Quadrant> {
        if self == other {
            return Some(self);
        }
        if self.is_opposite(other) {
            return None;
        }
        let (min, max) = if self.index() < other.index() {
            (self.index(), other.index())
        } else {
            (other.index(), self.index())
        };
        // Quadrants NE and SE span the half-plane to the right.
        if min == 0 && max == 3 {
            return Some(Quadrant::SE);
        }
        Some(Quadrant::from_index(min))
    }

    /// Whether this quadrant lies in the half-plane identified by its
    /// right-hand quadrant.
    pub fn is_in_half_plane(self, half_plane: Quadrant) -> bool {
        if half_plane == Quadrant::SE {
            return self == Quadrant::SE || self == Quadrant::SW;
        }
        self == half_plane || self.index() == half_plane.index() + 1
    }

    /// Whether the quadrant is above the x-axis.
    pub fn is_northern(self) -> bool {
        self == Quadrant::NE || self == Quadrant::NW
    }
}
