//! Value types describing where a graph element sits relative to the
//! input geometries.
//!
//! Locations are `Option<CoordPos>`: `None` is the undefined location.

mod position;
pub use position::Position;

mod quadrant;
pub use quadrant::Quadrant;

mod location;
pub use location::TopologyLocation;

mod label;
pub use label::Label;

mod depth;
pub use depth::Depth;

use geo::coordinate_position::CoordPos;

/// Single character symbol of a location (`i`, `b`, `e` or `-`).
pub(crate) fn location_symbol(loc: Option<CoordPos>) -> char {
    match loc {
        Some(CoordPos::Inside) => 'i',
        Some(CoordPos::OnBoundary) => 'b',
        Some(CoordPos::Outside) => 'e',
        None => '-',
    }
}
