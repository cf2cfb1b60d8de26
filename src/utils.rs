use std::cmp::Ordering;

use geo::{
    coordinate_position::{CoordPos, CoordinatePosition},
    kernels::Orientation,
    winding_order::{Winding, WindingOrder},
    Coordinate, GeoFloat, Geometry, LineString, Polygon,
};
use itertools::Itertools;

/// Helper to convert orientation-2d into an ordering
#[inline]
pub fn orientation_as_ordering(orientation: Orientation) -> Ordering {
    match orientation {
        Orientation::CounterClockwise => Ordering::Less,
        Orientation::Clockwise => Ordering::Greater,
        Orientation::Collinear => Ordering::Equal,
    }
}

/// Drop consecutive repeated coordinates.
pub fn remove_repeated_points<T: GeoFloat>(coords: &[Coordinate<T>]) -> Vec<Coordinate<T>> {
    coords.iter().copied().dedup().collect()
}

/// Winding order of a closed sequence of coordinates; `None` if it
/// encloses no area.
pub fn winding_order<T: GeoFloat>(coords: &[Coordinate<T>]) -> Option<WindingOrder> {
    LineString::from(coords.to_vec()).winding_order()
}

/// Location of `coord` relative to the areal parts of `geom`.
///
/// Only polygonal components are considered, and their boundary
/// counts as interior. Anything else is exterior.
pub fn locate_in_area<T: GeoFloat>(geom: &Geometry<T>, coord: Coordinate<T>) -> CoordPos {
    let in_poly = |poly: &Polygon<T>| poly.coordinate_position(&coord) != CoordPos::Outside;
    let inside = match geom {
        Geometry::Polygon(p) => in_poly(p),
        Geometry::MultiPolygon(mp) => mp.0.iter().any(in_poly),
        Geometry::Rect(r) => in_poly(&r.to_polygon()),
        Geometry::Triangle(t) => in_poly(&t.to_polygon()),
        Geometry::GeometryCollection(gc) => gc
            .0
            .iter()
            .any(|g| locate_in_area(g, coord) == CoordPos::Inside),
        _ => false,
    };
    if inside {
        CoordPos::Inside
    } else {
        CoordPos::Outside
    }
}
