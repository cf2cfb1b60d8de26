use std::fmt;

use geo::coordinate_position::CoordPos;

use super::{Label, Position};

const NULL_DEPTH: i32 = -1;

/// Per-geometry, per-side depth counters of an edge.
///
/// A depth counts how many times the interior of a geometry is
/// entered when crossing towards a side. Depths start undefined
/// (`-1`); an undefined depth is a valid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Depth {
    depth: [[i32; 3]; 2],
}

impl Default for Depth {
    fn default() -> Self {
        Depth {
            depth: [[NULL_DEPTH; 3]; 2],
        }
    }
}

impl Depth {
    pub fn new() -> Self {
        Self::default()
    }

    /// The depth contributed by a location: `0` outside, `1` inside.
    pub fn depth_at_location(loc: Option<CoordPos>) -> i32 {
        match loc {
            Some(CoordPos::Outside) => 0,
            Some(CoordPos::Inside) => 1,
            _ => NULL_DEPTH,
        }
    }

    #[inline]
    pub fn depth(&self, geom_index: usize, pos: Position) -> i32 {
        self.depth[geom_index][pos.index()]
    }

    #[inline]
    pub fn set_depth(&mut self, geom_index: usize, pos: Position, value: i32) {
        self.depth[geom_index][pos.index()] = value;
    }

    /// The location implied by the depth at a side.
    pub fn location(&self, geom_index: usize, pos: Position) -> CoordPos {
        if self.depth(geom_index, pos) <= 0 {
            CoordPos::Outside
        } else {
            CoordPos::Inside
        }
    }

    /// Count one more interior on a side.
    pub fn add_location(&mut self, geom_index: usize, pos: Position, loc: Option<CoordPos>) {
        if loc == Some(CoordPos::Inside) {
            self.depth[geom_index][pos.index()] += 1;
        }
    }

    pub fn is_null(&self) -> bool {
        self.depth
            .iter()
            .all(|row| row.iter().all(|d| *d == NULL_DEPTH))
    }

    pub fn is_null_for(&self, geom_index: usize) -> bool {
        self.depth[geom_index][Position::Left.index()] == NULL_DEPTH
    }

    pub fn is_null_at(&self, geom_index: usize, pos: Position) -> bool {
        self.depth(geom_index, pos) == NULL_DEPTH
    }

    /// Change of depth when crossing from the right to the left side.
    pub fn delta(&self, geom_index: usize) -> i32 {
        self.depth(geom_index, Position::Right) - self.depth(geom_index, Position::Left)
    }

    /// Rebase the side depths of each geometry so that the smaller one
    /// is zero, and the larger one (if any) is one.
    pub fn normalize(&mut self) {
        for geom_index in 0..2 {
            if self.is_null_for(geom_index) {
                continue;
            }
            let row = &mut self.depth[geom_index];
            let left = Position::Left.index();
            let right = Position::Right.index();
            let min_depth = row[left].min(row[right]).max(0);
            for pos in [left, right].iter() {
                row[*pos] = if row[*pos] > min_depth { 1 } else { 0 };
            }
        }
    }

    /// Accumulate the side locations of an area label.
    pub fn add(&mut self, label: &Label) {
        for geom_index in 0..2 {
            if !label.is_area_for(geom_index) {
                continue;
            }
            for pos in [Position::Left, Position::Right].iter().copied() {
                let loc = label.location(geom_index, pos);
                if loc == Some(CoordPos::Outside) || loc == Some(CoordPos::Inside) {
                    let d = Self::depth_at_location(loc);
                    let cell = &mut self.depth[geom_index][pos.index()];
                    if *cell == NULL_DEPTH {
                        *cell = d;
                    } else {
                        *cell += d;
                    }
                }
            }
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A: {},{} B: {},{}",
            self.depth[0][1], self.depth[0][2], self.depth[1][1], self.depth[1][2]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_normalize() {
        let mut depth = Depth::new();
        assert!(depth.is_null());

        let label = Label::area_for(0, Some(CoordPos::OnBoundary), Some(CoordPos::Inside), Some(CoordPos::Outside));
        depth.add(&label);
        depth.add(&label);
        assert_eq!(depth.depth(0, Position::Left), 2);
        assert_eq!(depth.depth(0, Position::Right), 0);
        assert_eq!(depth.delta(0), -2);
        assert!(depth.is_null_for(1));

        depth.normalize();
        assert_eq!(depth.depth(0, Position::Left), 1);
        assert_eq!(depth.depth(0, Position::Right), 0);
        assert_eq!(depth.location(0, Position::Left), CoordPos::Inside);
        assert_eq!(depth.location(0, Position::Right), CoordPos::Outside);
    }

    #[test]
    fn test_line_labels_ignored() {
        let mut depth = Depth::new();
        depth.add(&Label::line(Some(CoordPos::Inside)));
        assert!(depth.is_null());
    }

    #[test]
    fn test_add_location() {
        let mut depth = Depth::new();
        depth.set_depth(1, Position::Left, 1);
        depth.add_location(1, Position::Left, Some(CoordPos::Inside));
        assert_eq!(depth.depth(1, Position::Left), 2);

        depth.add_location(1, Position::Left, Some(CoordPos::Outside));
        depth.add_location(1, Position::Left, None);
        assert_eq!(depth.depth(1, Position::Left), 2);
        assert!(depth.is_null_at(1, Position::Right));
        assert!(depth.is_null_for(0));
    }
}
