use std::fmt;

use geo::{coordinate_position::CoordPos, dimensions::Dimensions};

/// A DE-9IM intersection matrix.
///
/// Rows are the locations in the first geometry and columns the
/// locations in the second, both ordered interior, boundary,
/// exterior. Graph components contribute to it through
/// [`ComponentRef::update_im`](crate::ComponentRef::update_im).
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionMatrix {
    cells: [[Dimensions; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        IntersectionMatrix {
            cells: [[Dimensions::Empty; 3]; 3],
        }
    }
}

#[inline]
fn index(pos: CoordPos) -> usize {
    match pos {
        CoordPos::Inside => 0,
        CoordPos::OnBoundary => 1,
        CoordPos::Outside => 2,
    }
}

#[inline]
fn rank(dim: Dimensions) -> u8 {
    match dim {
        Dimensions::Empty => 0,
        Dimensions::ZeroDimensional => 1,
        Dimensions::OneDimensional => 2,
        Dimensions::TwoDimensional => 3,
    }
}

impl IntersectionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, a: CoordPos, b: CoordPos) -> Dimensions {
        self.cells[index(a)][index(b)]
    }

    pub fn set(&mut self, a: CoordPos, b: CoordPos, dim: Dimensions) {
        self.cells[index(a)][index(b)] = dim;
    }

    /// Raise the cell to `dim` if it is currently lower.
    pub fn set_at_least(&mut self, a: CoordPos, b: CoordPos, dim: Dimensions) {
        let cell = &mut self.cells[index(a)][index(b)];
        if rank(*cell) < rank(dim) {
            *cell = dim;
        }
    }

    /// As [`Self::set_at_least`], ignoring undefined locations.
    pub fn set_at_least_if_valid(
        &mut self,
        a: Option<CoordPos>,
        b: Option<CoordPos>,
        dim: Dimensions,
    ) {
        if let (Some(a), Some(b)) = (a, b) {
            self.set_at_least(a, b, dim);
        }
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row.iter() {
                let c = match cell {
                    Dimensions::Empty => 'F',
                    Dimensions::ZeroDimensional => '0',
                    Dimensions::OneDimensional => '1',
                    Dimensions::TwoDimensional => '2',
                };
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_at_least() {
        let mut im = IntersectionMatrix::new();
        im.set_at_least(CoordPos::Inside, CoordPos::Inside, Dimensions::OneDimensional);
        im.set_at_least(CoordPos::Inside, CoordPos::Inside, Dimensions::ZeroDimensional);
        im.set_at_least_if_valid(None, Some(CoordPos::Outside), Dimensions::TwoDimensional);
        im.set_at_least(CoordPos::Outside, CoordPos::Outside, Dimensions::TwoDimensional);
        assert_eq!(im.get(CoordPos::Inside, CoordPos::Inside), Dimensions::OneDimensional);
        assert_eq!(im.to_string(), "1FFFFFFF2");
    }
}
