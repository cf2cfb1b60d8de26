use geo::{coordinate_position::CoordPos, winding_order::WindingOrder};

/// Rule deciding whether a linestring end point is on the boundary.
///
/// `count` is the number of line ends incident on the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryNodeRule {
    /// Boundary iff an odd number of line ends meet (OGC SFS).
    Mod2,
    /// Every end point is boundary.
    EndPoint,
    /// Boundary iff more than one line end meets.
    MultivalentEndPoint,
    /// Boundary iff exactly one line end meets.
    MonovalentEndPoint,
}

impl BoundaryNodeRule {
    pub fn is_in_boundary(&self, count: usize) -> bool {
        match self {
            BoundaryNodeRule::Mod2 => count % 2 == 1,
            BoundaryNodeRule::EndPoint => count > 0,
            BoundaryNodeRule::MultivalentEndPoint => count > 1,
            BoundaryNodeRule::MonovalentEndPoint => count == 1,
        }
    }

    /// The location of a point with `count` incident line ends.
    pub fn location(&self, count: usize) -> CoordPos {
        if self.is_in_boundary(count) {
            CoordPos::OnBoundary
        } else {
            CoordPos::Inside
        }
    }
}

impl Default for BoundaryNodeRule {
    fn default() -> Self {
        BoundaryNodeRule::Mod2
    }
}

/// Configuration shared by a graph and the rings built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub boundary_node_rule: BoundaryNodeRule,
    /// Winding order of shells; rings winding the other way are holes.
    pub shell_orientation: WindingOrder,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            boundary_node_rule: BoundaryNodeRule::default(),
            shell_orientation: WindingOrder::CounterClockwise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod2_rule() {
        let rule = BoundaryNodeRule::Mod2;
        assert_eq!(rule.location(1), CoordPos::OnBoundary);
        assert_eq!(rule.location(2), CoordPos::Inside);
        assert_eq!(rule.location(3), CoordPos::OnBoundary);
    }

    #[test]
    fn test_other_rules() {
        assert!(BoundaryNodeRule::EndPoint.is_in_boundary(2));
        assert!(!BoundaryNodeRule::MultivalentEndPoint.is_in_boundary(1));
        assert!(BoundaryNodeRule::MultivalentEndPoint.is_in_boundary(2));
        assert!(!BoundaryNodeRule::MonovalentEndPoint.is_in_boundary(2));
    }
}
