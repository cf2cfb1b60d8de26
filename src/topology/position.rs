/// Position of a location relative to a directed graph component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    On,
    Left,
    Right,
}

impl Position {
    /// Returns `Left` for `Right`, `Right` for `Left`, and `On`
    /// otherwise.
    pub fn opposite(self) -> Position {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
            Position::On => Position::On,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Position::On => 0,
            Position::Left => 1,
            Position::Right => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Position::Left.opposite(), Position::Right);
        assert_eq!(Position::Right.opposite(), Position::Left);
        assert_eq!(Position::On.opposite(), Position::On);
    }
}
