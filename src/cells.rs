use smallvec::SmallVec;
use std::fmt;

/// A grid coordinate. `x` is the column, `y` the row, both counted from the top left.
///
/// The derived ordering compares `x` first and then `y`, so cells can key ordered containers.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

pub type CellSmallVec = SmallVec<[Cell; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

/// The order neighbours are expanded in by the path searches.
pub const SEARCH_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::South,
                                                    CompassPrimary::East,
                                                    CompassPrimary::North,
                                                    CompassPrimary::West];

impl Cell {
    #[inline]
    pub fn new(x: u32, y: u32) -> Cell {
        Cell { x, y }
    }

    /// The cell `steps` away in direction `dir`.
    /// Returns None if the result is not representable, i.e. it would go above row 0 or left of column 0.
    /// Grid bounds are not considered here.
    pub fn offset(self, dir: CompassPrimary, steps: u32) -> Option<Cell> {
        let Cell { x, y } = self;
        match dir {
            CompassPrimary::North => y.checked_sub(steps).map(|ny| Cell::new(x, ny)),
            CompassPrimary::South => y.checked_add(steps).map(|ny| Cell::new(x, ny)),
            CompassPrimary::East => x.checked_add(steps).map(|nx| Cell::new(nx, y)),
            CompassPrimary::West => x.checked_sub(steps).map(|nx| Cell::new(nx, y)),
        }
    }

    #[inline]
    pub fn neighbour(self, dir: CompassPrimary) -> Option<Cell> {
        self.offset(dir, 1)
    }

    /// `|dx| + |dy|`
    #[inline]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        let dx = if self.x > other.x { self.x - other.x } else { other.x - self.x };
        let dy = if self.y > other.y { self.y - other.y } else { other.y - self.y };
        dx + dy
    }

    /// True if `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The cell halfway between two cells, rounding towards the top left.
    #[inline]
    pub fn midpoint(self, other: Cell) -> Cell {
        Cell::new((self.x + other.x) / 2, (self.y + other.y) / 2)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
