use std::convert::From;
use std::fmt;

/// One of the four primary compass directions a cell has a wall in.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North = 0,
    South = 1,
    West = 2,
    East = 3,
}

/// Movement axis of a direction, used for weighting carving choices.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Axis {
    Vertical,
    Horizontal,
}

// Lookup tables indexed by `CompassPrimary as usize`.
const OPPOSITES: [CompassPrimary; 4] = [CompassPrimary::South,
                                        CompassPrimary::North,
                                        CompassPrimary::East,
                                        CompassPrimary::West];
const OFFSETS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const AXES: [Axis; 4] = [Axis::Vertical, Axis::Vertical, Axis::Horizontal, Axis::Horizontal];

impl CompassPrimary {
    /// All directions in their canonical order: North, South, West, East.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::East];

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        OPPOSITES[self as usize]
    }

    /// The (dx, dy) step one cell away in this direction. North is towards y = 0.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        OFFSETS[self as usize]
    }

    #[inline]
    pub fn axis(self) -> Axis {
        AXES[self as usize]
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The set of walls standing around a cell.
#[derive(Hash, Eq, PartialEq, Copy, Clone)]
pub struct Walls(u8);

impl Walls {
    pub const NONE: Walls = Walls(0);
    pub const ALL: Walls = Walls(0b1111);

    #[inline]
    pub fn contains(self, dir: CompassPrimary) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: CompassPrimary) {
        self.0 |= dir.bit();
    }

    #[inline]
    pub fn remove(&mut self, dir: CompassPrimary) {
        self.0 &= !dir.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Directions with a standing wall, in canonical direction order.
    pub fn iter(self) -> impl Iterator<Item = CompassPrimary> {
        (0..CompassPrimary::ALL.len())
            .map(|index| CompassPrimary::ALL[index])
            .filter(move |dir| self.contains(*dir))
    }
}

impl fmt::Debug for Walls {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> From<&'a [CompassPrimary]> for Walls {
    fn from(dirs: &'a [CompassPrimary]) -> Walls {
        let mut walls = Walls::NONE;
        for dir in dirs {
            walls.insert(*dir);
        }
        walls
    }
}

/// A single grid position: which walls stand and whether generation has reached it yet.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub walls: Walls,
    pub visited: bool,
}

impl Cell {
    /// A cell boxed in on all four sides that generation has not visited.
    pub fn cleared() -> Cell {
        Cell {
            walls: Walls::ALL,
            visited: false,
        }
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::cleared()
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Position {
        Position { x, y }
    }

    /// The position one step away in `dir`.
    ///
    /// Returns None if the result is not representable (e.g. North of row 0). The result is
    /// not checked against any grid's dimensions.
    pub fn offset(self, dir: CompassPrimary) -> Option<Position> {
        let (dx, dy) = dir.offset();
        let x = i64::from(self.x) + dx;
        let y = i64::from(self.y) + dy;
        if x < 0 || y < 0 || x > i64::from(u32::MAX) || y > i64::from(u32::MAX) {
            None
        } else {
            Some(Position::new(x as u32, y as u32))
        }
    }
}
