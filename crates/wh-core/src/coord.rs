//! Grid coordinates and the 4-neighbourhood.
//!
//! `x` grows to the right and `y` grows downward, so `Direction::Up` is
//! `y - 1`.  Coordinates are signed so neighbour offsets can step off the
//! edge and be rejected by a bounds check instead of wrapping.

use std::fmt;

/// A cell position on the warehouse grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance.  Admissible and consistent on a unit-cost
    /// 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The neighbouring coordinate one step in `dir`.  May be out of bounds.
    #[inline]
    pub fn step(self, dir: Direction) -> Coord {
        let (dx, dy) = dir.offset();
        Coord::new(self.x + dx, self.y + dy)
    }

    /// All four neighbours in [`Direction::ORDER`].
    #[inline]
    pub fn neighbors4(self) -> [Coord; 4] {
        Direction::ORDER.map(|d| self.step(d))
    }

    /// `true` if `other` is exactly one unit away along exactly one axis.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four grid moves.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Neighbour expansion order used by the path finder.  Changing it changes
    /// which of several equal-length paths is returned on symmetric layouts.
    pub const ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// `(dx, dy)` for one step.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up    => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down  => (0, 1),
            Direction::Left  => (-1, 0),
        }
    }
}
