//! Warehouse grid representation.
//!
//! # Data layout
//!
//! Cells are stored row-major in a single `Vec<Cell>`: the cell at `(x, y)`
//! lives at index `y * size + x`.  The grid is always square and its size is
//! fixed for its lifetime; edits only flip shelf flags.
//!
//! # Start cell
//!
//! Every grid carries the agent's start coordinate.  That cell is never a
//! shelf: the default layout leaves it free, edits on it are rejected, and
//! snapshot loading clears it.

use wh_core::{Coord, SimRng, MAX_GRID_SIZE};

use crate::{SpatialError, SpatialResult};

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One grid square.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x:        i32,
    pub y:        i32,
    /// Shelves block traversal.
    pub is_shelf: bool,
    /// Optional aisle label carried through from a loaded layout.
    pub aisle_id: Option<String>,
}

impl Cell {
    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Square warehouse floor: a matrix of cells plus the designated start cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size:  i32,
    start: Coord,
    cells: Vec<Cell>,
}

impl Grid {
    /// A `size × size` grid with no shelves.
    ///
    /// # Panics
    /// Panics if `size` is not in `1..=MAX_GRID_SIZE` or `start` is outside
    /// the grid; validate the configuration first (`SimConfig::validate`).
    pub fn empty(size: i32, start: Coord) -> Self {
        assert!(
            (1..=MAX_GRID_SIZE).contains(&size),
            "grid size {size} outside 1..={MAX_GRID_SIZE}"
        );
        let mut cells = Vec::with_capacity(size as usize * size as usize);
        for y in 0..size {
            for x in 0..size {
                cells.push(Cell { x, y, is_shelf: false, aisle_id: None });
            }
        }
        let grid = Self { size, start, cells };
        assert!(grid.in_bounds(start), "start {start} outside {size}x{size} grid");
        grid
    }

    /// The stock warehouse layout.
    ///
    /// Shelves occupy a central band: rows `2 ..= size-4` except the middle
    /// aisle row `(size-2)/2`, and within those rows the columns
    /// `2 ..= size-3` whose `x % 4` is 2 or 3.  Every other pair of columns is
    /// a vertical aisle.  For the default 20×20 grid that is rows 2–16 minus
    /// row 9 and columns 2–17.
    pub fn generate_default(size: i32, start: Coord) -> Self {
        let mut grid = Self::empty(size, start);
        let (row_lo, row_hi) = (2, size - 4);
        let mid_aisle = (size - 2) / 2;
        let (col_lo, col_hi) = (2, size - 3);

        for cell in &mut grid.cells {
            let (x, y) = (cell.x, cell.y);
            cell.is_shelf = (row_lo..=row_hi).contains(&y)
                && y != mid_aisle
                && (col_lo..=col_hi).contains(&x)
                && matches!(x % 4, 2 | 3);
        }
        let start_idx = grid.index(start);
        grid.cells[start_idx].is_shelf = false;
        grid
    }

    // ── Dimensions & lookup ───────────────────────────────────────────────

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.size && c.y < self.size
    }

    /// Row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index_of(&self, c: Coord) -> Option<usize> {
        self.in_bounds(c).then(|| self.index(c))
    }

    #[inline]
    fn index(&self, c: Coord) -> usize {
        (c.y * self.size + c.x) as usize
    }

    pub fn cell(&self, c: Coord) -> Option<&Cell> {
        self.index_of(c).map(|i| &self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size as usize)
    }

    /// `true` if `c` is in bounds and a shelf.
    #[inline]
    pub fn is_shelf(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(|cell| cell.is_shelf)
    }

    /// `true` if the agent may stand on `c`.
    #[inline]
    pub fn is_walkable(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(|cell| !cell.is_shelf)
    }

    pub fn shelf_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_shelf).count()
    }

    // ── Edits ─────────────────────────────────────────────────────────────

    /// Set or clear the shelf flag at `c`.
    ///
    /// # Errors
    /// `InvalidCoordinate` if `c` is off the grid; `StartCellImmutable` if `c`
    /// is the start cell.  The grid is unchanged on error.
    pub fn set_shelf(&mut self, c: Coord, is_shelf: bool) -> SpatialResult<()> {
        let idx = self.index_of(c).ok_or(SpatialError::InvalidCoordinate(c))?;
        if c == self.start {
            return Err(SpatialError::StartCellImmutable(c));
        }
        self.cells[idx].is_shelf = is_shelf;
        Ok(())
    }

    pub(crate) fn set_aisle_id(&mut self, c: Coord, aisle_id: Option<String>) {
        if let Some(idx) = self.index_of(c) {
            self.cells[idx].aisle_id = aisle_id;
        }
    }

    /// Remove every shelf.
    pub fn clear_shelves(&mut self) {
        for cell in &mut self.cells {
            cell.is_shelf = false;
        }
    }

    // ── Pick targets ──────────────────────────────────────────────────────

    /// `true` if `c` is a pick face: walkable, not the start cell, and
    /// 4-adjacent to at least one shelf.
    pub fn is_pick_face(&self, c: Coord) -> bool {
        self.is_walkable(c)
            && c != self.start
            && c.neighbors4().into_iter().any(|n| self.is_shelf(n))
    }

    /// Every pick face in row-major order.
    pub fn aisle_candidates(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .map(Cell::coord)
            .filter(|&c| self.is_pick_face(c))
            .collect()
    }

    /// Draw one pick face uniformly at random.
    ///
    /// Draws are independent, so repeated calls may return the same cell.
    ///
    /// # Errors
    /// `EmptyAisleCandidatePool` if the grid has no pick face (e.g. no
    /// shelves at all).
    pub fn random_valid_aisle(&self, rng: &mut SimRng) -> SpatialResult<Coord> {
        let candidates = self.aisle_candidates();
        rng.choose(&candidates)
            .copied()
            .ok_or(SpatialError::EmptyAisleCandidatePool)
    }

    /// Draw `count` pick faces with replacement, reusing one candidate scan.
    ///
    /// # Errors
    /// `EmptyAisleCandidatePool` when `count > 0` and the grid has no pick
    /// face.  `count == 0` always succeeds with an empty list.
    pub fn sample_targets(&self, count: usize, rng: &mut SimRng) -> SpatialResult<Vec<Coord>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let candidates = self.aisle_candidates();
        (0..count)
            .map(|_| {
                rng.choose(&candidates)
                    .copied()
                    .ok_or(SpatialError::EmptyAisleCandidatePool)
            })
            .collect()
    }
}

impl std::fmt::Display for Grid {
    /// ASCII rendering: `#` shelf, `S` start, `.` floor.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for cell in row {
                let ch = if cell.coord() == self.start {
                    'S'
                } else if cell.is_shelf {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
