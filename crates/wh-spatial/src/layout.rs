//! Layout snapshot loading and saving.
//!
//! The persisted layout format (owned by whoever stores it) is a JSON array
//! of rows, each row an array of cell records:
//!
//! ```json
//! [
//!   [ { "x": 0, "y": 0, "isShelf": false }, { "x": 1, "y": 0, "isShelf": true } ],
//!   [ { "x": 0, "y": 1, "isShelf": false }, { "x": 1, "y": 1, "isShelf": false, "aisleId": "A1" } ]
//! ]
//! ```
//!
//! Rows must form a square and each record's `x`/`y` must match its position.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::warn;
use wh_core::{Coord, MAX_GRID_SIZE};

use crate::{Cell, Grid, SpatialError, SpatialResult};

/// One cell as it appears in a stored layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    pub x:        i32,
    pub y:        i32,
    pub is_shelf: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aisle_id: Option<String>,
}

impl From<&Cell> for CellRecord {
    fn from(cell: &Cell) -> Self {
        Self {
            x:        cell.x,
            y:        cell.y,
            is_shelf: cell.is_shelf,
            aisle_id: cell.aisle_id.clone(),
        }
    }
}

impl Grid {
    /// Build a grid from stored rows.
    ///
    /// A shelf recorded on `start` is dropped with a warning; the start cell
    /// is always walkable.
    ///
    /// # Errors
    /// `Layout` if the rows are empty, not square, or a record's coordinates
    /// disagree with its position; `InvalidCoordinate` if `start` is off the
    /// loaded grid.
    pub fn from_records(rows: Vec<Vec<CellRecord>>, start: Coord) -> SpatialResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(SpatialError::Layout("layout has no rows".into()));
        }
        let size_i32 = i32::try_from(size)
            .ok()
            .filter(|&n| n <= MAX_GRID_SIZE)
            .ok_or_else(|| SpatialError::Layout(format!("layout with {size} rows is too large")))?;

        let mut grid = Grid::try_empty(size_i32, start)?;
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(SpatialError::Layout(format!(
                    "row {y} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for (x, rec) in row.into_iter().enumerate() {
                let at = Coord::new(x as i32, y as i32);
                if rec.x != at.x || rec.y != at.y {
                    return Err(SpatialError::Layout(format!(
                        "record ({}, {}) stored at position {at}",
                        rec.x, rec.y
                    )));
                }
                if at == start {
                    if rec.is_shelf {
                        warn!(%start, "stored layout has a shelf on the start cell; clearing it");
                    }
                    continue;
                }
                grid.set_shelf(at, rec.is_shelf)?;
                grid.set_aisle_id(at, rec.aisle_id);
            }
        }
        Ok(grid)
    }

    /// Parse a JSON layout snapshot from `reader`.
    pub fn from_layout_json<R: Read>(reader: R, start: Coord) -> SpatialResult<Self> {
        let rows: Vec<Vec<CellRecord>> = serde_json::from_reader(reader)?;
        Self::from_records(rows, start)
    }

    /// Parse a JSON layout snapshot that must be `size × size`.
    ///
    /// The row count is checked before `start` is applied, so a stored
    /// layout of the wrong size always reports `LayoutSize`.
    pub fn load_layout_json<R: Read>(reader: R, size: i32, start: Coord) -> SpatialResult<Self> {
        let rows: Vec<Vec<CellRecord>> = serde_json::from_reader(reader)?;
        if usize::try_from(size).ok() != Some(rows.len()) {
            return Err(SpatialError::LayoutSize { stored: rows.len(), expected: size });
        }
        Self::from_records(rows, start)
    }

    /// Stored-layout rows for this grid.
    pub fn to_records(&self) -> Vec<Vec<CellRecord>> {
        self.rows()
            .map(|row| row.iter().map(CellRecord::from).collect())
            .collect()
    }

    /// Write this grid as a JSON layout snapshot.
    pub fn write_layout_json<W: Write>(&self, writer: W) -> SpatialResult<()> {
        serde_json::to_writer(writer, &self.to_records())?;
        Ok(())
    }

    fn try_empty(size: i32, start: Coord) -> SpatialResult<Self> {
        if !(0..size).contains(&start.x) || !(0..size).contains(&start.y) {
            return Err(SpatialError::InvalidCoordinate(start));
        }
        Ok(Grid::empty(size, start))
    }
}
