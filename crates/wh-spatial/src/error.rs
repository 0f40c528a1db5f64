//! Spatial-subsystem error type.

use thiserror::Error;

use wh_core::Coord;

/// Errors produced by `wh-spatial`.
///
/// Path finding never returns these: an impossible path is an empty
/// [`Path`][crate::Path].  They come from grid edits, target sampling, and
/// layout loading.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("coordinate {0} is outside the grid")]
    InvalidCoordinate(Coord),

    #[error("start cell {0} cannot be edited")]
    StartCellImmutable(Coord),

    #[error("no aisle cell is adjacent to a shelf")]
    EmptyAisleCandidatePool,

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("stored layout is {stored}x{stored}, expected {expected}x{expected}")]
    LayoutSize { stored: usize, expected: i32 },

    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
