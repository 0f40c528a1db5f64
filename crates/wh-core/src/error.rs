//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `WhError` via `#[from]`
//! where a core failure can surface through them.

use thiserror::Error;

use crate::Coord;

/// The top-level error type for `wh-core`.
#[derive(Debug, Error)]
pub enum WhError {
    #[error("coordinate {0} is outside the grid")]
    InvalidCoordinate(Coord),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `wh-*` crates.
pub type WhResult<T> = Result<T, WhError>;
