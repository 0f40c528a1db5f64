use thiserror::Error;
use wh_core::WhError;
use wh_route::RouteError;
use wh_spatial::SpatialError;

use crate::Mode;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("operation requires {expected} mode, engine is in {actual} mode")]
    WrongMode { expected: Mode, actual: Mode },

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] WhError),

    #[error("grid error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("route error: {0}")]
    Route(#[from] RouteError),
}

pub type SimResult<T> = Result<T, SimError>;
