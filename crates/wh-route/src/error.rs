use thiserror::Error;
use wh_core::Coord;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no ordering of {targets} targets yields a complete route")]
    NoFeasibleRoute { targets: usize },

    #[error("target {to} is unreachable from {from}")]
    UnreachableTarget { from: Coord, to: Coord },
}

pub type RouteResult<T> = Result<T, RouteError>;
