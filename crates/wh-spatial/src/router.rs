//! Path-finding trait and the default A* implementation.
//!
//! # Pluggability
//!
//! `wh-route` and `wh-sim` query paths through the [`PathFinder`] trait, so a
//! host can swap in another search without touching either crate.  The
//! default [`AStarFinder`] is what the route optimizer's exactness guarantee
//! is stated against.
//!
//! # Failure signalling
//!
//! A path finder never errors.  "No path" (goal is a shelf, goal unreachable,
//! or a coordinate off the grid) is an empty [`Path`]; callers must check
//! `is_empty()` before walking it.

use wh_core::Coord;

use crate::Grid;

/// Coordinates from start to goal inclusive.  Empty means "no path".
pub type Path = Vec<Coord>;

/// Number of moves needed to walk `path` (one fewer than its length).
#[inline]
pub fn step_count(path: &[Coord]) -> usize {
    path.len().saturating_sub(1)
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable single-pair shortest-path search.
///
/// Implementations must be pure functions of `(grid, start, goal)`: the
/// route optimizer caches results and the engine re-queries legs, and both
/// rely on getting the same answer for the same inputs.
pub trait PathFinder: Send + Sync {
    /// Shortest path from `start` to `goal`, or an empty path.
    fn find_path(&self, grid: &Grid, start: Coord, goal: Coord) -> Path;
}

// ── AStarFinder ───────────────────────────────────────────────────────────────

/// A* over the 4-connected grid with unit step cost and a Manhattan
/// heuristic.
///
/// The output is fully deterministic, including which of several
/// equal-length paths is returned:
///
/// - the open set is a plain list scanned left to right, and the **first**
///   node with the lowest `f` is expanded (no coordinate tie-break);
/// - neighbours are expanded Up, Right, Down, Left;
/// - a node's cost and parent are only replaced on a strictly better `g`.
///
/// The linear scan makes each expansion O(open set), which is irrelevant at
/// warehouse-grid sizes and is what pins the path shape.
pub struct AStarFinder;

impl PathFinder for AStarFinder {
    fn find_path(&self, grid: &Grid, start: Coord, goal: Coord) -> Path {
        astar(grid, start, goal)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Search-local node record.  One per grid cell, built fresh per query.
#[derive(Clone)]
struct PathNode {
    coord:       Coord,
    is_obstacle: bool,
    g:           u32,
    h:           u32,
    f:           u32,
    parent:      Option<usize>,
}

fn astar(grid: &Grid, start: Coord, goal: Coord) -> Path {
    let (Some(start_idx), Some(goal_idx)) = (grid.index_of(start), grid.index_of(goal)) else {
        return Vec::new();
    };

    let mut nodes: Vec<PathNode> = grid
        .cells()
        .map(|cell| PathNode {
            coord:       cell.coord(),
            is_obstacle: cell.is_shelf,
            g:           0,
            h:           0,
            f:           0,
            parent:      None,
        })
        .collect();

    if nodes[goal_idx].is_obstacle {
        return Vec::new();
    }

    let n = nodes.len();
    // Open set in insertion order; removal preserves the order of the rest.
    let mut open: Vec<usize> = vec![start_idx];
    let mut in_open = vec![false; n];
    let mut closed = vec![false; n];
    in_open[start_idx] = true;

    while !open.is_empty() {
        let mut lowest = 0;
        for (i, &idx) in open.iter().enumerate() {
            if nodes[idx].f < nodes[open[lowest]].f {
                lowest = i;
            }
        }
        let current = open[lowest];

        if current == goal_idx {
            return reconstruct(&nodes, current);
        }

        open.remove(lowest);
        in_open[current] = false;
        closed[current] = true;

        let tentative_g = nodes[current].g + 1;
        for neighbor in nodes[current].coord.neighbors4() {
            let Some(ni) = grid.index_of(neighbor) else {
                continue;
            };
            if closed[ni] || nodes[ni].is_obstacle {
                continue;
            }

            let improved = if in_open[ni] {
                tentative_g < nodes[ni].g
            } else {
                open.push(ni);
                in_open[ni] = true;
                true
            };

            if improved {
                let node = &mut nodes[ni];
                node.g = tentative_g;
                node.h = neighbor.manhattan(goal);
                node.f = node.g + node.h;
                node.parent = Some(current);
            }
        }
    }

    Vec::new()
}

fn reconstruct(nodes: &[PathNode], goal_idx: usize) -> Path {
    let mut path = Vec::new();
    let mut cur = Some(goal_idx);
    while let Some(idx) = cur {
        path.push(nodes[idx].coord);
        cur = nodes[idx].parent;
    }
    path.reverse();
    path
}
