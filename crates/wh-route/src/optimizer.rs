//! Exact route optimizer.
//!
//! # Algorithm
//!
//! ```text
//! nodes = [start, t1, …, tN, end]
//! ① legs      — PathFinder path for every ordered pair (i, j), i ≠ j
//! ② enumerate — every permutation of 1..=N (Heap's order)
//! ③ cost      — Σ steps over start → perm… → end; any empty leg disqualifies
//! ④ select    — strictly smaller cost replaces the incumbent
//! ⑤ stitch    — first leg whole, later legs minus their first point
//! ```
//!
//! Pairs are keyed by node *index*, not coordinate, so duplicate targets
//! (two picks at the same face) are simply two nodes joined by a
//! single-point leg.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use wh_core::Coord;
use wh_spatial::{step_count, Grid, Path, PathFinder};

use crate::{factorial, HeapPermutations, RouteError, RouteResult};

/// Target count beyond which the factorial enumeration stops being
/// interactive.  Larger orders are still solved exactly, with a warning.
pub const PRACTICAL_TARGET_LIMIT: usize = 8;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The optimized visiting order for one pick order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    /// Targets in the order they should be visited.
    pub ordered_targets: Vec<Coord>,
    /// Continuous start → … → end path with no repeated junction points.
    pub full_path: Path,
    /// Moves along `full_path`.
    pub total_steps: usize,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` if there is nothing to visit.
    pub fn is_empty(&self) -> bool {
        self.ordered_targets.is_empty()
    }
}

// ── LegTable ──────────────────────────────────────────────────────────────────

/// Pairwise leg paths between the nodes of one solve.
///
/// Node 0 is the start, nodes `1..=N` the targets, node `N + 1` the end.
pub struct LegTable {
    nodes: Vec<Coord>,
    legs:  FxHashMap<(usize, usize), Path>,
}

impl LegTable {
    /// Run the path finder for every ordered pair of distinct nodes.
    pub fn build<P: PathFinder + ?Sized>(
        finder:  &P,
        grid:    &Grid,
        start:   Coord,
        targets: &[Coord],
        end:     Coord,
    ) -> Self {
        let mut nodes = Vec::with_capacity(targets.len() + 2);
        nodes.push(start);
        nodes.extend_from_slice(targets);
        nodes.push(end);

        let n = nodes.len();
        let mut legs = FxHashMap::default();
        legs.reserve(n * (n - 1));
        for (i, &from) in nodes.iter().enumerate() {
            for (j, &to) in nodes.iter().enumerate() {
                if i != j {
                    legs.insert((i, j), finder.find_path(grid, from, to));
                }
            }
        }
        Self { nodes, legs }
    }

    pub fn node(&self, idx: usize) -> Coord {
        self.nodes[idx]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Cached path from node `from` to node `to` (empty if unreachable).
    pub fn leg(&self, from: usize, to: usize) -> &[Coord] {
        self.legs.get(&(from, to)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Full node sequence `start → order… → end`.
    pub fn sequence(&self, order: &[usize]) -> Vec<usize> {
        let mut seq = Vec::with_capacity(order.len() + 2);
        seq.push(0);
        seq.extend_from_slice(order);
        seq.push(self.nodes.len() - 1);
        seq
    }

    /// Total steps for visiting targets in `order`, or `None` if any leg is
    /// unreachable.
    pub fn order_cost(&self, order: &[usize]) -> Option<usize> {
        self.sequence(order)
            .windows(2)
            .map(|w| {
                let leg = self.leg(w[0], w[1]);
                (!leg.is_empty()).then(|| step_count(leg))
            })
            .sum()
    }

    /// Concatenate the legs of `order`, dropping each later leg's first
    /// point (it equals the previous leg's last point).
    pub fn stitch(&self, order: &[usize]) -> Path {
        let mut path = Path::new();
        for (k, w) in self.sequence(order).windows(2).enumerate() {
            let leg = self.leg(w[0], w[1]);
            let skip = if k == 0 { 0 } else { 1 };
            path.extend(leg.iter().skip(skip).copied());
        }
        path
    }
}

// ── RouteOptimizer ────────────────────────────────────────────────────────────

/// Exact multi-stop solver backed by a [`PathFinder`] distance oracle.
pub struct RouteOptimizer<'f, P: PathFinder + ?Sized> {
    finder: &'f P,
}

impl<'f, P: PathFinder + ?Sized> RouteOptimizer<'f, P> {
    pub fn new(finder: &'f P) -> Self {
        Self { finder }
    }

    /// Shortest route from `start` through every target to `end`.
    ///
    /// With no targets the result is [`Route::empty`].  Ties between
    /// orderings of equal length go to the one enumerated first.
    ///
    /// # Errors
    /// `NoFeasibleRoute` if every ordering contains an unreachable leg.  No
    /// partial route is returned.
    pub fn solve(
        &self,
        grid:    &Grid,
        start:   Coord,
        targets: &[Coord],
        end:     Coord,
    ) -> RouteResult<Route> {
        if targets.is_empty() {
            return Ok(Route::empty());
        }
        if targets.len() > PRACTICAL_TARGET_LIMIT {
            warn!(
                targets = targets.len(),
                orderings = factorial(targets.len()),
                "exact route solve above the practical target limit"
            );
        }

        let table = LegTable::build(self.finder, grid, start, targets, end);

        let mut best: Option<(usize, Vec<usize>)> = None;
        let mut evaluated = 0u64;
        for order in HeapPermutations::new((1..=targets.len()).collect()) {
            evaluated += 1;
            let Some(cost) = table.order_cost(&order) else {
                continue;
            };
            if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
                best = Some((cost, order));
            }
        }

        let (total_steps, order) = best.ok_or(RouteError::NoFeasibleRoute {
            targets: targets.len(),
        })?;
        debug!(targets = targets.len(), evaluated, total_steps, "route solved");

        Ok(Route {
            ordered_targets: order.iter().map(|&i| table.node(i)).collect(),
            full_path: table.stitch(&order),
            total_steps,
        })
    }

    /// Path for one leg of a run, re-queried at walk time.
    ///
    /// # Errors
    /// `UnreachableTarget` if the path finder returns an empty path.
    pub fn leg(&self, grid: &Grid, from: Coord, to: Coord) -> RouteResult<Path> {
        let path = self.finder.find_path(grid, from, to);
        if path.is_empty() {
            return Err(RouteError::UnreachableTarget { from, to });
        }
        Ok(path)
    }
}
