//! Fluent builder for constructing a [`SimulationEngine`].

use tracing::info;
use wh_core::SimConfig;
use wh_spatial::{Grid, PathFinder};

use crate::engine::check_grid;
use crate::{NoopObserver, SimObserver, SimResult, SimulationEngine};

/// Fluent builder for [`SimulationEngine<P, O>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: grid size, start cell, timer intervals, seed
/// - `P: PathFinder`: the path oracle (e.g. [`wh_spatial::AStarFinder`])
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                  |
/// |------------------|------------------------------------------|
/// | `.grid(g)`       | `Grid::generate_default(size, start)`    |
/// | `.observer(o)`   | [`NoopObserver`]                         |
///
/// # Example
///
/// ```rust,ignore
/// let engine = SimBuilder::new(config, AStarFinder)
///     .grid(saved_layout)
///     .observer(TraceObserver::new(writer))
///     .build()?;
/// ```
pub struct SimBuilder<P: PathFinder, O: SimObserver = NoopObserver> {
    config:   SimConfig,
    finder:   P,
    grid:     Option<Grid>,
    observer: O,
}

impl<P: PathFinder> SimBuilder<P, NoopObserver> {
    pub fn new(config: SimConfig, finder: P) -> Self {
        Self { config, finder, grid: None, observer: NoopObserver }
    }
}

impl<P: PathFinder, O: SimObserver> SimBuilder<P, O> {
    /// Start from a saved or hand-built layout instead of the stock one.
    ///
    /// Its size and start cell must match the configuration.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Attach an observer, replacing any previous one.
    pub fn observer<O2: SimObserver>(self, observer: O2) -> SimBuilder<P, O2> {
        SimBuilder {
            config: self.config,
            finder: self.finder,
            grid:   self.grid,
            observer,
        }
    }

    /// Validate the configuration and layout and return an idle engine in
    /// simulate mode with the agent at the start.
    pub fn build(self) -> SimResult<SimulationEngine<P, O>> {
        self.config.validate()?;

        let grid = match self.grid {
            Some(g) => {
                check_grid(&self.config, &g)?;
                g
            }
            None => Grid::generate_default(self.config.grid_size, self.config.start),
        };
        info!(
            size = grid.size(),
            shelves = grid.shelf_count(),
            start = %grid.start(),
            seed = self.config.seed,
            "simulation engine built"
        );

        Ok(SimulationEngine::new(self.config, grid, self.finder, self.observer))
    }
}
