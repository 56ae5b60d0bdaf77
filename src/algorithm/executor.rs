use crate::{
    algorithm::bitset::Superposition,
    algorithm::propagation::{PropagationMode, PropagationQueue, cascade, propagate_from},
    algorithm::selection::select_position,
    analysis::patterns::LearnedModel,
    analysis::weights::TileWeights,
    io::configuration::MAX_GRID_DIMENSION,
    io::error::{AlgorithmError, Result, WithContext, invalid_parameter},
    io::visualization::VisualizationCapture,
    math::probability::weighted_walk,
    spatial::GridState,
    spatial::tiles::Tile,
};
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Target size and propagation behavior of one solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Number of columns to generate
    pub width: usize,
    /// Number of rows to generate
    pub height: usize,
    /// How far constraints travel after a collapse
    pub mode: PropagationMode,
}

impl SolverConfig {
    /// Create a single-hop configuration
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            mode: PropagationMode::SingleHop,
        }
    }

    /// Same size with another propagation mode
    #[must_use]
    pub const fn with_mode(mut self, mode: PropagationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check both dimensions are positive and within [`MAX_GRID_DIMENSION`]
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::InvalidParameter`] naming the offending dimension
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(())
    }
}

/// Seeded random source for reproducible collapses
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `0..=max`
    pub fn draw_inclusive(&mut self, max: u64) -> u64 {
        self.rng.random_range(0..=max)
    }
}

/// Reduce a superposition to one weighted-random candidate
///
/// Draws uniformly from `0..=total` and walks candidates in
/// [`Tile::COLLAPSE_ORDER`] (see [`weighted_walk`]). A resolved superposition
/// is returned unchanged without consuming randomness.
///
/// # Errors
///
/// Returns [`AlgorithmError::EmptySuperposition`] when there are no candidates and
/// [`AlgorithmError::CollapseFailed`] when the walk selects nothing, which only
/// happens if every candidate has zero weight
pub fn collapse(
    superposition: &Superposition,
    weights: &TileWeights,
    selector: &mut RandomSelector,
) -> Result<Superposition> {
    match superposition.count() {
        0 => Err(AlgorithmError::EmptySuperposition {
            operation: "collapse",
        }),
        1 => Ok(superposition.clone()),
        _ => {
            let total = weights.sum(superposition);
            let draw = selector.draw_inclusive(total);
            weighted_walk(
                Tile::COLLAPSE_ORDER
                    .into_iter()
                    .filter(|&tile| superposition.contains(tile))
                    .map(|tile| (tile, weights.weight(tile))),
                draw,
            )
            .map(Superposition::single)
            .ok_or(AlgorithmError::CollapseFailed { draw, total })
        }
    }
}

/// Lifecycle of a solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverState {
    /// Cells remain to be selected
    Unresolved,
    /// Every cell holds exactly one value
    Resolved,
    /// Propagation emptied a cell; terminal
    Contradicted,
}

/// Wave function collapse over a blank grid
///
/// Owns the superposition and entropy grids of one solve and borrows the
/// learned model read-only, so one model can drive any number of solvers.
pub struct Solver<'a> {
    /// Rules and weights learned from the sample
    pub model: &'a LearnedModel,
    /// Superpositions and entropy scores
    pub grid_state: GridState,
    /// Random number generator for weighted collapse
    pub random_selector: RandomSelector,
    /// Propagation behavior
    pub mode: PropagationMode,
    /// Number of collapses performed
    pub iteration: usize,
    /// Current lifecycle state
    pub state: SolverState,
    /// Most recently collapsed cell and its value
    pub last_collapse: Option<((usize, usize), Tile)>,
    /// Optional per-iteration snapshot capture
    pub visualization: Option<VisualizationCapture>,
    queue: PropagationQueue,
}

impl<'a> Solver<'a> {
    /// Create a solver over a fully uncertain grid
    ///
    /// Every cell starts with every value observed in the sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the model observed no
    /// values at all
    pub fn new(model: &'a LearnedModel, config: SolverConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let grid_state = GridState::new(
            config.height,
            config.width,
            &model.weights.observed(),
            &model.weights,
        )?;
        Ok(Self::from_grid_state(model, grid_state, config.mode, seed))
    }

    /// Create a solver over a prepared grid, e.g. one with seeded cells
    pub fn from_grid_state(
        model: &'a LearnedModel,
        grid_state: GridState,
        mode: PropagationMode,
        seed: u64,
    ) -> Self {
        let mut queue = PropagationQueue::new();
        if mode == PropagationMode::Cascade {
            queue.add_positions(
                grid_state
                    .superpositions
                    .indexed_iter()
                    .filter(|(_, superposition)| superposition.is_resolved())
                    .map(|(position, _)| position),
            );
        }

        Self {
            model,
            grid_state,
            random_selector: RandomSelector::new(seed),
            mode,
            iteration: 0,
            state: SolverState::Unresolved,
            last_collapse: None,
            visualization: None,
            queue,
        }
    }

    /// Start capturing a superposition snapshot after every iteration
    pub fn enable_visualization(&mut self) {
        let mut capture = VisualizationCapture::new();
        capture.record(&self.grid_state.superpositions);
        self.visualization = Some(capture);
    }

    /// Run one select, collapse, propagate iteration
    ///
    /// Returns `false` once nothing is left to do.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::Contradiction`] when propagation empties a cell,
    /// or an invariant violation from collapse. Either leaves the solver in
    /// [`SolverState::Contradicted`].
    pub fn step(&mut self) -> Result<bool> {
        if self.state != SolverState::Unresolved {
            return Ok(false);
        }

        let result = self.advance();
        match result {
            Ok(true) => {
                if let Some(capture) = self.visualization.as_mut() {
                    capture.record(&self.grid_state.superpositions);
                }
            }
            Ok(false) => self.state = SolverState::Resolved,
            Err(_) => self.state = SolverState::Contradicted,
        }
        result.with_iteration(self.iteration)
    }

    fn advance(&mut self) -> Result<bool> {
        let model = self.model;
        let weights = &model.weights;
        let rules = &model.index;

        if !self.queue.is_empty() {
            cascade(&mut self.grid_state, rules, weights, &mut self.queue)?;
        }

        let Some((row, col)) = select_position(&self.grid_state) else {
            return Ok(false);
        };
        self.iteration += 1;

        let current = self
            .grid_state
            .superposition(row, col)
            .cloned()
            .ok_or(AlgorithmError::EmptySuperposition {
                operation: "select",
            })?;
        let collapsed = collapse(&current, weights, &mut self.random_selector)?;
        let tile = collapsed
            .resolved_tile()
            .ok_or(AlgorithmError::EmptySuperposition {
                operation: "collapse",
            })?;
        self.grid_state
            .set_superposition(row, col, collapsed, weights)?;
        self.last_collapse = Some(((row, col), tile));

        match self.mode {
            PropagationMode::SingleHop => {
                propagate_from(&mut self.grid_state, rules, weights, (row, col), false)?;
            }
            PropagationMode::Cascade => {
                self.queue.add_positions([(row, col)]);
                cascade(&mut self.grid_state, rules, weights, &mut self.queue)?;
            }
        }

        Ok(true)
    }

    /// Step until resolved or contradicted
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Solver::step`]
    pub fn run(&mut self) -> Result<Array2<Tile>> {
        while self.step()? {}
        self.result()
    }

    /// The resolved grid
    ///
    /// # Errors
    ///
    /// Returns an error if any cell still has more than one candidate
    pub fn result(&self) -> Result<Array2<Tile>> {
        self.grid_state.resolved_tiles()
    }

    /// Current superpositions, for rendering
    pub const fn superpositions(&self) -> &Array2<Superposition> {
        &self.grid_state.superpositions
    }
}

/// Generate a `config.width` by `config.height` grid from a learned model
///
/// # Errors
///
/// Returns [`AlgorithmError::Contradiction`] if this seed leads to a dead end
pub fn solve(model: &LearnedModel, config: SolverConfig, seed: u64) -> Result<Array2<Tile>> {
    Solver::new(model, config, seed)?.run()
}
