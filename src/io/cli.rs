//! Command-line interface: learn from a sample, generate, render and export

use crate::algorithm::executor::{Solver, SolverConfig};
use crate::algorithm::propagation::PropagationMode;
use crate::analysis::patterns::{LearnedModel, SampleGrid};
use crate::io::configuration::{
    CELL_PIXELS, DEFAULT_ATTEMPTS, DEFAULT_HEIGHT, DEFAULT_SAMPLE, DEFAULT_SEED, DEFAULT_WIDTH,
    GIF_FRAME_DELAY_MS,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::export_tiles_as_png;
use crate::io::progress::ProgressManager;
use crate::io::render::{TextStyle, render_rule, render_superpositions, render_tiles};
use crate::io::visualization::VisualizationCapture;
use crate::spatial::tiles::Tile;
use clap::Parser;
use ndarray::Array2;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "simpletiled")]
#[command(
    author,
    version,
    about = "Generate tile maps from a sample using wave function collapse"
)]
/// Command-line arguments for the map generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Text sample file, one symbol per cell (s = sea, c = coast, l = land)
    #[arg(value_name = "SAMPLE")]
    pub sample: Option<PathBuf>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of columns to generate
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Number of rows to generate
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Solves to attempt, each with the next seed, before giving up on contradictions
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Propagate from every resolved cell, not only from collapsed ones
    #[arg(short, long)]
    pub cascade: bool,

    /// Print the learned rules and weights
    #[arg(short, long)]
    pub rules: bool,

    /// Export the generated map as a PNG image
    #[arg(short, long, value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Export the solve as an animated GIF
    #[arg(short, long, value_name = "GIF")]
    pub visualize: Option<PathBuf>,

    /// Suppress progress and diagnostic output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print symbols without terminal colors
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Text style for rendered grids
    pub const fn text_style(&self) -> TextStyle {
        if self.no_color {
            TextStyle::Plain
        } else {
            TextStyle::Ansi
        }
    }

    /// Solver configuration from the size and propagation flags
    pub const fn solver_config(&self) -> SolverConfig {
        let mode = if self.cascade {
            PropagationMode::Cascade
        } else {
            PropagationMode::SingleHop
        };
        SolverConfig::new(self.width, self.height).with_mode(mode)
    }

    /// Seed used by the given zero-based attempt
    pub const fn attempt_seed(&self, attempt: usize) -> u64 {
        self.seed.wrapping_add(attempt as u64)
    }
}

/// Outcome of a successful generation
pub struct Generation {
    /// The resolved map
    pub tiles: Array2<Tile>,
    /// Seed of the attempt that succeeded
    pub seed: u64,
    /// Number of attempts used, successful one included
    pub attempts: usize,
    /// Captured frames when visualization was requested
    pub visualization: Option<VisualizationCapture>,
}

/// Orchestrates sample loading, rule learning, retries and export
pub struct Generator {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Generator {
    /// Create a new generator with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the whole pipeline and print the results
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is invalid, every attempt contradicts, or
    /// an export fails
    pub fn process(&mut self) -> Result<()> {
        let sample = self.load_sample()?;
        let model = sample.learn();
        self.print_model(&sample, &model);

        let generation = self.generate(&model)?;
        self.print_result(&generation);

        if let Some(ref path) = self.cli.output {
            export_tiles_as_png(&generation.tiles, path, CELL_PIXELS)?;
        }
        if let (Some(path), Some(capture)) = (&self.cli.visualize, &generation.visualization) {
            capture.export_gif(path, GIF_FRAME_DELAY_MS, CELL_PIXELS)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Parse the sample file, or the built-in sample when none was given
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_sample(&self) -> Result<SampleGrid> {
        match self.cli.sample {
            Some(ref path) => SampleGrid::from_file(path),
            None => SampleGrid::parse(DEFAULT_SAMPLE),
        }
    }

    /// Solve with successive seeds until one attempt resolves
    ///
    /// Only contradictions are retried; any other error ends generation.
    ///
    /// # Errors
    ///
    /// Returns the last contradiction once all attempts are spent
    pub fn generate(&mut self, model: &LearnedModel) -> Result<Generation> {
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"must be at least 1",
            ));
        }
        let config = self.cli.solver_config();
        config.validate()?;

        let mut last_error = None;
        for attempt in 0..self.cli.attempts {
            let seed = self.cli.attempt_seed(attempt);
            match self.run_attempt(model, config, attempt + 1, seed) {
                Ok((tiles, visualization)) => {
                    return Ok(Generation {
                        tiles,
                        seed,
                        attempts: attempt + 1,
                        visualization,
                    });
                }
                Err(error) if error.is_contradiction() => {
                    self.report_contradiction(&error, seed);
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            invalid_parameter("attempts", &self.cli.attempts, &"no attempt was run")
        }))
    }

    fn run_attempt(
        &mut self,
        model: &LearnedModel,
        config: SolverConfig,
        attempt: usize,
        seed: u64,
    ) -> Result<(Array2<Tile>, Option<VisualizationCapture>)> {
        let start_time = Instant::now();
        let mut solver = Solver::new(model, config, seed)?;
        if self.cli.visualize.is_some() {
            solver.enable_visualization();
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_attempt(attempt, seed, solver.grid_state.cell_count());
        }

        let outcome = self.drive(&mut solver, start_time);

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_attempt(outcome.is_ok());
        }

        let tiles = outcome?;
        Ok((tiles, solver.visualization.take()))
    }

    fn drive(&self, solver: &mut Solver<'_>, start_time: Instant) -> Result<Array2<Tile>> {
        while solver.step()? {
            if let Some(ref pm) = self.progress_manager {
                pm.update(solver.grid_state.resolved_count(), start_time.elapsed());
            }
        }
        solver.result()
    }

    fn log(&self, message: &str) {
        if let Some(ref pm) = self.progress_manager {
            pm.log(message);
        }
    }

    fn report_contradiction(&self, error: &AlgorithmError, seed: u64) {
        let AlgorithmError::Contradiction(report) = error else {
            return;
        };
        self.log(&format!(
            "seed {seed}: contradiction at ({}, {}) after {} collapses: direction {}, value {}",
            report.row, report.col, report.iteration, report.direction, report.tile
        ));
        self.log(&render_superpositions(
            &report.snapshot,
            self.cli.text_style(),
        ));
    }

    // Allow print for the generated output itself
    #[allow(clippy::print_stdout)]
    fn print_model(&self, sample: &SampleGrid, model: &LearnedModel) {
        let style = self.cli.text_style();
        println!("=== Sample ===");
        println!("{}", render_tiles(sample.tiles(), style));

        if self.cli.rules {
            println!("=== Rules ({}) ===", model.rules.len());
            for rule in &model.rules {
                println!("{} {rule}", render_rule(rule, style));
            }
            println!("Weights: {}", model.weights);
        }
    }

    // Allow print for the generated output itself
    #[allow(clippy::print_stdout)]
    fn print_result(&self, generation: &Generation) {
        if generation.attempts > 1 {
            self.log(&format!(
                "resolved on attempt {} with seed {}",
                generation.attempts, generation.seed
            ));
        }
        println!("=== Generated ===");
        println!("{}", render_tiles(&generation.tiles, self.cli.text_style()));
    }
}
