//! Error types and context management for rule learning and solving

use crate::algorithm::bitset::Superposition;
use crate::spatial::tiles::{Direction, Tile};
use ndarray::Array2;
use std::fmt;
use std::path::PathBuf;

/// Full context of a propagation that emptied a neighbor's superposition
#[derive(Debug, Clone)]
pub struct ContradictionReport {
    /// Row of the neighbor left without candidates
    pub row: usize,
    /// Column of the neighbor left without candidates
    pub col: usize,
    /// Direction from the propagating cell to the neighbor
    pub direction: Direction,
    /// Value of the propagating cell
    pub tile: Tile,
    /// Solver iteration when the contradiction occurred
    pub iteration: usize,
    /// Superposition grid at failure time, offending cell included
    pub snapshot: Array2<Superposition>,
}

/// Main error type for all algorithm operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Sample grid is not a non-empty rectangle
    InvalidSampleData {
        /// Description of what's wrong with the sample
        reason: String,
    },

    /// Sample text contains a symbol outside the alphabet
    UnrecognizedSymbol {
        /// The offending character
        symbol: char,
        /// 1-based line in the sample text (0 when not parsed from text)
        line: usize,
        /// 1-based column in the sample text (0 when not parsed from text)
        column: usize,
    },

    /// A core function was handed a superposition with no candidates
    ///
    /// This is an internal invariant violation and is fatal to the solve
    EmptySuperposition {
        /// Name of the operation that received it
        operation: &'static str,
    },

    /// The weighted walk finished without selecting a candidate
    CollapseFailed {
        /// The random draw
        draw: u64,
        /// Total weight of the superposition
        total: u64,
    },

    /// Propagation reduced a neighbor to the empty set
    Contradiction(Box<ContradictionReport>),

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl AlgorithmError {
    /// Whether a fresh solve with another seed could succeed
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction(_))
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSampleData { reason } => {
                write!(f, "Invalid sample data: {reason}")
            }
            Self::UnrecognizedSymbol {
                symbol,
                line,
                column,
            } => {
                write!(
                    f,
                    "Unrecognized symbol '{symbol}' at line {line}, column {column}"
                )
            }
            Self::EmptySuperposition { operation } => {
                write!(f, "Empty superposition passed to {operation}")
            }
            Self::CollapseFailed { draw, total } => {
                write!(
                    f,
                    "Weighted collapse selected nothing (draw {draw} of total {total})"
                )
            }
            Self::Contradiction(report) => {
                write!(
                    f,
                    "Contradiction at row {}, column {} (iteration {}): no candidate allowed {} of {}",
                    report.row, report.col, report.iteration, report.direction, report.tile
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorContext {
    /// Current solver iteration
    pub iteration: Option<usize>,
    /// Text position of the sample line being parsed
    pub line: Option<usize>,
}

/// Enriches error messages with algorithm state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the iteration context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration applied
    fn with_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                AlgorithmError::Contradiction(report) => {
                    if let Some(iteration) = context.iteration {
                        report.iteration = iteration;
                    }
                }
                AlgorithmError::UnrecognizedSymbol { line, .. } => {
                    if let Some(text_line) = context.line {
                        *line = text_line;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_iteration(self, iteration: usize) -> Result<T> {
        self.with_context(ErrorContext {
            iteration: Some(iteration),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid sample error
pub fn invalid_sample(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidSampleData {
        reason: reason.to_string(),
    }
}
