//! Sample map parsing and validation
//!
//! A sample is a fully specified rectangular grid of tiles. Text samples use one
//! symbol per cell; whitespace is ignored and symbols are case-insensitive.

use crate::analysis::rules::{AdjacencyRule, RuleIndex, infer_rules};
use crate::analysis::weights::TileWeights;
use crate::io::error::{AlgorithmError, ErrorContext, Result, WithContext, invalid_sample};
use crate::spatial::tiles::Tile;
use ndarray::Array2;
use std::path::Path;

/// Validated sample grid (rows, cols) with at least one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGrid {
    tiles: Array2<Tile>,
}

/// Everything learned from a sample that the solver reads
///
/// Immutable after construction and safe to share between solves.
#[derive(Debug, Clone)]
pub struct LearnedModel {
    /// Deduplicated rules sorted by (self, neighbor, direction)
    pub rules: Vec<AdjacencyRule>,
    /// Lookup from (direction, value) to permitted neighbor values
    pub index: RuleIndex,
    /// Occurrence count of every value
    pub weights: TileWeights,
}

impl SampleGrid {
    /// Build from rows of tiles
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, a row is empty, or rows differ in length
    pub fn from_rows(rows: &[Vec<Tile>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(invalid_sample(&"sample must have at least one row and one column"));
        }

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(invalid_sample(&format!(
                "row {} has {} cells, expected {width}",
                index + 1,
                row.len()
            )));
        }

        let flat: Vec<Tile> = rows.iter().flatten().copied().collect();
        let tiles = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| invalid_sample(&e))?;
        Ok(Self { tiles })
    }

    /// Parse a text sample, one line per row
    ///
    /// Blank lines are skipped, as is whitespace within a line.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::UnrecognizedSymbol`] for a symbol outside the
    /// alphabet, or [`AlgorithmError::InvalidSampleData`] for a non-rectangular sample
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_index, line) in text.lines().enumerate() {
            let row = parse_row(line).with_context(ErrorContext {
                line: Some(line_index + 1),
                ..Default::default()
            })?;
            if !row.is_empty() {
                rows.push(row);
            }
        }
        Self::from_rows(&rows)
    }

    /// Read and parse a text sample from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read sample",
            source: e,
        })?;
        Self::parse(&text)
    }

    /// Underlying tile array
    pub const fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Learn rules, their index and the weight table from this sample
    pub fn learn(&self) -> LearnedModel {
        let rules = infer_rules(&self.tiles);
        let index = RuleIndex::from_rules(&rules);
        let weights = TileWeights::from_grid(&self.tiles);
        LearnedModel {
            rules,
            index,
            weights,
        }
    }
}

fn parse_row(line: &str) -> Result<Vec<Tile>> {
    line.chars()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_whitespace())
        .map(|(index, symbol)| {
            Tile::from_symbol(symbol).ok_or(AlgorithmError::UnrecognizedSymbol {
                symbol,
                line: 0,
                column: index + 1,
            })
        })
        .collect()
}
