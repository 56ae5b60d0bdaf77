//! Tile alphabet and compass directions
//!
//! The alphabet is closed: every cell of a sample or generated map holds exactly
//! one of the [`Tile`] values. Ordinals index the rule and weight tables; the
//! order candidates are walked in during weighted collapse is
//! [`Tile::COLLAPSE_ORDER`].

use crate::io::error::{AlgorithmError, Result};
use std::fmt;

/// A distinguishable cell value
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    /// Open water
    Sea,
    /// Shoreline between sea and land
    Coast,
    /// Dry land
    Land,
}

impl Tile {
    /// Number of values in the alphabet
    pub const COUNT: usize = 3;

    /// Every tile in ordinal order
    pub const ALL: [Self; Self::COUNT] = [Self::Sea, Self::Coast, Self::Land];

    /// Order in which weighted collapse walks candidates
    ///
    /// The inclusive draw gives the first candidate one extra draw value, so
    /// this order decides where that bias lands.
    pub const COLLAPSE_ORDER: [Self; Self::COUNT] = [Self::Sea, Self::Land, Self::Coast];

    /// Position of this tile in [`Tile::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Tile::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a single sample symbol (case-insensitive)
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            's' => Some(Self::Sea),
            'c' => Some(Self::Coast),
            'l' => Some(Self::Land),
            _ => None,
        }
    }

    /// Lowercase symbol used in samples and text output
    pub const fn symbol(self) -> char {
        match self {
            Self::Sea => 's',
            Self::Coast => 'c',
            Self::Land => 'l',
        }
    }

    /// Display color as RGBA
    pub const fn color(self) -> [u8; 4] {
        match self {
            Self::Sea => [0x00, 0x00, 0xFF, 0xFF],
            Self::Coast => [0xF0, 0xF0, 0x33, 0xFF],
            Self::Land => [0x00, 0xFF, 0x00, 0xFF],
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sea => "SEA",
            Self::Coast => "COAST",
            Self::Land => "LAND",
        };
        f.write_str(name)
    }
}

/// One of the four compass directions on the grid
///
/// Rules are learned independently per direction; no inverse is ever derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Towards the previous row
    Up,
    /// Towards the next row
    Down,
    /// Towards the next column
    Right,
    /// Towards the previous column
    Left,
}

impl Direction {
    /// Number of directions
    pub const COUNT: usize = 4;

    /// Every direction in ordinal order
    pub const ALL: [Self; Self::COUNT] = [Self::Up, Self::Down, Self::Right, Self::Left];

    /// Order in which a resolved cell filters its neighbors
    ///
    /// Propagation stops at the first emptied neighbor, so this decides which
    /// one a contradiction names.
    pub const PROPAGATION_ORDER: [Self; Self::COUNT] =
        [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Position of this direction in [`Direction::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse a compass symbol (`n`, `s`, `e`, `w`, case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::UnrecognizedSymbol`] for anything else
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol.to_ascii_lowercase() {
            'n' => Ok(Self::Up),
            's' => Ok(Self::Down),
            'e' => Ok(Self::Right),
            'w' => Ok(Self::Left),
            _ => Err(AlgorithmError::UnrecognizedSymbol {
                symbol,
                line: 0,
                column: 0,
            }),
        }
    }

    /// Row and column offset of the neighbor in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Right => (0, 1),
            Self::Left => (0, -1),
        }
    }

    /// Neighbor of `(row, col)` in this direction, if it lies inside `dimensions`
    pub fn step(self, row: usize, col: usize, dimensions: (usize, usize)) -> Option<(usize, usize)> {
        let (dr, dc) = self.offset();
        let next_row = row.checked_add_signed(dr)?;
        let next_col = col.checked_add_signed(dc)?;
        (next_row < dimensions.0 && next_col < dimensions.1).then_some((next_row, next_col))
    }

    /// Single-letter label used by the text renderer
    pub const fn label(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Right => 'R',
            Self::Left => 'L',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Right => "RIGHT",
            Self::Left => "LEFT",
        };
        f.write_str(name)
    }
}
