//! Cell positions, grid extents and grid bounds.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates.
//!
//! # Examples
//!
//! ```
//! use tabula_engine::engine::Position;
//!
//! let pos = Position::from_a1("B3").unwrap();
//! assert_eq!(pos.col, 1); // 0-indexed
//! assert_eq!(pos.row, 2);
//! assert_eq!(pos.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::FormulaError;

/// Default number of rows and columns a sheet accepts.
pub const DEFAULT_MAX_ROWS: usize = 16384;
pub const DEFAULT_MAX_COLS: usize = 16384;

/// A cell position (0-indexed). Orders by row, then column.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// Whether this position lies inside `bounds`.
    pub fn is_valid(&self, bounds: GridBounds) -> bool {
        self.row < bounds.max_rows && self.col < bounds.max_cols
    }

    /// Parse a position from spreadsheet notation (e.g., "A1", "b2", "AA10").
    /// Returns None if the input is invalid or does not fit in `usize`.
    pub fn from_a1(name: &str) -> Option<Position> {
        let caps = a1_re().captures(name)?;
        // Letters are bijective base 26: A = 1, Z = 26, AA = 27.
        let col = caps["letters"]
            .bytes()
            .try_fold(0usize, |acc, letter| {
                let digit = usize::from(letter.to_ascii_uppercase() - b'A') + 1;
                acc.checked_mul(26)?.checked_add(digit)
            })?
            .checked_sub(1)?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(Position::new(row, col))
    }

    /// Column letters for a 0-indexed column (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut letters = Vec::new();
        let mut rest = col;
        loop {
            letters.push(b'A' + (rest % 26) as u8);
            rest /= 26;
            if rest == 0 {
                break;
            }
            rest -= 1;
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("A1 position regex must compile")
    })
}

impl FromStr for Position {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_a1(s).ok_or_else(|| FormulaError::InvalidPosition(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Widened so the last row still prints.
        let row_number = u128::from(self.row as u64) + 1;
        f.write_str(&Position::col_to_letters(self.col))?;
        write!(f, "{}", row_number)
    }
}

/// Extent of a rectangular area of the grid, counted from A1.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

impl Size {
    pub fn new(rows: usize, cols: usize) -> Size {
        Size { rows, cols }
    }
}

/// Upper bounds (exclusive) on the positions a sheet accepts.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridBounds {
    pub max_rows: usize,
    pub max_cols: usize,
}

impl GridBounds {
    pub fn new(max_rows: usize, max_cols: usize) -> GridBounds {
        GridBounds { max_rows, max_cols }
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        GridBounds {
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
        }
    }
}
