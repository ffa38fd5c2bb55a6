//! Formula engine API.
//!
//! This module provides everything a sheet needs from its formula language:
//!
//! - [`Position`], [`Size`], [`GridBounds`] - Cell coordinates (A1 notation ↔ row/col) and extents
//! - [`Value`], [`ErrorKind`] - Results of evaluating a cell
//! - [`Formula`] - Parse formula text, render it canonically, list referenced cells
//! - [`CellLookup`] - The read-only view of a grid that formulas evaluate against

mod ast;
mod eval;
mod formula;
mod lexer;
mod parser;
mod position;
mod value;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use eval::CellLookup;
pub use formula::Formula;
pub use position::{DEFAULT_MAX_COLS, DEFAULT_MAX_ROWS, GridBounds, Position, Size};
pub use value::{ErrorKind, Value};
