//! tabula - In-memory spreadsheet engine.
//!
//! A [`Sheet`] is a sparse grid of cells holding text or formulas. Formula
//! values are computed on demand and cached; every edit invalidates exactly
//! the cells whose value could depend on it, and edits that would make a
//! formula depend on itself are rejected before anything changes.
//!
//! ```
//! use tabula::{Position, Sheet, Value};
//!
//! let mut sheet = Sheet::new();
//! let a1 = Position::from_a1("A1").unwrap();
//! let a2 = Position::from_a1("A2").unwrap();
//!
//! sheet.set_cell(a1, "1").unwrap();
//! sheet.set_cell(a2, "=A1+3").unwrap();
//! assert_eq!(sheet.get_cell(a2).unwrap().unwrap().value(), Value::Number(4.0));
//!
//! sheet.set_cell(a1, "10").unwrap();
//! assert_eq!(sheet.get_cell(a2).unwrap().unwrap().value(), Value::Number(13.0));
//! ```

pub use tabula_core::{
    Cell, CellContent, CellView, ESCAPE_SIGN, FORMULA_SIGN, Result, Sheet, SheetError,
};
pub use tabula_engine::FormulaError;
pub use tabula_engine::engine::{
    CellLookup, ErrorKind, Formula, GridBounds, Position, Size, Value,
};
