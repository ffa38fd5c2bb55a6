//! tabula-core - Sheet model: cells, dependency graph and cache invalidation.

pub mod cell;
pub mod error;
pub mod sheet;

pub use cell::{Cell, CellContent, ESCAPE_SIGN, FORMULA_SIGN};
pub use error::{Result, SheetError};
pub use sheet::{CellView, Sheet};

pub use tabula_engine::engine::{ErrorKind, GridBounds, Position, Size, Value};
