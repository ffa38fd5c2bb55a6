//! Cell contents and the per-cell value cache.
//!
//! - [`CellContent`] - What the user typed, interpreted: empty, text or formula
//! - [`Cell`] - Content plus a lazily computed, invalidatable cached value
//!
//! A cell never touches the sheet's dependency graph. The sheet validates an
//! edit and updates its graph first, then installs a cell built from the
//! finished content.

use std::cell::RefCell;

use tabula_engine::FormulaError;
use tabula_engine::engine::{CellLookup, Formula, Position, Value};

/// Leading character that marks input as a formula.
pub const FORMULA_SIGN: char = '=';
/// Leading character that forces the rest of the input to be literal text.
pub const ESCAPE_SIGN: char = '\'';

/// The interpreted content of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Empty,
    Text { raw: String, escaped: bool },
    Formula { source: String, formula: Formula },
}

impl CellContent {
    /// Interpret user input.
    /// - Empty string -> Empty
    /// - Starts with '=' -> Formula (the rest must parse)
    /// - Starts with '\'' -> Text (without the apostrophe, escaped)
    /// - Otherwise -> Text, verbatim
    pub fn parse(input: &str) -> Result<CellContent, FormulaError> {
        if input.is_empty() {
            return Ok(CellContent::Empty);
        }

        if let Some(expression) = input.strip_prefix(FORMULA_SIGN) {
            let formula = Formula::parse(expression)?;
            return Ok(CellContent::Formula {
                source: expression.to_string(),
                formula,
            });
        }

        if let Some(raw) = input.strip_prefix(ESCAPE_SIGN) {
            return Ok(CellContent::Text {
                raw: raw.to_string(),
                escaped: true,
            });
        }

        Ok(CellContent::Text {
            raw: input.to_string(),
            escaped: false,
        })
    }

    /// The text that, set back into a cell, reproduces this content.
    pub fn text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text { raw, escaped: true } => format!("{}{}", ESCAPE_SIGN, raw),
            CellContent::Text { raw, escaped: false } => raw.clone(),
            CellContent::Formula { formula, .. } => {
                format!("{}{}", FORMULA_SIGN, formula.expression())
            }
        }
    }

    /// Cells read by a formula, deduplicated and sorted by row then column.
    pub fn referenced_cells(&self) -> Vec<Position> {
        match self {
            CellContent::Formula { formula, .. } => {
                let mut cells = formula.referenced_cells();
                cells.sort();
                cells.dedup();
                cells
            }
            _ => Vec::new(),
        }
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula { .. })
    }
}

/// A cell: its content and the cached result of evaluating it.
///
/// The cache sits behind a `RefCell` so reads through `&Cell` can fill it.
/// Filling the cache is not a change to the cell: the cached value, when
/// present, is always what evaluating the content right now would produce,
/// as long as the sheet invalidates dependents after every edit.
#[derive(Debug)]
pub struct Cell {
    content: CellContent,
    cached_value: RefCell<Option<Value>>,
}

impl Cell {
    pub fn new(content: CellContent) -> Cell {
        Cell {
            content,
            cached_value: RefCell::new(None),
        }
    }

    /// Build a cell from user input. See [`CellContent::parse`].
    pub fn from_input(input: &str) -> Result<Cell, FormulaError> {
        CellContent::parse(input).map(Cell::new)
    }

    pub fn content(&self) -> &CellContent {
        &self.content
    }

    /// The cached value, evaluating the content first if the cache is invalid.
    pub fn value(&self, cells: &dyn CellLookup) -> Value {
        if let Some(value) = self.cached_value.borrow().as_ref() {
            return value.clone();
        }

        // No borrow is held here: evaluation reads other cells' caches.
        let value = match &self.content {
            CellContent::Empty => Value::empty(),
            CellContent::Text { raw, .. } => Value::Text(raw.clone()),
            CellContent::Formula { formula, .. } => formula.evaluate(cells),
        };
        *self.cached_value.borrow_mut() = Some(value.clone());
        value
    }

    /// See [`CellContent::text`]. Never evaluates.
    pub fn text(&self) -> String {
        self.content.text()
    }

    /// See [`CellContent::referenced_cells`].
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.content.referenced_cells()
    }

    /// Drop the cached value. Does not touch dependents.
    pub fn invalidate_cache(&self) {
        self.cached_value.borrow_mut().take();
    }

    pub fn has_cached_value(&self) -> bool {
        self.cached_value.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellContent};
    use std::cell::Cell as Counter;
    use tabula_engine::engine::{CellLookup, ErrorKind, GridBounds, Position, Value};

    /// Lookup that returns a fixed number and counts reads.
    struct Fixed {
        value: f64,
        reads: Counter<usize>,
    }

    impl Fixed {
        fn new(value: f64) -> Self {
            Fixed {
                value,
                reads: Counter::new(0),
            }
        }
    }

    impl CellLookup for Fixed {
        fn bounds(&self) -> GridBounds {
            GridBounds::default()
        }

        fn value_at(&self, _pos: Position) -> Option<Value> {
            self.reads.set(self.reads.get() + 1);
            Some(Value::Number(self.value))
        }
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(CellContent::parse("").unwrap(), CellContent::Empty);
        assert_eq!(
            CellContent::parse("hello").unwrap(),
            CellContent::Text {
                raw: "hello".to_string(),
                escaped: false
            }
        );
        assert_eq!(
            CellContent::parse("'=1+2").unwrap(),
            CellContent::Text {
                raw: "=1+2".to_string(),
                escaped: true
            }
        );
        assert!(CellContent::parse("=1+2").unwrap().is_formula());
        assert!(CellContent::parse("=1+").is_err());
    }

    #[test]
    fn test_text_round_trips() {
        for input in ["", "hello", "'=not a formula", "''", "a=b", "  spaced  ", "42"] {
            let cell = Cell::from_input(input).unwrap();
            assert_eq!(cell.text(), input);
        }
    }

    #[test]
    fn test_formula_text_is_canonical() {
        let cell = Cell::from_input("= (1 + 2) * ((A1))").unwrap();
        assert_eq!(cell.text(), "=(1+2)*A1");
    }

    #[test]
    fn test_escaped_value_drops_marker() {
        let cell = Cell::from_input("'=A1").unwrap();
        assert_eq!(cell.value(&Fixed::new(0.0)), Value::Text("=A1".to_string()));
    }

    #[test]
    fn test_empty_value_is_empty_text() {
        let cell = Cell::from_input("").unwrap();
        assert_eq!(cell.value(&Fixed::new(0.0)), Value::Text(String::new()));
    }

    #[test]
    fn test_referenced_cells_sorted_and_unique() {
        let cell = Cell::from_input("=C1+A2+B1+A2+C1").unwrap();
        assert_eq!(
            cell.referenced_cells(),
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(1, 0)]
        );
        assert!(Cell::from_input("text").unwrap().referenced_cells().is_empty());
    }

    #[test]
    fn test_value_is_cached_until_invalidated() {
        let lookup = Fixed::new(2.0);
        let cell = Cell::from_input("=A1*3").unwrap();
        assert!(!cell.has_cached_value());

        assert_eq!(cell.value(&lookup), Value::Number(6.0));
        assert_eq!(cell.value(&lookup), Value::Number(6.0));
        assert_eq!(lookup.reads.get(), 1);
        assert!(cell.has_cached_value());

        cell.invalidate_cache();
        cell.invalidate_cache();
        assert!(!cell.has_cached_value());
        assert_eq!(cell.value(&lookup), Value::Number(6.0));
        assert_eq!(lookup.reads.get(), 2);
    }

    #[test]
    fn test_evaluation_errors_are_cached_values() {
        let lookup = Fixed::new(0.0);
        let cell = Cell::from_input("=1/A1").unwrap();
        assert_eq!(cell.value(&lookup), Value::Error(ErrorKind::Arithmetic));
        assert!(cell.has_cached_value());
        assert_eq!(lookup.reads.get(), 1);
    }
}
