use std::collections::{HashMap, HashSet};

use tabula_engine::engine::{CellLookup, GridBounds, Position, Size, Value};

use super::deps::DependencyGraph;
use super::layout::Occupancy;
use crate::cell::Cell;
use crate::error::{Result, SheetError};

/// A sparse grid of cells with formula dependency tracking.
///
/// Values are computed on first read and cached per cell. Every edit
/// invalidates the edited cell and everything that reads it, directly or
/// through other formulas, so a cached value is never stale.
#[derive(Debug, Default)]
pub struct Sheet {
    /// Grid bounds (exclusive) for every position the sheet accepts
    pub(crate) bounds: GridBounds,
    /// Stored cells; an absent key is an empty cell
    pub(crate) cells: HashMap<Position, Cell>,
    /// Forward and reverse formula dependencies
    pub(crate) graph: DependencyGraph,
    /// Occupied rows/columns for the printable area
    pub(crate) occupancy: Occupancy,
}

impl Sheet {
    /// Create an empty sheet with the default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sheet accepting positions inside `bounds`.
    pub fn with_bounds(bounds: GridBounds) -> Self {
        Sheet {
            bounds,
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Minimal area anchored at A1 covering all stored cells; 0x0 when empty.
    pub fn printable_size(&self) -> Size {
        self.occupancy.printable_size()
    }

    /// Cells read by the formula at `pos`, sorted; empty for non-formulas.
    pub fn precedents(&self, pos: Position) -> Result<Vec<Position>> {
        self.check_position(pos)?;
        Ok(self.graph.precedents(&pos).to_vec())
    }

    /// Formula cells that read `pos`, sorted.
    pub fn dependents(&self, pos: Position) -> Result<Vec<Position>> {
        self.check_position(pos)?;
        let mut out: Vec<Position> = self.graph.dependents(&pos).copied().collect();
        out.sort();
        Ok(out)
    }

    /// Value of a stored cell. Uncached formula cells it reads are
    /// evaluated first, deepest first, so evaluating any one cell only ever
    /// descends one level into the grid however long the chain is.
    pub(crate) fn cell_value(&self, pos: Position, cell: &Cell) -> Value {
        if !cell.has_cached_value() {
            self.fill_caches(pos);
        }
        cell.value(self)
    }

    fn fill_caches(&self, pos: Position) {
        // (position, precedents already scheduled)
        let mut to_process = vec![(pos, false)];
        let mut visited = HashSet::new();

        while let Some((current, ready)) = to_process.pop() {
            let Some(cell) = self.cells.get(&current) else {
                continue;
            };
            if ready {
                cell.value(self);
                continue;
            }
            if cell.has_cached_value() || !visited.insert(current) {
                continue;
            }
            to_process.push((current, true));
            to_process.extend(self.graph.precedents(&current).iter().map(|dep| (*dep, false)));
        }
    }

    pub(crate) fn check_position(&self, pos: Position) -> Result<()> {
        if pos.is_valid(self.bounds) {
            Ok(())
        } else {
            Err(SheetError::InvalidPosition(pos))
        }
    }
}

impl CellLookup for Sheet {
    fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn value_at(&self, pos: Position) -> Option<Value> {
        self.cells.get(&pos).map(|cell| self.cell_value(pos, cell))
    }
}

/// A read-only view of one stored cell.
#[derive(Clone, Copy)]
pub struct CellView<'a> {
    pub(crate) sheet: &'a Sheet,
    pub(crate) pos: Position,
    pub(crate) cell: &'a Cell,
}

impl<'a> CellView<'a> {
    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn cell(&self) -> &'a Cell {
        self.cell
    }

    /// The cell's value, evaluating (and caching) it if needed.
    pub fn value(&self) -> Value {
        self.sheet.cell_value(self.pos, self.cell)
    }

    pub fn text(&self) -> String {
        self.cell.text()
    }

    pub fn referenced_cells(&self) -> Vec<Position> {
        self.cell.referenced_cells()
    }

    /// Whether any formula reads this cell.
    pub fn is_referenced(&self) -> bool {
        self.sheet.graph.is_referenced(&self.pos)
    }

    pub fn has_cached_value(&self) -> bool {
        self.cell.has_cached_value()
    }
}

impl std::fmt::Debug for CellView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellView")
            .field("pos", &self.pos)
            .field("cell", self.cell)
            .finish()
    }
}
