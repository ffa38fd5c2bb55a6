use tabula_engine::engine::Position;

use super::{CellView, Sheet};
use crate::cell::{Cell, CellContent};
use crate::error::{Result, SheetError};

impl Sheet {
    /// Set cell contents from input text.
    ///
    /// Empty input clears the cell. All validation (position, formula syntax,
    /// referenced positions, cycles) happens before anything is changed, so a
    /// rejected edit leaves the sheet exactly as it was.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        self.check_position(pos)?;

        if text.is_empty() {
            return self.clear_cell(pos);
        }

        let content = CellContent::parse(text).inspect_err(|e| {
            log::debug!("rejected edit at {}: {}", pos, e);
        })?;
        let deps = content.referenced_cells();
        self.check_dependencies(pos, &deps).inspect_err(|e| {
            log::debug!("rejected edit at {}: {}", pos, e);
        })?;

        log::trace!("set {} to {:?} ({} dependencies)", pos, text, deps.len());
        self.graph.update(pos, deps);
        if self.cells.insert(pos, Cell::new(content)).is_none() {
            self.occupancy.insert(pos);
        }
        self.invalidate_dependents(pos);

        Ok(())
    }

    /// Get the cell stored at `pos`, if any. Never evaluates.
    pub fn get_cell(&self, pos: Position) -> Result<Option<CellView<'_>>> {
        self.check_position(pos)?;
        Ok(self.cells.get(&pos).map(|cell| CellView {
            sheet: self,
            pos,
            cell,
        }))
    }

    /// Clear the specified cell. A no-op when nothing is stored there.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        self.check_position(pos)?;

        if self.cells.remove(&pos).is_none() {
            return Ok(());
        }

        log::trace!("cleared {}", pos);
        self.graph.update(pos, Vec::new());
        self.occupancy.remove(pos);
        self.invalidate_dependents(pos);

        Ok(())
    }

    /// Referenced positions must be in bounds and must not lead back to `pos`.
    fn check_dependencies(&self, pos: Position, deps: &[Position]) -> Result<()> {
        if let Some(invalid) = deps.iter().find(|dep| !dep.is_valid(self.bounds)) {
            return Err(SheetError::InvalidPosition(*invalid));
        }
        if let Some(path) = self.graph.find_cycle(&pos, deps) {
            return Err(SheetError::CircularDependency { cell: pos, path });
        }
        Ok(())
    }

    /// Invalidate the cache of `pos` and of every cell that reads it,
    /// directly or transitively.
    ///
    /// Readers of a cell that had no cached value are skipped: a cached cell
    /// only exists while every cell it read is cached too, so nothing past an
    /// uncached cell can be holding a value.
    fn invalidate_dependents(&self, pos: Position) {
        let visited = self.graph.walk_dependents(pos, |cell_ref| {
            match self.cells.get(cell_ref) {
                Some(cell) => {
                    let was_cached = cell.has_cached_value();
                    cell.invalidate_cache();
                    was_cached
                }
                None => true,
            }
        });
        log::trace!("invalidated from {} ({} cells visited)", pos, visited);
    }
}
