//! Occupied rows and columns, for the printable area.

use std::collections::{BTreeSet, HashMap};

use tabula_engine::engine::{Position, Size};

/// Per-row and per-column counts of stored cells. Maintained on every
/// insert and removal, never rebuilt by scanning the grid.
#[derive(Debug, Default, Clone)]
pub(crate) struct Occupancy {
    row_counts: HashMap<usize, usize>,
    col_counts: HashMap<usize, usize>,
    rows: BTreeSet<usize>,
    cols: BTreeSet<usize>,
}

impl Occupancy {
    pub(crate) fn insert(&mut self, pos: Position) {
        increment(&mut self.row_counts, &mut self.rows, pos.row);
        increment(&mut self.col_counts, &mut self.cols, pos.col);
    }

    pub(crate) fn remove(&mut self, pos: Position) {
        decrement(&mut self.row_counts, &mut self.rows, pos.row);
        decrement(&mut self.col_counts, &mut self.cols, pos.col);
    }

    /// Smallest area anchored at A1 that covers every occupied cell.
    pub(crate) fn printable_size(&self) -> Size {
        match (self.rows.last(), self.cols.last()) {
            (Some(&row), Some(&col)) => Size::new(row + 1, col + 1),
            _ => Size::default(),
        }
    }
}

fn increment(counts: &mut HashMap<usize, usize>, occupied: &mut BTreeSet<usize>, index: usize) {
    let count = counts.entry(index).or_insert(0);
    if *count == 0 {
        occupied.insert(index);
    }
    *count += 1;
}

fn decrement(counts: &mut HashMap<usize, usize>, occupied: &mut BTreeSet<usize>, index: usize) {
    let Some(count) = counts.get_mut(&index) else {
        return;
    };
    *count -= 1;
    if *count == 0 {
        counts.remove(&index);
        occupied.remove(&index);
    }
}
