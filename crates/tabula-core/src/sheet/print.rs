//! Tab-separated dumps of the printable area.

use std::io::Write;

use tabula_engine::engine::Position;

use super::Sheet;
use crate::cell::Cell;
use crate::error::Result;

impl Sheet {
    /// Write every cell's value, row by row. Cells are separated by tabs,
    /// rows end with a newline and absent cells print as nothing.
    pub fn print_values<W: Write>(&self, out: &mut W) -> Result<()> {
        self.print_with(out, |pos, cell| self.cell_value(pos, cell).to_string())
    }

    /// Write every cell's text, laid out like [`print_values`](Self::print_values).
    pub fn print_texts<W: Write>(&self, out: &mut W) -> Result<()> {
        self.print_with(out, |_, cell| cell.text())
    }

    fn print_with<W, F>(&self, out: &mut W, render: F) -> Result<()>
    where
        W: Write,
        F: Fn(Position, &Cell) -> String,
    {
        let size = self.printable_size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    out.write_all(b"\t")?;
                }
                let pos = Position::new(row, col);
                if let Some(cell) = self.cells.get(&pos) {
                    out.write_all(render(pos, cell).as_bytes())?;
                }
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
