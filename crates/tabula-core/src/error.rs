//! Error types for Tabula core.

use thiserror::Error;

use tabula_engine::FormulaError;
use tabula_engine::engine::Position;

/// Errors that can occur when editing or printing a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid position: {0}")]
    InvalidPosition(Position),

    #[error("Formula syntax error: {0}")]
    FormulaSyntax(#[from] FormulaError),

    #[error("Circular dependency detected: {}", format_path(.path))]
    CircularDependency { cell: Position, path: Vec<Position> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_path(path: &[Position]) -> String {
    path.iter()
        .map(|pos| pos.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub type Result<T> = std::result::Result<T, SheetError>;

#[cfg(test)]
mod tests {
    use super::SheetError;
    use tabula_engine::engine::Position;

    #[test]
    fn test_messages_use_a1_notation() {
        let err = SheetError::InvalidPosition(Position::new(16384, 0));
        assert_eq!(err.to_string(), "Invalid position: A16385");

        let a1 = Position::new(0, 0);
        let b1 = Position::new(0, 1);
        let err = SheetError::CircularDependency {
            cell: a1,
            path: vec![a1, b1, a1],
        };
        assert_eq!(err.to_string(), "Circular dependency detected: A1 -> B1 -> A1");
    }
}
