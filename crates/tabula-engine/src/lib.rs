//! tabula_engine - Cell positions, values and the formula language.

pub mod engine;
pub mod error;

pub use error::{FormulaError, Result};

#[cfg(test)]
mod tests {
    use crate::engine::*;

    #[test]
    fn test_from_a1_single_letter_columns() {
        let a1 = Position::from_a1("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = Position::from_a1("B1").unwrap();
        assert_eq!(b1.row, 0);
        assert_eq!(b1.col, 1);

        let z1 = Position::from_a1("Z1").unwrap();
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_a1_multi_letter_columns() {
        assert_eq!(Position::from_a1("AA1").unwrap().col, 26);
        assert_eq!(Position::from_a1("AB1").unwrap().col, 27);
        assert_eq!(Position::from_a1("AZ1").unwrap().col, 51);
        assert_eq!(Position::from_a1("BA1").unwrap().col, 52);
        assert_eq!(Position::from_a1("XFD1").unwrap().col, 16383);
    }

    #[test]
    fn test_from_a1_row_numbers() {
        assert_eq!(Position::from_a1("A1").unwrap().row, 0);
        assert_eq!(Position::from_a1("A10").unwrap().row, 9);
        assert_eq!(Position::from_a1("A16384").unwrap().row, 16383);
    }

    #[test]
    fn test_from_a1_case_insensitive() {
        let lower = Position::from_a1("ab12").unwrap();
        assert_eq!(lower, Position::new(11, 27));
    }

    #[test]
    fn test_from_a1_invalid_inputs() {
        assert!(Position::from_a1("").is_none());
        assert!(Position::from_a1("A").is_none());
        assert!(Position::from_a1("1").is_none());
        assert!(Position::from_a1("1A").is_none());
        assert!(Position::from_a1("A1B").is_none());
        assert!(Position::from_a1("A-1").is_none());
    }

    #[test]
    fn test_display_round_trip() {
        for name in ["A1", "Z9", "AA10", "AZ100", "XFD16384"] {
            let pos: Position = name.parse().unwrap();
            assert_eq!(pos.to_string(), name);
        }
    }

    #[test]
    fn test_default_bounds() {
        let bounds = GridBounds::default();
        assert!(Position::from_a1("XFD16384").unwrap().is_valid(bounds));
        assert!(!Position::from_a1("XFE1").unwrap().is_valid(bounds));
        assert!(!Position::from_a1("A16385").unwrap().is_valid(bounds));
    }
}
