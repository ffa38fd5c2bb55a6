//! Computed cell values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of error a formula can evaluate to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Reference to a position outside the grid.
    Ref,
    /// Operand could not be interpreted as a number.
    Value,
    /// Division by zero or a non-finite result.
    Arithmetic,
}

impl ErrorKind {
    /// The tag shown in place of a value.
    pub fn tag(&self) -> &'static str {
        match self {
            ErrorKind::Ref => "#REF!",
            ErrorKind::Value => "#VALUE!",
            ErrorKind::Arithmetic => "#ARITHM!",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The value of a cell after evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Error(ErrorKind),
}

impl Value {
    pub fn empty() -> Value {
        Value::Text(String::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Error(kind) => write!(f, "{}", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, Value};

    #[test]
    fn test_display_numbers_without_trailing_zeroes() {
        assert_eq!(Value::Number(8.0).to_string(), "8");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
    }

    #[test]
    fn test_display_error_tags() {
        assert_eq!(Value::Error(ErrorKind::Ref).to_string(), "#REF!");
        assert_eq!(Value::Error(ErrorKind::Value).to_string(), "#VALUE!");
        assert_eq!(Value::Error(ErrorKind::Arithmetic).to_string(), "#ARITHM!");
    }
}
