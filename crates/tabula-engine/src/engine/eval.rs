//! Formula evaluation against a grid of cells.
//!
//! Evaluation reads other cells through [`CellLookup`] and never mutates
//! anything itself. Errors are values: the first error met while walking the
//! tree (left operand before right) becomes the result.

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::{ErrorKind, GridBounds, Position, Value};

/// Read access to the cells a formula refers to.
pub trait CellLookup {
    /// Bounds outside of which a reference evaluates to `#REF!`.
    fn bounds(&self) -> GridBounds;

    /// Value of the cell at `pos`, or None when nothing is stored there.
    fn value_at(&self, pos: Position) -> Option<Value>;
}

type Eval = Result<f64, ErrorKind>;

pub(crate) fn evaluate(expr: &Expr, cells: &dyn CellLookup) -> Value {
    match eval_expr(expr, cells) {
        Ok(n) => Value::Number(n),
        Err(kind) => Value::Error(kind),
    }
}

fn eval_expr(expr: &Expr, cells: &dyn CellLookup) -> Eval {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Cell(pos) => read_cell(*pos, cells),
        Expr::Unary { op, operand } => {
            let n = eval_expr(operand, cells)?;
            Ok(match op {
                UnaryOp::Plus => n,
                UnaryOp::Minus => -n,
            })
        }
        Expr::Binary { op, left, right } => {
            let lhs = eval_expr(left, cells)?;
            let rhs = eval_expr(right, cells)?;
            let result = match op {
                BinaryOp::Add => lhs + rhs,
                BinaryOp::Sub => lhs - rhs,
                BinaryOp::Mul => lhs * rhs,
                BinaryOp::Div => lhs / rhs,
            };
            finite(result)
        }
    }
}

fn finite(n: f64) -> Eval {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(ErrorKind::Arithmetic)
    }
}

fn read_cell(pos: Position, cells: &dyn CellLookup) -> Eval {
    if !pos.is_valid(cells.bounds()) {
        return Err(ErrorKind::Ref);
    }
    match cells.value_at(pos) {
        None => Ok(0.0),
        Some(Value::Number(n)) => Ok(n),
        Some(Value::Error(kind)) => Err(kind),
        Some(Value::Text(text)) => text_to_number(&text),
    }
}

/// Empty text reads as zero; other text must be a complete finite number.
fn text_to_number(text: &str) -> Eval {
    if text.is_empty() {
        return Ok(0.0);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ErrorKind::Value),
    }
}

#[cfg(test)]
mod tests {
    use super::text_to_number;
    use crate::engine::ErrorKind;

    #[test]
    fn test_text_to_number() {
        assert_eq!(text_to_number(""), Ok(0.0));
        assert_eq!(text_to_number("42"), Ok(42.0));
        assert_eq!(text_to_number("-1.5e2"), Ok(-150.0));
        assert_eq!(text_to_number("4x"), Err(ErrorKind::Value));
        assert_eq!(text_to_number(" 4"), Err(ErrorKind::Value));
        assert_eq!(text_to_number("inf"), Err(ErrorKind::Value));
        assert_eq!(text_to_number("NaN"), Err(ErrorKind::Value));
    }
}
