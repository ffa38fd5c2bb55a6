//! Parsed formulas.

use super::ast::Expr;
use super::eval::{CellLookup, evaluate};
use super::parser::Parser;
use super::{Position, Value};
use crate::error::Result;

/// A parsed formula expression (the text after the leading `=`).
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    ast: Expr,
}

impl Formula {
    /// Parse an expression. Fails with [`FormulaError::Syntax`] when the
    /// text is not a valid expression.
    ///
    /// [`FormulaError::Syntax`]: crate::error::FormulaError::Syntax
    pub fn parse(expression: &str) -> Result<Formula> {
        let ast = Parser::new(expression)?.parse()?;
        Ok(Formula { ast })
    }

    /// Evaluate against `cells`. Evaluation errors come back as
    /// [`Value::Error`], never as a failure.
    pub fn evaluate(&self, cells: &dyn CellLookup) -> Value {
        evaluate(&self.ast, cells)
    }

    /// Canonical text of the expression, without the leading `=`.
    pub fn expression(&self) -> String {
        self.ast.to_string()
    }

    /// Cells read by the formula, in source order and possibly repeated.
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.ast.cells()
    }
}
