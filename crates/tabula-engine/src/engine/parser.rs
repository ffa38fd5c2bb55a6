//! Recursive descent parser for formula expressions.
//!
//! Grammar:
//!
//! ```text
//! expr    --> term (("+" | "-") term)*
//! term    --> unary (("*" | "/") unary)*
//! unary   --> ("+" | "-") unary | primary
//! primary --> NUMBER | CELL | "(" expr ")"
//! ```

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::lexer::{Lexer, Token};
use crate::error::{FormulaError, Result};

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    offset: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(src);
        let (current, offset) = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            offset,
        })
    }

    /// Parses the whole input; trailing tokens are an error.
    pub(crate) fn parse(mut self) -> Result<Expr> {
        if self.current == Token::Eof {
            return Err(FormulaError::syntax(self.offset, "empty expression"));
        }

        let expr = self.parse_expr()?;

        if self.current != Token::Eof {
            return Err(FormulaError::syntax(
                self.offset,
                format!("unexpected '{}' after expression", self.current),
            ));
        }

        Ok(expr)
    }

    fn advance(&mut self) -> Result<()> {
        let (token, offset) = self.lexer.next_token()?;
        self.current = token;
        self.offset = offset;
        Ok(())
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.current {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Minus,
            _ => return self.parse_primary(),
        };
        self.advance()?;
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.current {
            Token::Number(n) => {
                self.advance()?;
                Ok(Expr::Number(n))
            }
            Token::Cell(pos) => {
                self.advance()?;
                Ok(Expr::Cell(pos))
            }
            Token::LParen => {
                let open = self.offset;
                self.advance()?;
                let inner = self.parse_expr()?;
                if self.current != Token::RParen {
                    return Err(FormulaError::syntax(
                        self.offset,
                        format!("unclosed '(' opened at offset {}", open),
                    ));
                }
                self.advance()?;
                Ok(inner)
            }
            _ => Err(FormulaError::syntax(
                self.offset,
                format!("expected a number, cell or '(', found '{}'", self.current),
            )),
        }
    }
}
