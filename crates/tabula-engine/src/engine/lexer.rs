//! Formula tokenizer.
//!
//! Splits formula text (without the leading `=`) into numbers, A1 cell
//! references, the four arithmetic operators and parentheses. Whitespace
//! between tokens is skipped. Every token carries the byte offset it starts
//! at so syntax errors can point into the source.

use std::iter::Peekable;
use std::str::CharIndices;

use super::Position;
use crate::error::{FormulaError, Result};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Cell(Position),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Cell(pos) => write!(f, "{}", pos),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Eof => f.write_str("end of formula"),
        }
    }
}

pub(crate) struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Lexer {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    /// Returns the next token and the byte offset it starts at.
    pub(crate) fn next_token(&mut self) -> Result<(Token, usize)> {
        self.skip_whitespace();

        let Some(&(start, ch)) = self.chars.peek() else {
            return Ok((Token::Eof, self.src.len()));
        };

        let token = match ch {
            '+' => self.single(Token::Plus),
            '-' => self.single(Token::Minus),
            '*' => self.single(Token::Star),
            '/' => self.single(Token::Slash),
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            c if c.is_ascii_digit() || c == '.' => self.read_number(start)?,
            c if c.is_ascii_uppercase() => self.read_cell(start)?,
            c => {
                return Err(FormulaError::syntax(
                    start,
                    format!("unexpected character '{}'", c),
                ));
            }
        };

        Ok((token, start))
    }

    fn single(&mut self, token: Token) -> Token {
        self.chars.next();
        token
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.chars.next();
        }
    }

    fn eat_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(&(_, ch)) = self.chars.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.chars.next();
            count += 1;
        }
        count
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    fn read_number(&mut self, start: usize) -> Result<Token> {
        let mut digits = self.eat_digits();
        if let Some(&(_, '.')) = self.chars.peek() {
            self.chars.next();
            digits += self.eat_digits();
        }
        if digits == 0 {
            return Err(FormulaError::syntax(start, "expected digits"));
        }

        if let Some(&(_, 'e' | 'E')) = self.chars.peek() {
            self.chars.next();
            if let Some(&(_, '+' | '-')) = self.chars.peek() {
                self.chars.next();
            }
            if self.eat_digits() == 0 {
                let at = self.offset();
                return Err(FormulaError::syntax(at, "malformed exponent"));
            }
        }

        let end = self.offset();
        let text = &self.src[start..end];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| FormulaError::syntax(start, format!("invalid number '{}'", text)))
    }

    fn read_cell(&mut self, start: usize) -> Result<Token> {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !ch.is_ascii_uppercase() {
                break;
            }
            self.chars.next();
        }
        self.eat_digits();

        let end = self.offset();
        let text = &self.src[start..end];
        Position::from_a1(text)
            .map(Token::Cell)
            .ok_or_else(|| FormulaError::syntax(start, format!("invalid cell reference '{}'", text)))
    }
}
