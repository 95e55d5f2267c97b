//! Expression parsing using recursive descent.

use super::ast::Expr;
use crate::error::{Error, Result};

/// Parse a symbolic expression from a string.
///
/// Identifiers become symbols, `name(args)` becomes a function application and
/// numbers accept SPICE-style engineering suffixes (`1k`, `4.7u`, `2meg`).
pub fn parse_expression(input: &str) -> Result<Expr> {
    let mut parser = ExprParser::new(input);
    parser.parse()
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            position: self.pos,
            message: message.into(),
        }
    }

    fn parse(&mut self) -> Result<Expr> {
        self.skip_whitespace();
        if self.pos >= self.input.len() {
            return Err(self.error("empty expression"));
        }
        let expr = self.parse_additive()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            Err(self.error(format!(
                "unexpected character '{}'",
                self.input[self.pos..].chars().next().unwrap_or(' ')
            )))
        } else {
            Ok(expr)
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn check_str(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('+') => {
                    self.advance();
                    let right = self.parse_multiplicative()?;
                    left = left.add(right);
                }
                Some('-') => {
                    self.advance();
                    let right = self.parse_multiplicative()?;
                    left = left.sub(right);
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_power()?;

        loop {
            self.skip_whitespace();
            if self.check_str("**") {
                break;
            }
            match self.peek() {
                Some('*') => {
                    self.advance();
                    let right = self.parse_power()?;
                    left = left.mul(right);
                }
                Some('/') => {
                    self.advance();
                    let right = self.parse_power()?;
                    left = left.div(right);
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_unary()?;

        self.skip_whitespace();
        if self.peek() == Some('^') || self.check_str("**") {
            if self.peek() == Some('*') {
                self.advance();
            }
            self.advance();
            // Right associative
            let exp = self.parse_power()?;
            Ok(base.pow(exp))
        } else {
            Ok(base)
        }
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        self.skip_whitespace();
        match self.peek() {
            Some('-') => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(operand.neg())
            }
            Some('+') => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        self.skip_whitespace();

        match self.peek() {
            Some('(') | Some('{') => {
                let close = if self.peek() == Some('(') { ')' } else { '}' };
                self.advance();
                let expr = self.parse_additive()?;
                self.skip_whitespace();
                if self.peek() != Some(close) {
                    return Err(self.error(format!("expected '{}'", close)));
                }
                self.advance();
                Ok(expr)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_identifier(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of expression")),
        }
    }

    fn parse_number(&mut self) -> Result<Expr> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.advance();
            } else {
                break;
            }
        }

        // Exponent, but only when followed by a digit so `2e` stays an error
        // rather than swallowing a symbol.
        if matches!(self.peek(), Some('e') | Some('E')) {
            let rest = &self.input[self.pos + 1..];
            let digits = rest.trim_start_matches(['+', '-']);
            if digits.starts_with(|c: char| c.is_ascii_digit()) {
                self.advance();
                if matches!(self.peek(), Some('+') | Some('-')) {
                    self.advance();
                }
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = &self.input[start..self.pos];
        let value: f64 = text
            .parse()
            .map_err(|_| self.error(format!("invalid number '{}'", text)))?;

        let suffix_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.advance();
        }
        let suffix = &self.input[suffix_start..self.pos];
        if suffix.is_empty() {
            return Ok(Expr::Constant(value));
        }
        match parse_suffix(suffix) {
            Some(multiplier) => Ok(Expr::Constant(value * multiplier)),
            None => {
                self.pos = suffix_start;
                Err(self.error(format!("unknown suffix '{}'", suffix)))
            }
        }
    }

    fn parse_identifier(&mut self) -> Result<Expr> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let name = self.input[start..self.pos].to_string();

        self.skip_whitespace();
        if self.peek() != Some('(') {
            return Ok(Expr::Symbol(name));
        }

        self.advance();
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.advance();
            return Ok(Expr::Function { name, args });
        }
        loop {
            args.push(self.parse_additive()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.advance(),
                Some(')') => {
                    self.advance();
                    break;
                }
                _ => return Err(self.error(format!("expected ',' or ')' in call to {}", name))),
            }
        }
        Ok(Expr::Function { name, args })
    }
}

/// Engineering suffix multiplier, case-insensitive.
fn parse_suffix(suffix: &str) -> Option<f64> {
    match suffix.to_ascii_lowercase().as_str() {
        "f" => Some(1e-15),
        "p" => Some(1e-12),
        "n" => Some(1e-9),
        "u" => Some(1e-6),
        "m" => Some(1e-3),
        "k" => Some(1e3),
        "meg" => Some(1e6),
        "g" => Some(1e9),
        "t" => Some(1e12),
        _ => None,
    }
}
