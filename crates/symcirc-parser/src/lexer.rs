//! Field splitter for netlist lines.

use crate::error::{Error, Result};

/// One whitespace-delimited field of a netlist line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: a name, node or unbraced value (`R1`, `3_1`, `4.7k`).
    Word(String),
    /// Contents of a `{...}` group, which may contain spaces.
    Braced(String),
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::Braced(s) => s,
        }
    }
}

/// A netlist line split at its first top-level `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitLine<'a> {
    pub fields: &'a str,
    pub directives: Option<&'a str>,
}

/// Separate the element part from the drawing directives.
pub fn split_directives(line: &str) -> SplitLine<'_> {
    let mut depth = 0usize;
    for (i, c) in line.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                return SplitLine {
                    fields: &line[..i],
                    directives: Some(&line[i + 1..]),
                };
            }
            _ => {}
        }
    }
    SplitLine {
        fields: line,
        directives: None,
    }
}

/// Lexer over the element part of one line.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            input,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
    }

    fn read_braced(&mut self, open: usize) -> Result<Token> {
        let mut depth = 1usize;
        for (i, c) in self.chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let body = self.input[open + 1..i].trim();
                        return Ok(Token::Braced(body.to_string()));
                    }
                }
                _ => {}
            }
        }
        Err(Error::Syntax {
            column: open + 1,
            message: "unterminated '{'".to_string(),
        })
    }

    fn read_word(&mut self, start: usize) -> Token {
        let mut end = self.input.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_whitespace() || c == '{' {
                end = i;
                break;
            }
            self.chars.next();
        }
        Token::Word(self.input[start..end].to_string())
    }

    /// Next field, or `None` at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();
        match self.chars.next() {
            None => Ok(None),
            Some((i, '{')) => self.read_braced(i).map(Some),
            Some((i, '}')) => Err(Error::Syntax {
                column: i + 1,
                message: "unmatched '}'".to_string(),
            }),
            Some((i, _)) => Ok(Some(self.read_word(i))),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}
