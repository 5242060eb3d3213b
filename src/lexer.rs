//! Longest-match scanner for Storr source text.
//!
//! The lexer walks the source one character at a time and never looks more
//! than two characters ahead (the `...` check). Every decision is made by
//! peeking, so the cursor only ever moves forward. Malformed input becomes
//! [`Kind::Illegal`] tokens and scanning carries on; the only way out of the
//! loop is the single [`Kind::EndOfInput`] token.

use std::iter::FusedIterator;
use crate::token::{Kind, Span, Token};

/// Cursor snapshot taken at the first character of a token.
#[derive(Clone, Copy, Debug)]
struct Mark {
    offset: usize,
    line: usize,
    column: usize,
}

pub struct Lexer<'a> {
    source_code: &'a str,
    chars: Vec<char>,
    /// Index into `chars`.
    current: usize,
    /// Byte offset of `chars[current]` in `source_code`.
    offset: usize,
    line: usize,
    column: usize,
    start: Mark,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let start = Mark {
            offset: 0,
            line: 1,
            column: 1,
        };
        Self {
            source_code: input,
            chars: input.chars().collect(),
            current: 0,
            offset: 0,
            line: start.line,
            column: start.column,
            start,
            finished: false,
        }
    }

    /// Scan the whole buffer. The result always ends in one `EndOfInput` token.
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    fn at(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    fn is_eof(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.at()?;
        self.current += 1;
        self.offset += ch.len_utf8();
        // "\r\n" counts as one line break, taken at the '\n'.
        if ch == '\n' || (ch == '\r' && self.at() != Some('\n')) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume the current character only if it is `expected`.
    fn accept(&mut self, expected: char) -> bool {
        if self.at() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.at().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    fn lexeme(&self) -> &'a str {
        &self.source_code[self.start.offset..self.offset]
    }

    fn create_token(&self, kind: Kind, text: Option<String>) -> Token {
        Token::new(
            kind,
            text,
            Span::new(self.start.offset, self.offset),
            self.start.line,
            self.start.column,
        )
    }

    /// Token whose text is everything consumed since the token start.
    fn spelled(&self, kind: Kind) -> Token {
        self.create_token(kind, Some(self.lexeme().to_string()))
    }

    fn next_token(&mut self) -> Token {
        self.advance_while(|c| c.is_whitespace() && !is_line_terminator(c));
        self.start = self.mark();

        let Some(ch) = self.advance() else {
            debug_assert!(self.is_eof());
            return self.create_token(Kind::EndOfInput, None);
        };

        match ch {
            '\r' | '\n' => {
                self.advance_while(char::is_whitespace);
                self.create_token(Kind::LineSeparator, None)
            }
            '/' if self.accept('/') => {
                self.advance_while(|c| !is_line_terminator(c));
                self.spelled(Kind::Comment)
            }
            c if c == '_' || c.is_ascii_alphabetic() => self.identifier(),
            c if c.is_ascii_digit() => self.number(),
            '"' => self.string(),
            // Character literals are reserved syntax.
            '\'' => self.spelled(Kind::Illegal),
            ':' => {
                let kind = if self.accept('=') {
                    Kind::LeftAssign
                } else {
                    Kind::Colon
                };
                self.spelled(kind)
            }
            '=' => {
                let kind = if self.accept(':') {
                    Kind::RightAssign
                } else if self.accept('>') {
                    Kind::Implies
                } else {
                    Kind::Equals
                };
                self.spelled(kind)
            }
            '!' => {
                let kind = if self.accept('=') {
                    Kind::NotEqual
                } else if self.accept('&') {
                    Kind::Nand
                } else if self.accept('|') {
                    Kind::Nor
                } else {
                    Kind::Not
                };
                self.spelled(kind)
            }
            '<' => {
                let kind = if self.accept('=') {
                    Kind::LessEqual
                } else {
                    Kind::LessThan
                };
                self.spelled(kind)
            }
            '>' => {
                let kind = if self.accept('=') {
                    Kind::GreaterEqual
                } else {
                    Kind::GreaterThan
                };
                self.spelled(kind)
            }
            '-' => {
                let kind = if self.accept('>') {
                    Kind::Maplet
                } else {
                    Kind::Subtract
                };
                self.spelled(kind)
            }
            '.' => {
                if self.at() == Some('.') && self.peek() == Some('.') {
                    self.advance();
                    self.advance();
                    self.spelled(Kind::Ellipsis)
                } else {
                    self.spelled(Kind::Illegal)
                }
            }
            c => self.spelled(single_char_kind(c).unwrap_or(Kind::Illegal)),
        }
    }

    fn identifier(&mut self) -> Token {
        self.advance_while(|c| c == '_' || c.is_ascii_alphanumeric());
        let ident = self.lexeme();
        let kind = keyword_kind(ident).unwrap_or(Kind::Identifier);
        self.create_token(kind, Some(ident.to_string()))
    }

    fn number(&mut self) -> Token {
        self.advance_while(|c| c == '_' || c == '.' || c.is_ascii_digit());
        let kind = match self.lexeme().matches('.').count() {
            0 => Kind::Integer,
            1 => Kind::Float,
            _ => Kind::Illegal,
        };
        self.spelled(kind)
    }

    fn string(&mut self) -> Token {
        self.advance_while(|c| c != '"' && !is_line_terminator(c));
        if self.accept('"') {
            self.spelled(Kind::String)
        } else {
            self.spelled(Kind::Illegal)
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }
        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

fn is_line_terminator(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// Reserved words, plus the literals that are spelled like identifiers.
pub fn keyword_kind(ident: &str) -> Option<Kind> {
    match ident {
        "as" => Some(Kind::As),
        "from" => Some(Kind::From),
        "import" => Some(Kind::Import),
        "of" => Some(Kind::Of),
        "True" | "False" => Some(Kind::Boolean),
        "Infinity" | "NaN" => Some(Kind::Float),
        _ => None,
    }
}

fn single_char_kind(ch: char) -> Option<Kind> {
    match ch {
        '+' => Some(Kind::Add),
        '*' => Some(Kind::Multiply),
        '/' => Some(Kind::Divide),
        '%' => Some(Kind::Modulo),
        '^' => Some(Kind::Exponent),
        '&' => Some(Kind::And),
        '|' => Some(Kind::Or),
        '(' => Some(Kind::LeftParen),
        ')' => Some(Kind::RightParen),
        '[' => Some(Kind::LeftBracket),
        ']' => Some(Kind::RightBracket),
        '{' => Some(Kind::LeftBrace),
        '}' => Some(Kind::RightBrace),
        ',' => Some(Kind::Comma),
        _ => None,
    }
}
