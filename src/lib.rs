//! Storr lexical front end.
//!
//! Turns source text into a flat list of [`Token`]s ending in exactly one
//! [`Kind::EndOfInput`]. Malformed input shows up as [`Kind::Illegal`] tokens
//! rather than errors, so a scan always runs to the end of the buffer.

pub mod config;
pub mod dump;
pub mod error;
pub mod lexer;
pub mod token;

pub use error::{LexingError, StorrError};
pub use lexer::Lexer;
pub use token::{Kind, Span, Token};

/// Scan `source` in one pass.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
