use crate::token::Token;
use std::fmt;
use std::path::{Path, PathBuf};
use std::error::Error;

#[derive(Debug, thiserror::Error)]
pub enum StorrError {
    #[error("IOError: cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ConfigError: invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("SerializeError: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("LexingError: {0} illegal token(s) found")]
    Lexing(usize),
}

/// Human-readable report for one illegal token.
#[derive(Debug, PartialEq)]
pub struct LexingError {
    pub(crate) path: PathBuf,
    pub(crate) message: String,
    pub(crate) text: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Error for LexingError {}

impl LexingError {
    pub fn new(path: PathBuf, message: String, text: String, line: usize, column: usize) -> Self {
        Self {
            path,
            message,
            text,
            line,
            column,
        }
    }

    /// Describe why `token` was rejected. Returns `None` for anything but illegal tokens.
    pub fn from_token(path: PathBuf, token: &Token) -> Option<Self> {
        if !token.is_illegal() {
            return None;
        }
        let text = token.text().unwrap_or_default().to_string();
        let message = describe_illegal(&text);
        Some(Self::new(path, message, text, token.line, token.column))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn describe_illegal(text: &str) -> String {
    let first = text.chars().next();
    match first {
        Some('"') => format!("Unterminated string literal {}", text),
        Some('\'') => "Character literals are not supported".to_string(),
        Some('.') => "Expected '...' but found a lone '.'".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Malformed number {} has more than one decimal point", text),
        Some(c) => format!("Unrecognized character {}", c),
        None => "Illegal token".to_string(),
    }
}

/// Collect a diagnostic for every illegal token in `tokens`.
pub fn diagnostics(path: &Path, tokens: &[Token]) -> Vec<LexingError> {
    tokens
        .iter()
        .filter_map(|token| LexingError::from_token(path.to_path_buf(), token))
        .collect()
}

impl fmt::Display for LexingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "LexingError: {}\n  --> {}:{}:{}",
            self.message,
            self.path.display(),
            self.line,
            self.column,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    fn messages(source: &str) -> Vec<String> {
        let tokens = Lexer::new(source).tokenize();
        diagnostics(Path::new("main.st"), &tokens)
            .into_iter()
            .map(|d| d.message().to_string())
            .collect()
    }

    #[test]
    fn clean_source_has_no_diagnostics() {
        assert!(messages("a := b + 1.5 // ok\n").is_empty());
    }

    #[test]
    fn each_illegal_token_gets_a_message() {
        assert_eq!(
            messages("'x' 1.2.3 . ? \"open"),
            vec![
                "Character literals are not supported".to_string(),
                "Character literals are not supported".to_string(),
                "Malformed number 1.2.3 has more than one decimal point".to_string(),
                "Expected '...' but found a lone '.'".to_string(),
                "Unrecognized character ?".to_string(),
                "Unterminated string literal \"open".to_string(),
            ]
        );
    }

    #[test]
    fn rendered_with_location() {
        let tokens = Lexer::new("x\n  ?").tokenize();
        let diagnostic = diagnostics(Path::new("main.st"), &tokens).remove(0);
        assert_eq!(
            diagnostic.to_string(),
            "LexingError: Unrecognized character ?\n  --> main.st:2:3\n"
        );
    }

    #[test]
    fn only_illegal_tokens_qualify() {
        let tokens = Lexer::new("x").tokenize();
        assert!(LexingError::from_token(PathBuf::from("main.st"), &tokens[0]).is_none());
    }

    #[test]
    fn keeps_the_offending_text() {
        let tokens = Lexer::new("a := \"unfinished").tokenize();
        let reports = diagnostics(Path::new("main.st"), &tokens);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].text(), "\"unfinished");
        assert_eq!(tokens[2].span.len(), reports[0].text().len());
    }
}
