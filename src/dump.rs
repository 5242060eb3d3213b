//! Token dump used by the `storr` binary.

use crate::config::{Config, OutputFormat};
use crate::error::StorrError;
use crate::token::{Kind, Token};

/// Render `tokens` according to `config`. Text output ends with a newline.
pub fn render(tokens: &[Token], config: &Config) -> Result<String, StorrError> {
    let shown: Vec<&Token> = tokens
        .iter()
        .filter(|token| !(config.skip_comments && token.kind == Kind::Comment))
        .collect();

    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&shown)? + "\n"),
        OutputFormat::Text => {
            let mut out = String::new();
            for token in shown {
                if config.positions {
                    out.push_str(&with_position(token));
                } else {
                    out.push_str(&token.to_string());
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}

fn with_position(token: &Token) -> String {
    let line = format!(
        "{:>4}:{:<5}{:<17}{}",
        token.line,
        token.column,
        token.kind.name(),
        token.text().unwrap_or_default(),
    );
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text() {
        let tokens = Lexer::new("x := 1 // one\n").tokenize();
        let out = render(&tokens, &Config::default()).unwrap();
        assert_eq!(
            out,
            "Identifier x\nLeftAssign :=\nInteger 1\nComment // one\nLineSeparator\nEndOfInput\n"
        );
    }

    #[test]
    fn comments_can_be_skipped() {
        let tokens = Lexer::new("// only a comment").tokenize();
        let config = Config {
            skip_comments: true,
            ..Config::default()
        };
        assert_eq!(render(&tokens, &config).unwrap(), "EndOfInput\n");
    }

    #[test]
    fn positions_are_column_aligned() {
        let tokens = Lexer::new("a\n  b").tokenize();
        let config = Config {
            positions: true,
            ..Config::default()
        };
        assert_eq!(
            render(&tokens, &config).unwrap(),
            "   1:1    Identifier       a\n   1:2    LineSeparator\n   2:3    Identifier       b\n   2:4    EndOfInput\n"
        );
    }

    #[test]
    fn json_array_of_tokens() {
        let tokens = Lexer::new("ok").tokenize();
        let config = Config {
            format: OutputFormat::Json,
            ..Config::default()
        };
        let out = render(&tokens, &config).unwrap();
        let parsed: Vec<Token> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, tokens);
        assert!(out.contains("\"kind\": \"Identifier\""));
    }
}
