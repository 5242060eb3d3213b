use std::fmt;
use serde::{Deserialize, Serialize};

/// Byte range `[start, end)` of the source consumed for a token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not follow its end");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Token {
    pub kind: Kind,
    /// Lexeme copied out of the source. `None` for line separators and end-of-input.
    pub text: Option<String>,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column (in characters) of the first character.
    pub column: usize,
}

impl Token {
    pub fn new(kind: Kind, text: Option<String>, span: Span, line: usize, column: usize) -> Self {
        Self {
            kind,
            text,
            span,
            line,
            column,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_illegal(&self) -> bool {
        self.kind == Kind::Illegal
    }

    pub fn is_eof(&self) -> bool {
        self.kind == Kind::EndOfInput
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} {}", self.kind, text),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Kind {
    // Special
    EndOfInput,
    Illegal,
    LineSeparator, // \n, \r and the blank run after them
    Comment,       // // ...

    // Literals
    Identifier, // [A-Za-z_][A-Za-z0-9_]*
    Integer,    // 1_000
    Float,      // 12.34, Infinity, NaN
    Boolean,    // True, False
    String,     // "..."
    Character,  // reserved, never produced

    // Arithmetic
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    Modulo,   // %
    Exponent, // ^

    // Comparison
    LessThan,     // <
    GreaterThan,  // >
    LessEqual,    // <=
    GreaterEqual, // >=
    Equals,       // =
    NotEqual,     // !=

    // Assignment
    LeftAssign,  // :=
    RightAssign, // =:

    // Logical
    Not,  // !
    And,  // &
    Or,   // |
    Nand, // !&
    Nor,  // !|

    Implies, // =>
    Maplet,  // ->

    // Brackets and delimiters
    LeftParen,    // (
    RightParen,   // )
    LeftBracket,  // [
    RightBracket, // ]
    LeftBrace,    // {
    RightBrace,   // }
    Colon,        // :
    Comma,        // ,
    Ellipsis,     // ...

    // Keywords
    As,
    From,
    Import,
    Of,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::EndOfInput => "EndOfInput",
            Kind::Illegal => "Illegal",
            Kind::LineSeparator => "LineSeparator",
            Kind::Comment => "Comment",
            Kind::Identifier => "Identifier",
            Kind::Integer => "Integer",
            Kind::Float => "Float",
            Kind::Boolean => "Boolean",
            Kind::String => "String",
            Kind::Character => "Character",
            Kind::Add => "Add",
            Kind::Subtract => "Subtract",
            Kind::Multiply => "Multiply",
            Kind::Divide => "Divide",
            Kind::Modulo => "Modulo",
            Kind::Exponent => "Exponent",
            Kind::LessThan => "LessThan",
            Kind::GreaterThan => "GreaterThan",
            Kind::LessEqual => "LessEqual",
            Kind::GreaterEqual => "GreaterEqual",
            Kind::Equals => "Equals",
            Kind::NotEqual => "NotEqual",
            Kind::LeftAssign => "LeftAssign",
            Kind::RightAssign => "RightAssign",
            Kind::Not => "Not",
            Kind::And => "And",
            Kind::Or => "Or",
            Kind::Nand => "Nand",
            Kind::Nor => "Nor",
            Kind::Implies => "Implies",
            Kind::Maplet => "Maplet",
            Kind::LeftParen => "LeftParen",
            Kind::RightParen => "RightParen",
            Kind::LeftBracket => "LeftBracket",
            Kind::RightBracket => "RightBracket",
            Kind::LeftBrace => "LeftBrace",
            Kind::RightBrace => "RightBrace",
            Kind::Colon => "Colon",
            Kind::Comma => "Comma",
            Kind::Ellipsis => "Ellipsis",
            Kind::As => "As",
            Kind::From => "From",
            Kind::Import => "Import",
            Kind::Of => "Of",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Kind::Identifier
                | Kind::Integer
                | Kind::Float
                | Kind::Boolean
                | Kind::String
                | Kind::Character
        )
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Kind::As | Kind::From | Kind::Import | Kind::Of)
    }

    /// Operators and punctuation alike.
    pub fn is_operator(&self) -> bool {
        !self.is_literal()
            && !self.is_keyword()
            && !matches!(
                self,
                Kind::EndOfInput | Kind::Illegal | Kind::LineSeparator | Kind::Comment
            )
    }

    /// Binding power of the operator in binary position; 0 when it is not one.
    pub fn precedence(&self) -> u8 {
        match self {
            Kind::Or => 1,
            Kind::And => 2,
            Kind::Equals
            | Kind::NotEqual
            | Kind::LessThan
            | Kind::GreaterThan
            | Kind::LessEqual
            | Kind::GreaterEqual => 3,
            Kind::Add | Kind::Subtract => 4,
            Kind::Multiply | Kind::Divide | Kind::Modulo => 5,
            Kind::Exponent => 6,
            Kind::Not => 7,
            _ => 0,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_disjoint() {
        let kinds = [
            Kind::Identifier,
            Kind::Float,
            Kind::Character,
            Kind::Add,
            Kind::Ellipsis,
            Kind::Maplet,
            Kind::Import,
            Kind::Of,
            Kind::Comment,
            Kind::EndOfInput,
        ];
        for kind in kinds {
            let classes = [kind.is_literal(), kind.is_operator(), kind.is_keyword()];
            assert!(
                classes.iter().filter(|c| **c).count() <= 1,
                "{kind} belongs to more than one class"
            );
        }
        assert!(!Kind::Comment.is_operator());
        assert!(!Kind::Illegal.is_literal());
        assert!(Kind::LeftBrace.is_operator());
    }

    #[test]
    fn precedence_orders_binary_operators() {
        assert!(Kind::Or.precedence() < Kind::And.precedence());
        assert!(Kind::And.precedence() < Kind::NotEqual.precedence());
        assert!(Kind::GreaterEqual.precedence() < Kind::Subtract.precedence());
        assert!(Kind::Add.precedence() < Kind::Modulo.precedence());
        assert!(Kind::Divide.precedence() < Kind::Exponent.precedence());
        assert!(Kind::Exponent.precedence() < Kind::Not.precedence());
        assert_eq!(Kind::LeftAssign.precedence(), 0);
        assert_eq!(Kind::Identifier.precedence(), 0);
    }

    #[test]
    fn display_prints_kind_then_text() {
        let token = Token::new(Kind::Identifier, Some("x".to_string()), Span::new(0, 1), 1, 1);
        assert_eq!(token.to_string(), "Identifier x");

        let token = Token::new(Kind::LineSeparator, None, Span::new(1, 2), 1, 2);
        assert_eq!(token.to_string(), "LineSeparator");
    }
}
