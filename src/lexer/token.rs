use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// All possible token types
///
/// Atoms keep their raw text. Numbers, booleans and string literals are
/// interpreted later by the parser and evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `'(` - quote sugar fused with a round opener
    QuoteParen,
    /// `'[` - quote sugar fused with a square opener
    QuoteBracket,
    /// Any other run of non-delimiter characters
    Atom(String),
    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns true for `(`, `[`, `'(` and `'[`
    pub fn is_opener(&self) -> bool {
        matches!(
            self,
            TokenKind::LeftParen
                | TokenKind::LeftBracket
                | TokenKind::QuoteParen
                | TokenKind::QuoteBracket
        )
    }
}
