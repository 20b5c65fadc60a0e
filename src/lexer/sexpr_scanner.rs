use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for S-expression source text
pub struct SExprScanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Line where the current token started
    start_line: usize,
    /// Column where the current token started
    start_column: usize,
}

impl SExprScanner {
    /// Creates a new S-expression scanner from source code
    pub fn new(source: &str) -> Self {
        SExprScanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    ///
    /// The returned vector always ends with a single [`TokenKind::Eof`].
    /// The only failure is an unterminated string literal.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            self.line,
            self.column,
        ));

        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            c if c.is_whitespace() => {}

            ';' => self.skip_line_comment(),

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '[' => self.add_token(TokenKind::LeftBracket),
            ']' => self.add_token(TokenKind::RightBracket),

            // Quote sugar only fuses with an opener that follows immediately
            '\'' => {
                if self.match_char('(') {
                    self.add_token(TokenKind::QuoteParen);
                } else if self.match_char('[') {
                    self.add_token(TokenKind::QuoteBracket);
                } else {
                    self.scan_atom();
                }
            }

            '"' => self.scan_string()?,

            _ => self.scan_atom(),
        }

        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    /// A double-quoted run stays one atom, quotes included, along with any
    /// text after the closing quote up to the next delimiter
    fn scan_string(&mut self) -> Result<()> {
        while !self.is_at_end() && self.peek() != '"' {
            self.advance();
        }

        if self.is_at_end() {
            return Err(Error::SyntaxError {
                line: self.start_line,
                col: self.start_column,
                message: "Unterminated string literal".to_string(),
            });
        }

        self.advance(); // Closing "
        self.scan_atom();
        Ok(())
    }

    fn scan_atom(&mut self) {
        while !self.is_at_end() && !Self::is_delimiter(self.peek()) {
            self.advance();
        }

        self.add_atom();
    }

    fn is_delimiter(c: char) -> bool {
        c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ';')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn add_atom(&mut self) {
        let text = self.lexeme();
        self.add_token(TokenKind::Atom(text));
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(
            kind,
            lexeme,
            self.start_line,
            self.start_column,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = SExprScanner::new(source);
        scanner
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn atom(s: &str) -> TokenKind {
        TokenKind::Atom(s.to_string())
    }

    #[test]
    fn test_simple_sexpr() {
        let tokens = kinds("(+ 1 2)");

        assert_eq!(tokens.len(), 6); // ( + 1 2 ) EOF
        assert_eq!(tokens[0], TokenKind::LeftParen);
        assert_eq!(tokens[1], atom("+"));
        assert_eq!(tokens[2], atom("1"));
        assert_eq!(tokens[3], atom("2"));
        assert_eq!(tokens[4], TokenKind::RightParen);
        assert_eq!(tokens[5], TokenKind::Eof);
    }

    #[test]
    fn test_brackets_need_no_spaces() {
        let tokens = kinds("[car(x)]");
        assert_eq!(
            tokens,
            vec![
                TokenKind::LeftBracket,
                atom("car"),
                TokenKind::LeftParen,
                atom("x"),
                TokenKind::RightParen,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quote_fuses_with_opener() {
        assert_eq!(kinds("'(1)")[0], TokenKind::QuoteParen);
        assert_eq!(kinds("'[1]")[0], TokenKind::QuoteBracket);
    }

    #[test]
    fn test_quoted_symbol_is_atom() {
        assert_eq!(kinds("'foo"), vec![atom("'foo"), TokenKind::Eof]);
    }

    #[test]
    fn test_string_keeps_spaces() {
        let tokens = kinds("(f \"a (b) c\")");
        assert_eq!(tokens[2], atom("\"a (b) c\""));
        assert_eq!(tokens[3], TokenKind::RightParen);
    }

    #[test]
    fn test_string_run_extends_to_delimiter() {
        assert_eq!(
            kinds("(f \"ab\"cd)"),
            vec![
                TokenKind::LeftParen,
                atom("f"),
                atom("\"ab\"cd"),
                TokenKind::RightParen,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("\"a b\"c d")[..2], [atom("\"a b\"c"), atom("d")]);
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = SExprScanner::new("(f\n  \"abc def)");
        match scanner.scan_tokens() {
            Err(Error::SyntaxError { line, col, .. }) => assert_eq!((line, col), (2, 3)),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_comment() {
        let tokens = kinds("; This is a comment\n(+ 1 2) ; trailing");
        assert_eq!(tokens[0], TokenKind::LeftParen);
        assert_eq!(tokens[1], atom("+"));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_positions() {
        let mut scanner = SExprScanner::new("(a\n  bc)");
        let tokens = scanner.scan_tokens().unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 2));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
        assert_eq!(tokens[2].lexeme, "bc");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds("   \n\t "), vec![TokenKind::Eof]);
    }
}
