use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};
use crate::runtime::Value;

/// Which closing bracket the builder is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    /// `(` ... `)`
    Round,
    /// `[` ... `]`
    Square,
    /// Top level: no bracket is open
    None,
}

impl BracketKind {
    fn closer(self) -> &'static str {
        match self {
            BracketKind::Round => "`)`",
            BracketKind::Square => "`]`",
            BracketKind::None => "end of input",
        }
    }
}

/// S-expression list builder
///
/// Turns the flat token stream into nested [`Value::List`]s. Atoms become
/// `Int`, `Bool` or raw `Symbol` values; telling strings, quoted symbols and
/// variable names apart is left to the evaluator.
pub struct SExprParser {
    tokens: Vec<Token>,
    current: usize,
}

impl SExprParser {
    /// Creates a new S-expression parser
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, String::new(), 0, 0));
        }
        SExprParser { tokens, current: 0 }
    }

    /// Parses the tokens into the list of top-level forms
    pub fn parse(&mut self) -> Result<Vec<Value>> {
        let forms = self.build_list(BracketKind::None, None)?;
        tracing::debug!(forms = forms.len(), "parsed program");
        Ok(forms)
    }

    /// Accumulates elements until the `expected` closer (or end of input at top level)
    fn build_list(&mut self, expected: BracketKind, opener: Option<&Token>) -> Result<Vec<Value>> {
        let mut list = Vec::new();

        loop {
            let token = self.advance();

            match &token.kind {
                TokenKind::Eof => {
                    return match opener {
                        None => Ok(list),
                        Some(open) => Err(Error::SyntaxError {
                            line: open.line,
                            col: open.column,
                            message: format!(
                                "Unclosed `{}`: reached end of input while expecting {}",
                                open.lexeme,
                                expected.closer()
                            ),
                        }),
                    };
                }

                TokenKind::LeftParen => {
                    let nested = self.build_list(BracketKind::Round, Some(&token))?;
                    list.push(Value::list(nested));
                }
                TokenKind::LeftBracket => {
                    let nested = self.build_list(BracketKind::Square, Some(&token))?;
                    list.push(Value::list(nested));
                }

                // The only place quote sugar is expanded
                TokenKind::QuoteParen | TokenKind::QuoteBracket => {
                    let kind = if token.kind == TokenKind::QuoteParen {
                        BracketKind::Round
                    } else {
                        BracketKind::Square
                    };
                    let nested = self.build_list(kind, Some(&token))?;
                    list.push(Value::list(vec![
                        Value::symbol("quote"),
                        Value::list(nested),
                    ]));
                }

                TokenKind::RightParen | TokenKind::RightBracket => {
                    let closing = if token.kind == TokenKind::RightParen {
                        BracketKind::Round
                    } else {
                        BracketKind::Square
                    };

                    if expected == BracketKind::None {
                        return Err(Self::syntax_error(
                            &token,
                            format!("Unexpected `{}` with no open bracket", token.lexeme),
                        ));
                    }
                    if closing != expected {
                        return Err(Self::syntax_error(
                            &token,
                            format!("Expected {}, found `{}`", expected.closer(), token.lexeme),
                        ));
                    }
                    return Ok(list);
                }

                TokenKind::Atom(text) => list.push(Self::atom(text)),
            }
        }
    }

    /// Interprets boolean and integer literals; anything else stays raw text
    fn atom(text: &str) -> Value {
        match text {
            "#t" | "#true" => Value::Bool(true),
            "#f" | "#false" => Value::Bool(false),
            _ => match text.parse::<i64>() {
                Ok(n) => Value::Int(n),
                Err(_) => Value::Symbol(text.to_string()),
            },
        }
    }

    // Helper methods

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
            return self.tokens[self.current - 1].clone();
        }
        self.peek().clone()
    }

    fn syntax_error(token: &Token, message: String) -> Error {
        Error::SyntaxError {
            line: token.line,
            col: token.column,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::SExprScanner;

    fn parse_str(source: &str) -> Result<Vec<Value>> {
        let mut scanner = SExprScanner::new(source);
        let tokens = scanner.scan_tokens()?;
        let mut parser = SExprParser::new(tokens);
        parser.parse()
    }

    fn sym(s: &str) -> Value {
        Value::symbol(s)
    }

    #[test]
    fn test_simple_arithmetic() {
        let forms = parse_str("(+ 1 2)").unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0], vec![sym("+"), Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_multiple_top_level_forms() {
        let forms = parse_str("(define x 1) x 42").unwrap();
        assert_eq!(forms.len(), 3);
        assert_eq!(forms[1], sym("x"));
        assert_eq!(forms[2], Value::Int(42));
    }

    #[test]
    fn test_nested_and_square() {
        let forms = parse_str("(f [1 (2)] ())").unwrap();
        let expected = vec![
            sym("f"),
            Value::list(vec![Value::Int(1), Value::list(vec![Value::Int(2)])]),
            Value::list(vec![]),
        ];
        assert_eq!(forms[0], expected);
    }

    #[test]
    fn test_booleans() {
        let forms = parse_str("#t #true #f #false #maybe").unwrap();
        assert_eq!(
            forms,
            vec![
                Value::Bool(true),
                Value::Bool(true),
                Value::Bool(false),
                Value::Bool(false),
                sym("#maybe"),
            ]
        );
    }

    #[test]
    fn test_integers_and_symbols() {
        let forms = parse_str("-7 +3 - 12abc \"hi\" 'x").unwrap();
        assert_eq!(
            forms,
            vec![
                Value::Int(-7),
                Value::Int(3),
                sym("-"),
                sym("12abc"),
                sym("\"hi\""),
                sym("'x"),
            ]
        );
    }

    #[test]
    fn test_quote_sugar_expands() {
        let forms = parse_str("'(1 2) '[a]").unwrap();
        assert_eq!(
            forms[0],
            vec![
                sym("quote"),
                Value::list(vec![Value::Int(1), Value::Int(2)])
            ]
        );
        assert_eq!(forms[1], vec![sym("quote"), Value::list(vec![sym("a")])]);
    }

    #[test]
    fn test_unclosed_bracket() {
        let err = parse_str("(1 2").unwrap_err();
        match err {
            Error::SyntaxError { line, col, .. } => assert_eq!((line, col), (1, 1)),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_bracket() {
        assert!(parse_str("(1 2]").unwrap_err().is_syntax());
        assert!(parse_str("[1 2)").unwrap_err().is_syntax());
        assert!(parse_str("'(1 2]").unwrap_err().is_syntax());
    }

    #[test]
    fn test_unexpected_close() {
        let err = parse_str("1 )").unwrap_err();
        match err {
            Error::SyntaxError { col, message, .. } => {
                assert_eq!(col, 3);
                assert!(message.contains("no open bracket"));
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_program() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("; only a comment").unwrap().is_empty());
    }

    #[test]
    fn test_tokens_without_eof() {
        let tokens = vec![Token::new(TokenKind::Atom("7".to_string()), "7".to_string(), 1, 1)];
        assert_eq!(SExprParser::new(tokens).parse().unwrap(), vec![Value::Int(7)]);
        assert!(SExprParser::new(Vec::new()).parse().unwrap().is_empty());
    }
}
