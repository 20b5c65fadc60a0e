//! Lexical analysis for lisp101
//!
//! Converts source text into a flat stream of bracket and atom tokens.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::SExprScanner;
pub use token::{Token, TokenKind};
