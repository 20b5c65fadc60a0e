//! lisp101 parser module
//!
//! Builds nested S-expression lists from scanner tokens.

mod sexpr_parser;

pub use sexpr_parser::{BracketKind, SExprParser};
