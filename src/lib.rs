//! # lisp101 - A Minimal LISP Interpreter
//!
//! A small lexically-scoped LISP: S-expression source text is read into
//! nested lists, which are evaluated against a chain of binding frames with
//! four special forms and fifteen native procedures.
//!
//! ## Quick Start
//!
//! ```rust
//! use lisp101::{Evaluator, Parser, Scanner, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = r#"
//!     (define square (lambda (x) (* x x)))
//!     (fold + 0 (map square '(1 2 3)))
//! "#;
//!
//! // Tokenize (scan)
//! let mut scanner = Scanner::new(code);
//! let tokens = scanner.scan_tokens()?;
//!
//! // Build nested lists
//! let mut parser = Parser::new(tokens);
//! let forms = parser.parse()?;
//!
//! // Execute; one result per top-level form
//! let mut evaluator = Evaluator::new();
//! let results = evaluator.execute(&forms)?;
//!
//! assert_eq!(results, vec![Value::Void, Value::Int(14)]);
//! # Ok(())
//! # }
//! ```
//!
//! The same pipeline through the free functions:
//!
//! ```rust
//! use lisp101::{eval_program, parse, Environment, Value};
//!
//! # fn main() -> lisp101::Result<()> {
//! let env = Environment::global();
//! let forms = parse("(define make-adder (lambda (n) (lambda (x) (+ x n)))) ((make-adder 5) 1)")?;
//! let results = eval_program(&forms, &env)?;
//! assert_eq!(results[1], Value::Int(6));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! ### Data Types
//!
//! - **Atoms**: integers `42`, booleans `#t`/`#f`, strings `"a b"`, symbols `foo`
//! - **Lists**: `(1 2 3)` or `[1 2 3]`; the two bracket styles must match
//! - **Quote sugar**: `'(1 2)` reads as `(quote (1 2))`; `'foo` evaluates to itself
//!
//! ### Special Forms
//!
//! - `(define name value)` - bind in the current frame
//! - `(lambda (params...) body...)` or `(λ ...)` - closure over the current frame
//! - `(if cond then else)` - `cond` must be a boolean
//! - `(quote expr)` - the form, unevaluated
//!
//! ### Built-in Functions
//!
//! - **Arithmetic**: `(+ 1 2 3)`, `(- 10 3)`, `(- 5)`, `(* 2 3)`
//! - **Comparison**: `(eq? a b)`, `(> x y)`, `(>= x y)`, `(< x y)`, `(<= x y)`
//! - **Lists**: `(car l)`, `(cdr l)`, `(append l1 l2 ...)`, `(null? l)`
//! - **Higher-order**: `(map f l)`, `(filter pred l)`, `(fold f init l)`
//!
//! ## Error Handling
//!
//! Every failure aborts the current call and is returned as an [`Error`]:
//!
//! ```rust
//! use lisp101::{Error, Evaluator};
//!
//! let mut evaluator = Evaluator::new();
//! match evaluator.run("(car '())") {
//!     Err(Error::EmptyCollection { operation }) => assert_eq!(operation, "car"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ## Threading
//!
//! [`Value`] and [`Environment`] share frames through `Rc<RefCell<_>>` and are
//! not `Send`. Build one global environment per thread.

/// Version of the lisp101 interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod tools;

// Re-export main types
pub use error::{Error, Result};
pub use lexer::{SExprScanner, Token, TokenKind};
pub use parser::{BracketKind, SExprParser};
pub use runtime::{apply, eval, eval_program, Closure, Environment, LispEvaluator, Value};
pub use tools::{Tool, ToolRegistry};

/// Type alias for the S-expression scanner (lexer).
/// Converts raw source text into tokens for the parser.
pub type Scanner = SExprScanner;

/// Type alias for the S-expression parser.
/// Converts tokens into nested list forms.
pub type Parser = SExprParser;

/// Type alias for the LISP evaluator (interpreter).
pub type Evaluator = LispEvaluator;

/// Reads `text` into its top-level forms
pub fn parse(text: &str) -> Result<Vec<Value>> {
    let tokens = SExprScanner::new(text).scan_tokens()?;
    SExprParser::new(tokens).parse()
}
