//! Runtime execution for lisp101 programs

mod environment;
mod lisp_evaluator;
mod value;

pub use environment::Environment;
pub use lisp_evaluator::{apply, eval, eval_program, LispEvaluator};
pub use value::{Closure, Value};
