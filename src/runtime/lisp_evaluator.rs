use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::{Closure, Environment, Value};
use crate::tools::{require_args, ToolRegistry};

/// LISP evaluator session
///
/// Owns one global environment and evaluates programs against it, so
/// definitions made by one call are visible to the next. Special forms:
/// - `(define name value)` - bind in the current frame
/// - `(lambda (params...) body...)` / `(λ ...)` - lexical closure
/// - `(if cond then else)` - boolean conditional
/// - `(quote expr)` - unevaluated data
///
/// Evaluation recurses on the host stack. Deeply nested or unboundedly
/// recursive programs can overflow it, which aborts the process.
///
/// Dropping the evaluator clears its global frame, releasing closures that
/// captured it. Closures returned from the session and kept past that point
/// no longer see its global bindings. Frames of calls that defined a local
/// closure stay allocated, empty of globals, until the process exits.
pub struct LispEvaluator {
    env: Environment,
}

impl LispEvaluator {
    /// Creates a new evaluator with the standard builtin library
    pub fn new() -> Self {
        Self::with_env(Environment::global())
    }

    /// Creates a new evaluator whose global frame holds the tools in `registry`
    pub fn with_registry(registry: ToolRegistry) -> Self {
        Self::with_env(Environment::with_registry(&registry))
    }

    fn with_env(env: Environment) -> Self {
        LispEvaluator { env }
    }

    /// The session's global environment
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Evaluates every top-level form in order, returning all results
    pub fn execute(&mut self, forms: &[Value]) -> Result<Vec<Value>> {
        eval_program(forms, &self.env)
    }

    /// Parses and executes `source`
    pub fn run(&mut self, source: &str) -> Result<Vec<Value>> {
        let forms = crate::parse(source)?;
        self.execute(&forms)
    }

    /// Evaluates a single expression in the global environment
    pub fn evaluate_expression(&self, expr: &Value) -> Result<Value> {
        eval(expr, &self.env)
    }
}

impl Default for LispEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LispEvaluator {
    fn drop(&mut self) {
        self.env.clear();
    }
}

/// Evaluates each form against `env` in sequence
///
/// Earlier definitions are visible to later forms. The first failure aborts
/// the whole call; no partial results are returned.
pub fn eval_program(forms: &[Value], env: &Environment) -> Result<Vec<Value>> {
    forms.iter().map(|form| eval(form, env)).collect()
}

/// Evaluates one expression in `env`
pub fn eval(expr: &Value, env: &Environment) -> Result<Value> {
    match expr {
        Value::Symbol(atom) => eval_atom(atom, env),
        Value::List(items) => eval_list(expr, items, env),
        // Everything else evaluates to itself
        _ => Ok(expr.clone()),
    }
}

/// Calls a closure or builtin with already-evaluated arguments
pub fn apply(func: &Value, args: &[Value]) -> Result<Value> {
    match func {
        Value::Builtin(tool) => {
            if let Some(min) = tool.arity() {
                require_args(tool.name(), args, min)?;
            }
            tool.execute(args)
        }
        Value::Closure(closure) => call_closure(closure, args),
        other => Err(Error::NotCallable {
            type_name: other.type_name(),
        }),
    }
}

fn eval_atom(atom: &str, env: &Environment) -> Result<Value> {
    if let Some(rest) = atom.strip_prefix('"') {
        return match rest.strip_suffix('"') {
            Some(text) => Ok(Value::String(text.to_string())),
            None => Err(Error::invalid_args(
                "string literal",
                format!("missing closing quote in {}", atom),
            )),
        };
    }

    if atom.starts_with('\'') {
        return Ok(Value::Symbol(atom.to_string()));
    }

    env.get(atom)
}

fn eval_list(expr: &Value, items: &[Value], env: &Environment) -> Result<Value> {
    let Some((head, args)) = items.split_first() else {
        return Ok(expr.clone());
    };

    if let Value::Symbol(keyword) = head {
        match keyword.as_str() {
            "define" => return eval_define(args, env),
            "lambda" | "λ" => return eval_lambda(args, env),
            "if" => return eval_if(args, env),
            "quote" => return eval_quote(args),
            _ => {}
        }
    }

    let func = eval(head, env)?;
    if !func.is_callable() {
        return Err(Error::NotCallable {
            type_name: func.type_name(),
        });
    }

    let arg_values = args
        .iter()
        .map(|arg| eval(arg, env))
        .collect::<Result<Vec<_>>>()?;

    apply(&func, &arg_values)
}

fn call_closure(closure: &Closure, args: &[Value]) -> Result<Value> {
    if args.len() < closure.params.len() {
        return Err(Error::ArityError {
            name: "lambda".to_string(),
            expected: closure.params.len(),
            got: args.len(),
        });
    }

    tracing::trace!(
        params = closure.params.len(),
        args = args.len(),
        "applying closure"
    );

    // One fresh frame per call; surplus arguments are ignored
    let frame = closure.env.child();
    for (param, arg) in closure.params.iter().zip(args) {
        frame.define(param.clone(), arg.clone());
    }

    let mut result = Value::Void;
    for form in &closure.body {
        result = eval(form, &frame)?;
    }
    Ok(result)
}

// LISP Special Forms Implementation

/// (define name value) - bind in the current frame
///
/// A literal symbol names the binding directly. Any other name form is
/// evaluated and must yield a symbol or a string. Either way a leading `'`
/// is dropped, so `(define 'x 1)` binds `x`.
fn eval_define(args: &[Value], env: &Environment) -> Result<Value> {
    if args.len() != 2 {
        return Err(Error::invalid_args(
            "define",
            format!("Expected 2 arguments, got {}", args.len()),
        ));
    }

    let value = eval(&args[1], env)?;

    let name = match &args[0] {
        Value::Symbol(name) => binding_name(name),
        other => match eval(other, env)? {
            Value::Symbol(s) => binding_name(&s),
            Value::String(s) => s,
            v => return Err(Error::type_error("symbol as define target", v.type_name())),
        },
    };

    tracing::debug!(name = %name, kind = %value.type_name(), "define");
    env.define(name, value);

    Ok(Value::Void)
}

fn binding_name(symbol: &str) -> String {
    symbol.strip_prefix('\'').unwrap_or(symbol).to_string()
}

/// (lambda (params...) body...) - capture the current frame by reference
fn eval_lambda(args: &[Value], env: &Environment) -> Result<Value> {
    if args.len() < 2 {
        return Err(Error::invalid_args(
            "lambda",
            "Expected a parameter list and at least one body form",
        ));
    }

    let params = match &args[0] {
        Value::List(params) => params
            .iter()
            .map(|param| match param {
                Value::Symbol(name) => Ok(name.clone()),
                other => Err(Error::invalid_args(
                    "lambda",
                    format!("parameter must be a symbol, got {}", other.type_name()),
                )),
            })
            .collect::<Result<Vec<_>>>()?,
        other => {
            return Err(Error::invalid_args(
                "lambda",
                format!("parameter list must be a list, got {}", other.type_name()),
            ))
        }
    };

    Ok(Value::Closure(Rc::new(Closure {
        params,
        body: args[1..].to_vec(),
        env: env.clone(),
    })))
}

/// (if cond then else) - no truthiness: the condition must be a boolean
fn eval_if(args: &[Value], env: &Environment) -> Result<Value> {
    if args.len() != 3 {
        return Err(Error::invalid_args(
            "if",
            format!("Expected condition, then and else, got {} forms", args.len()),
        ));
    }

    let cond = match &args[0] {
        Value::Bool(b) => *b,
        other => match eval(other, env)? {
            Value::Bool(b) => b,
            v => return Err(Error::type_error("bool as if condition", v.type_name())),
        },
    };

    if cond {
        eval(&args[1], env)
    } else {
        eval(&args[2], env)
    }
}

/// (quote expr) - the parsed form itself
fn eval_quote(args: &[Value]) -> Result<Value> {
    match args {
        [expr] => Ok(expr.clone()),
        _ => Err(Error::invalid_args(
            "quote",
            format!("Expected 1 argument, got {}", args.len()),
        )),
    }
}
