use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::runtime::Environment;
use crate::tools::Tool;

/// Runtime value representation
///
/// The same type carries parsed source (the parser produces `Int`, `Bool`,
/// `Symbol` and `List`) and evaluation results.
#[derive(Debug, Clone)]
pub enum Value {
    // Primitives
    /// 64-bit integer value
    Int(i64),
    /// Boolean value
    Bool(bool),
    /// String value (produced by evaluating a double-quoted atom)
    String(String),
    /// Raw atom text: a name to look up, a `'quoted` symbol, or an
    /// unevaluated `"string"` literal
    Symbol(String),

    /// Ordered sequence of values, shared by reference
    List(Rc<Vec<Value>>),

    /// Lambda function value (closure)
    Closure(Rc<Closure>),

    /// Native procedure from the builtin library
    Builtin(Arc<dyn Tool>),

    /// Result of forms that produce no value, such as `define`
    Void,
}

/// A user-defined procedure created by `lambda`
pub struct Closure {
    /// Parameter names, bound positionally
    pub params: Vec<String>,
    /// Body forms, evaluated in order; the last one is the result
    pub body: Vec<Value>,
    /// Environment active when the `lambda` form was evaluated
    pub env: Environment,
}

impl fmt::Debug for Closure {
    // The captured frame may contain this closure; printing it would recurse.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Creates a list value from a vector of values
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Rc::new(values))
    }

    /// Creates a symbol value
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(name.to_string())
    }

    /// Creates a string value
    pub fn string(text: &str) -> Self {
        Value::String(text.to_string())
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Symbol(_) => "symbol".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Closure(_) => "closure".to_string(),
            Value::Builtin(_) => "builtin".to_string(),
            Value::Void => "void".to_string(),
        }
    }

    /// Returns true for closures and builtins
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Builtin(_))
    }

    // Type conversion methods. None of them coerce between variants.

    /// Returns the integer value
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(Error::type_error("int", self.type_name())),
        }
    }

    /// Returns the boolean value
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(Error::type_error("bool", self.type_name())),
        }
    }

    /// Returns the elements of a list value
    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items.as_slice()),
            _ => Err(Error::type_error("list", self.type_name())),
        }
    }

    /// Returns the raw text of a symbol
    pub fn as_symbol(&self) -> Result<&str> {
        match self {
            Value::Symbol(s) => Ok(s),
            _ => Err(Error::type_error("symbol", self.type_name())),
        }
    }
}

/// Source-like rendering: strings keep their double quotes
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "#{}", if *b { 't' } else { 'f' }),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, ")")
            }
            Value::Closure(c) => write!(f, "#<lambda({})>", c.params.len()),
            Value::Builtin(tool) => write!(f, "#<builtin {}>", tool.name()),
            Value::Void => write!(f, "#<void>"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // Closures compare by identity
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name() == b.name(),
            (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}

impl PartialEq<Vec<Value>> for Value {
    fn eq(&self, other: &Vec<Value>) -> bool {
        match self {
            Value::List(items) => items.as_ref() == other,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(42).type_name(), "int");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::string("test").type_name(), "string");
        assert_eq!(Value::symbol("x").type_name(), "symbol");
        assert_eq!(Value::list(vec![]).type_name(), "list");
        assert_eq!(Value::Void.type_name(), "void");
    }

    #[test]
    fn test_no_coercion() {
        assert!(Value::Int(1).as_bool().is_err());
        assert!(Value::Bool(true).as_int().is_err());
        assert!(Value::string("1").as_int().is_err());
        assert_eq!(Value::Int(7).as_int().unwrap(), 7);
    }

    #[test]
    fn test_display() {
        let v = Value::list(vec![
            Value::symbol("+"),
            Value::Int(1),
            Value::list(vec![Value::Bool(true), Value::string("hi")]),
        ]);
        assert_eq!(v.to_string(), "(+ 1 (#t \"hi\"))");
        assert_eq!(Value::list(vec![]).to_string(), "()");
        assert_eq!(Value::Bool(false).to_string(), "#f");
    }

    #[test]
    fn test_list_equality_is_structural() {
        let a = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let b = Value::list(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(a, b);
        assert_eq!(a, vec![Value::Int(1), Value::Int(2)]);
        assert_ne!(a, Value::list(vec![Value::Int(1)]));
    }

    #[test]
    fn test_closure_equality_is_identity() {
        let env = Environment::new();
        let make = || {
            Value::Closure(Rc::new(Closure {
                params: vec![],
                body: vec![Value::Int(1)],
                env: env.clone(),
            }))
        };
        let f = make();
        assert_eq!(f, f.clone());
        assert_ne!(f, make());
    }
}
