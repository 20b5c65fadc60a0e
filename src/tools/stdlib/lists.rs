//! List primitive tools

use crate::error::{Error, Result};
use crate::runtime::Value;
use crate::tools::{require_args, Tool, ToolRegistry};

/// Register list primitives
pub fn register(registry: &mut ToolRegistry) {
    registry.register(CarTool);
    registry.register(CdrTool);
    registry.register(AppendTool);
    registry.register(NullTool);
}

/// Elements of a list that must not be empty
fn non_empty<'a>(operation: &str, value: &'a Value) -> Result<&'a [Value]> {
    let items = value.as_list()?;
    if items.is_empty() {
        return Err(Error::EmptyCollection {
            operation: operation.to_string(),
        });
    }
    Ok(items)
}

/// CAR - first element of a list
///
/// Usage: `(car list) -> value`
/// Example: `(car '(1 2))` returns `1`
pub struct CarTool;

impl Tool for CarTool {
    fn name(&self) -> &str {
        "car"
    }

    fn description(&self) -> &str {
        "First element of a non-empty list"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        require_args("car", args, 1)?;
        let items = non_empty("car", &args[0])?;
        Ok(items[0].clone())
    }
}

/// CDR - everything after the first element
///
/// Usage: `(cdr list) -> list`
/// Example: `(cdr '(1 2 3))` returns `(2 3)`
pub struct CdrTool;

impl Tool for CdrTool {
    fn name(&self) -> &str {
        "cdr"
    }

    fn description(&self) -> &str {
        "Remaining elements of a non-empty list"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        require_args("cdr", args, 1)?;
        let items = non_empty("cdr", &args[0])?;
        Ok(Value::list(items[1..].to_vec()))
    }
}

/// APPEND - concatenate lists
///
/// Usage: `(append list...) -> list`
/// Example: `(append '(1) '(2 3))` returns `(1 2 3)`
pub struct AppendTool;

impl Tool for AppendTool {
    fn name(&self) -> &str {
        "append"
    }

    fn description(&self) -> &str {
        "Concatenate all argument lists"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        let mut result = Vec::new();
        for arg in args {
            result.extend_from_slice(arg.as_list()?);
        }
        Ok(Value::list(result))
    }
}

/// NULL? - empty-list test
///
/// Usage: `(null? list) -> bool`
pub struct NullTool;

impl Tool for NullTool {
    fn name(&self) -> &str {
        "null?"
    }

    fn description(&self) -> &str {
        "True if the list is empty"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        require_args("null?", args, 1)?;
        Ok(Value::Bool(args[0].as_list()?.is_empty()))
    }
}
