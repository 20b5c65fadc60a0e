//! Integer arithmetic tools

use crate::error::{Error, Result};
use crate::runtime::Value;
use crate::tools::{Tool, ToolRegistry};

/// Register arithmetic tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(AddTool);
    registry.register(SubTool);
    registry.register(MulTool);
}

fn overflow(op: &str) -> Error {
    Error::IntegerOverflow { op: op.to_string() }
}

/// Sum of all arguments
///
/// Usage: `(+ int...) -> int`
/// Example: `(+ 1 2 3)` returns `6`, `(+)` returns `0`
pub struct AddTool;

impl Tool for AddTool {
    fn name(&self) -> &str {
        "+"
    }

    fn description(&self) -> &str {
        "Sum of integers"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        let mut acc: i64 = 0;
        for arg in args {
            acc = acc.checked_add(arg.as_int()?).ok_or_else(|| overflow("+"))?;
        }
        Ok(Value::Int(acc))
    }
}

/// Subtraction, or negation with a single argument
///
/// Usage: `(- int int...) -> int`
/// Example: `(- 10 3 2)` returns `5`, `(- 5)` returns `-5`
pub struct SubTool;

impl Tool for SubTool {
    fn name(&self) -> &str {
        "-"
    }

    fn description(&self) -> &str {
        "Difference of integers, or negation of one integer"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        let first = args
            .first()
            .ok_or_else(|| Error::invalid_args("-", "Expected at least one argument"))?
            .as_int()?;

        if args.len() == 1 {
            return first
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| overflow("-"));
        }

        let mut acc = first;
        for arg in &args[1..] {
            acc = acc.checked_sub(arg.as_int()?).ok_or_else(|| overflow("-"))?;
        }
        Ok(Value::Int(acc))
    }
}

/// Product of all arguments
///
/// Usage: `(* int...) -> int`
/// Example: `(* 2 3 4)` returns `24`, `(*)` returns `1`
pub struct MulTool;

impl Tool for MulTool {
    fn name(&self) -> &str {
        "*"
    }

    fn description(&self) -> &str {
        "Product of integers"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        let mut acc: i64 = 1;
        for arg in args {
            acc = acc.checked_mul(arg.as_int()?).ok_or_else(|| overflow("*"))?;
        }
        Ok(Value::Int(acc))
    }
}
