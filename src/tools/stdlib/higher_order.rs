//! Higher-order list tools
//!
//! Each tool calls back into the evaluator through [`apply`], so the
//! callable may be a closure or another builtin. The callable always receives
//! one list element per step (plus the accumulator for `fold`).

use crate::error::{Error, Result};
use crate::runtime::{apply, Value};
use crate::tools::{require_args, Tool, ToolRegistry};

/// Register higher-order tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(MapTool);
    registry.register(FilterTool);
    registry.register(FoldTool);
}

fn callable<'a>(tool: &str, value: &'a Value) -> Result<&'a Value> {
    if value.is_callable() {
        Ok(value)
    } else {
        Err(Error::type_error(
            format!("procedure as first argument of {}", tool),
            value.type_name(),
        ))
    }
}

/// MAP - apply a procedure to every element
///
/// Usage: `(map f list) -> list`
/// Example: `(map (lambda (x) (* x x)) '(1 2 3))` returns `(1 4 9)`
pub struct MapTool;

impl Tool for MapTool {
    fn name(&self) -> &str {
        "map"
    }

    fn description(&self) -> &str {
        "List of results of applying a procedure to each element"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        require_args("map", args, 2)?;
        let func = callable("map", &args[0])?;
        let items = args[1].as_list()?;

        let mapped = items
            .iter()
            .map(|item| apply(func, std::slice::from_ref(item)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::list(mapped))
    }
}

/// FILTER - keep elements satisfying a predicate
///
/// Usage: `(filter pred list) -> list`
/// The predicate must return a boolean; anything else is a type error.
pub struct FilterTool;

impl Tool for FilterTool {
    fn name(&self) -> &str {
        "filter"
    }

    fn description(&self) -> &str {
        "Elements for which the predicate returns #t"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        require_args("filter", args, 2)?;
        let pred = callable("filter", &args[0])?;
        let items = args[1].as_list()?;

        let mut kept = Vec::new();
        for item in items {
            if apply(pred, std::slice::from_ref(item))?.as_bool()? {
                kept.push(item.clone());
            }
        }
        Ok(Value::list(kept))
    }
}

/// FOLD - left fold with an initial accumulator
///
/// Usage: `(fold f init list) -> value`
/// Example: `(fold + 0 '(1 2 3))` returns `6`; `f` is called as `(f acc elem)`.
pub struct FoldTool;

impl Tool for FoldTool {
    fn name(&self) -> &str {
        "fold"
    }

    fn description(&self) -> &str {
        "Left fold of a list with a two-argument procedure"
    }

    fn arity(&self) -> Option<usize> {
        Some(3)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        require_args("fold", args, 3)?;
        let func = callable("fold", &args[0])?;
        let items = args[2].as_list()?;

        items.iter().try_fold(args[1].clone(), |acc, item| {
            apply(func, &[acc, item.clone()])
        })
    }
}
