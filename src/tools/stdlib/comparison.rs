//! Equality and integer comparison tools

use crate::error::Result;
use crate::runtime::Value;
use crate::tools::{Tool, ToolRegistry};

/// Register comparison tools
pub fn register(registry: &mut ToolRegistry) {
    registry.register(EqTool);
    registry.register(GtTool);
    registry.register(GtEqTool);
    registry.register(LtTool);
    registry.register(LtEqTool);
}

/// Equality of the first two arguments
///
/// Usage: `(eq? a b) -> bool`
/// Lists compare element-wise, closures by identity.
pub struct EqTool;

impl Tool for EqTool {
    fn name(&self) -> &str {
        "eq?"
    }

    fn description(&self) -> &str {
        "Equality of two values"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        crate::tools::require_args("eq?", args, 2)?;
        Ok(Value::Bool(args[0] == args[1]))
    }
}

macro_rules! int_comparison_tool {
    ($name:ident, $str:expr, $desc:expr, $op:tt) => {
        #[doc = $desc]
        pub struct $name;

        impl Tool for $name {
            fn name(&self) -> &str {
                $str
            }

            fn description(&self) -> &str {
                $desc
            }

            fn arity(&self) -> Option<usize> {
                Some(2)
            }

            fn execute(&self, args: &[Value]) -> Result<Value> {
                crate::tools::require_args($str, args, 2)?;
                let left = args[0].as_int()?;
                let right = args[1].as_int()?;
                Ok(Value::Bool(left $op right))
            }
        }
    };
}

int_comparison_tool!(GtTool, ">", "True if the first integer is greater", >);
int_comparison_tool!(GtEqTool, ">=", "True if the first integer is greater or equal", >=);
int_comparison_tool!(LtTool, "<", "True if the first integer is less", <);
int_comparison_tool!(LtEqTool, "<=", "True if the first integer is less or equal", <=);
