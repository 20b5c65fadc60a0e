//! Standard builtin library for lisp101

pub mod arithmetic;
pub mod comparison;
pub mod higher_order;
pub mod lists;

use crate::tools::ToolRegistry;

/// Register all standard library tools
pub fn register_all(registry: &mut ToolRegistry) {
    arithmetic::register(registry);
    comparison::register(registry);
    lists::register(registry);
    higher_order::register(registry);
}
