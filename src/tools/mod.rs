//! Builtin procedure system for lisp101
//!
//! Every builtin is a [`Tool`]. A [`ToolRegistry`] collects them, and
//! [`crate::runtime::Environment::with_registry`] installs them into a global
//! frame as [`crate::runtime::Value::Builtin`] values.

pub mod stdlib;

use crate::error::Result;
use crate::runtime::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Tool trait - all builtin procedures implement this
pub trait Tool: Send + Sync {
    /// Name the tool is bound to in the global environment
    fn name(&self) -> &str;

    /// Tool description
    fn description(&self) -> &str;

    /// Execute the tool on already-evaluated arguments
    fn execute(&self, args: &[Value]) -> Result<Value>;

    /// Minimum number of arguments the tool needs
    fn arity(&self) -> Option<usize> {
        None // None means any number, including zero
    }
}

impl fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tool({})", self.name())
    }
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create new registry with standard library
    pub fn new() -> Self {
        let mut registry = ToolRegistry {
            tools: HashMap::new(),
        };

        stdlib::register_all(&mut registry);

        registry
    }

    /// Create empty registry (for testing and custom sessions)
    pub fn empty() -> Self {
        ToolRegistry {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get tool by exact name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All registered tools, ordered by name
    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let mut tools: Vec<Arc<dyn Tool>> = self.tools.values().cloned().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fails with an arity error unless `args` has at least `expected` elements
pub(crate) fn require_args(tool: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() < expected {
        return Err(crate::error::Error::ArityError {
            name: tool.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Answer;

    impl Tool for Answer {
        fn name(&self) -> &str {
            "answer"
        }

        fn description(&self) -> &str {
            "Always 42"
        }

        fn execute(&self, _args: &[Value]) -> Result<Value> {
            Ok(Value::Int(42))
        }
    }

    #[test]
    fn test_standard_registry() {
        let registry = ToolRegistry::new();
        for name in [
            "+", "-", "*", "eq?", ">", ">=", "<", "<=", "car", "cdr", "append", "null?", "map",
            "filter", "fold",
        ] {
            assert!(registry.has(name), "missing {}", name);
        }
        assert_eq!(registry.len(), 15);
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = ToolRegistry::empty();
        assert!(registry.is_empty());

        registry.register(Answer);
        let tool = registry.get("answer").unwrap();
        assert_eq!(tool.execute(&[]).unwrap(), Value::Int(42));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_tools_sorted_by_name() {
        let names: Vec<String> = ToolRegistry::new()
            .tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
