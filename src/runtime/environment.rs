use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::Value;
use crate::tools::ToolRegistry;

/// Environment for variable scoping
///
/// A handle to one binding frame. Cloning the handle shares the frame, which
/// is how closures capture their defining scope by reference. Frames form a
/// tree rooted at the global frame; a frame's parent never changes.
#[derive(Clone)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

/// Single frame in the environment chain
struct Frame {
    /// Variables defined in this frame
    variables: HashMap<String, Value>,
    /// Enclosing frame (None for the global frame)
    parent: Option<Environment>,
}

impl Environment {
    /// Creates an empty root frame with no builtins
    pub fn new() -> Self {
        Environment {
            frame: Rc::new(RefCell::new(Frame {
                variables: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Creates the global frame populated with the standard builtin library
    pub fn global() -> Self {
        Self::with_registry(&ToolRegistry::new())
    }

    /// Creates a root frame populated with every tool in `registry`
    pub fn with_registry(registry: &ToolRegistry) -> Self {
        let env = Environment::new();
        for tool in registry.tools() {
            env.define(tool.name().to_string(), Value::Builtin(tool));
        }
        tracing::debug!(builtins = registry.len(), "global environment initialized");
        env
    }

    /// Creates an empty frame nested inside `parent`
    pub fn with_parent(parent: &Environment) -> Self {
        Environment {
            frame: Rc::new(RefCell::new(Frame {
                variables: HashMap::new(),
                parent: Some(parent.clone()),
            })),
        }
    }

    /// Creates an empty frame nested inside this one
    pub fn child(&self) -> Self {
        Self::with_parent(self)
    }

    /// Binds `name` in this frame only, replacing any previous binding
    pub fn define(&self, name: String, value: Value) {
        self.frame.borrow_mut().variables.insert(name, value);
    }

    /// Looks `name` up in this frame only
    pub fn local_lookup(&self, name: &str) -> Option<Value> {
        self.frame.borrow().variables.get(name).cloned()
    }

    /// Looks `name` up in this frame, then each enclosing frame in turn
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let frame = current.frame.borrow();
                if let Some(val) = frame.variables.get(name) {
                    return Some(val.clone());
                }
                frame.parent.clone()
            };
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }

    /// Gets the value of a variable by name, searching the whole chain
    pub fn get(&self, name: &str) -> Result<Value> {
        self.lookup(name).ok_or_else(|| Error::UnboundVariable {
            name: name.to_string(),
        })
    }

    /// Checks if `name` is bound in this frame
    pub fn contains_local(&self, name: &str) -> bool {
        self.frame.borrow().variables.contains_key(name)
    }

    /// Returns the number of frames in the chain (1 for a root frame)
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut parent = self.frame.borrow().parent.clone();
        while let Some(p) = parent {
            depth += 1;
            parent = p.frame.borrow().parent.clone();
        }
        depth
    }

    /// Returns true if both handles refer to the same frame
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }

    /// Removes every binding from this frame
    ///
    /// A closure bound in the frame it captured keeps that frame alive
    /// through an `Rc` cycle. Clearing the frame breaks the cycle so the
    /// bindings (and the builtins they hold) can be released.
    pub fn clear(&self) {
        // Take the map first: dropping closures re-enters this RefCell
        let old = std::mem::take(&mut self.frame.borrow_mut().variables);
        drop(old);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    // Frame contents can hold closures that point back at this frame.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<String> = self.frame.borrow().variables.keys().cloned().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("names", &names)
            .finish()
    }
}
