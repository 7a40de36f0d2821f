//! Action executor registry

use std::collections::HashMap;
use std::fmt;

use crate::action::{ActionArgs, ActionKind, ActionResult};
use crate::command::{CommandExecutor, CommandTool};
use crate::error::{ExecutorError, Result};
use crate::executor::Executor;

/// Binds each [`ActionKind`] to the executor that performs it.
#[derive(Default)]
pub struct ActionRegistry {
    executors: HashMap<ActionKind, Box<dyn Executor>>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every action driven by `tool`.
    pub fn for_tool(tool: &CommandTool) -> Self {
        let mut registry = Self::new();
        for kind in ActionKind::ALL {
            registry.register(kind, CommandExecutor::new(kind, tool.clone()));
        }
        registry
    }

    /// Bind `executor` to `kind`, replacing any previous binding.
    pub fn register(&mut self, kind: ActionKind, executor: impl Executor + 'static) {
        self.executors.insert(kind, Box::new(executor));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, kind: ActionKind, executor: impl Executor + 'static) -> Self {
        self.register(kind, executor);
        self
    }

    pub fn get(&self, kind: ActionKind) -> Option<&dyn Executor> {
        self.executors.get(&kind).map(|e| e.as_ref())
    }

    /// Run the executor bound to `kind`.
    pub fn execute(&self, kind: ActionKind, args: ActionArgs) -> Result<ActionResult> {
        let executor = self.get(kind).ok_or(ExecutorError::NotRegistered(kind))?;
        tracing::debug!(action = %kind, "Dispatching action");
        executor.execute(args)
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.executors.contains_key(&kind)
    }

    /// Bound action kinds in binding-table order.
    pub fn kinds(&self) -> Vec<ActionKind> {
        let mut kinds: Vec<ActionKind> = self.executors.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.executors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
