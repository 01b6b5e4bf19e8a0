use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use foundry_core::{Arguments, Invocable, RegistryError, ToolDescriptor, ToolError};

use crate::invoker::{AsyncTool, SyncTool};

/// A tool body together with the descriptor it was registered under.
#[derive(Clone)]
pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub invocable: Arc<dyn Invocable>,
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("name", &self.descriptor.name)
            .finish_non_exhaustive()
    }
}

/// Registry of every tool the server exposes.
///
/// Filled once during startup and then shared read-only behind an `Arc`,
/// so lookups need no locking.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under `descriptor.name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        invocable: impl Invocable + 'static,
    ) -> Result<(), RegistryError> {
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateName(descriptor.name));
        }

        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            invocable: Arc::new(invocable),
        });
        Ok(())
    }

    /// Register a plain function that returns immediately.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register_fn<F>(&mut self, descriptor: ToolDescriptor, f: F) -> Result<(), RegistryError>
    where
        F: Fn(&Arguments) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        self.register(descriptor, SyncTool::new(f))
    }

    /// Register a function whose result has to be awaited.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register_async<F, Fut>(
        &mut self,
        descriptor: ToolDescriptor,
        f: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        self.register(descriptor, AsyncTool::new(f))
    }

    /// Look up a tool by name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] if nothing is registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&RegisteredTool, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, format!("{name} tool"), json!({"type": "object"}))
    }

    fn echo(_: &Arguments) -> Result<String, ToolError> {
        Ok("echo".to_string())
    }

    #[test]
    fn preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register_fn(descriptor(name), echo).unwrap();
        }

        let names: Vec<&str> = registry.list().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut registry = ToolRegistry::new();
        registry.register_fn(descriptor("dup"), echo).unwrap();

        let err = registry.register_fn(descriptor("dup"), echo).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("dup".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_unknown() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        let err = registry.lookup("does_not_exist").unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: does_not_exist");
    }

    #[tokio::test]
    async fn lookup_and_call_async_tool() {
        let mut registry = ToolRegistry::new();
        registry
            .register_async(descriptor("later"), |_| async {
                tokio::task::yield_now().await;
                Ok("done".to_string())
            })
            .unwrap();

        let tool = registry.lookup("later").unwrap();
        assert_eq!(tool.descriptor.name, "later");
        assert_eq!(tool.invocable.call(Arguments::new()).await.unwrap(), "done");
    }
}
