use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use foundry_core::{Arguments, Invocable, ToolDescriptor, ToolError};

use crate::registry::RegisteredTool;

/// Adapter for tool bodies that complete without suspending.
pub struct SyncTool<F> {
    f: F,
}

impl<F> SyncTool<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> Invocable for SyncTool<F>
where
    F: Fn(&Arguments) -> Result<String, ToolError> + Send + Sync + 'static,
{
    async fn call(&self, arguments: Arguments) -> Result<String, ToolError> {
        (self.f)(&arguments)
    }
}

/// Adapter for tool bodies that return a future.
pub struct AsyncTool<F> {
    f: F,
}

impl<F> AsyncTool<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Invocable for AsyncTool<F>
where
    F: Fn(Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    async fn call(&self, arguments: Arguments) -> Result<String, ToolError> {
        (self.f)(arguments).await
    }
}

/// Calls registered tools under one uniform contract.
pub struct Invoker;

impl Invoker {
    /// Check `arguments` against the tool's schema, run it to completion and
    /// return its text.
    ///
    /// The body runs on its own task: a slow tool only holds up the request
    /// that called it, and a panic comes back as [`ToolError::Execution`].
    ///
    /// # Errors
    ///
    /// [`ToolError::InvalidArguments`] when an argument is undeclared or a
    /// required one is missing; any error the tool itself returns; or
    /// [`ToolError::Execution`] if the tool panicked.
    pub async fn invoke(tool: &RegisteredTool, arguments: Arguments) -> Result<String, ToolError> {
        check_arguments(&tool.descriptor, &arguments)?;

        let invocable = Arc::clone(&tool.invocable);
        let handle = tokio::spawn(async move { invocable.call(arguments).await });

        match handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => Err(ToolError::Execution(format!(
                "tool '{}' panicked: {}",
                tool.descriptor.name,
                panic_message(err.into_panic())
            ))),
            Err(err) => Err(ToolError::execution(err.to_string())),
        }
    }
}

fn check_arguments(descriptor: &ToolDescriptor, arguments: &Arguments) -> Result<(), ToolError> {
    let invalid = |reason: String| ToolError::InvalidArguments {
        tool: descriptor.name.clone(),
        reason,
    };

    if let Some(name) = arguments.keys().find(|name| !descriptor.declares(name)) {
        return Err(invalid(format!("unexpected argument '{name}'")));
    }

    if let Some(name) = descriptor
        .required()
        .find(|name| !arguments.contains_key(*name))
    {
        return Err(invalid(format!("missing required argument '{name}'")));
    }

    Ok(())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ToolRegistry;
    use serde_json::json;

    fn greet_descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "greet",
            "Say hello",
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "greeting": {"type": "string", "default": "Hello"}
                },
                "required": ["name"]
            }),
        )
    }

    fn greet(args: &Arguments) -> Result<String, ToolError> {
        let name = args
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::execution("argument 'name' must be a string"))?;
        let greeting = args
            .get("greeting")
            .and_then(|v| v.as_str())
            .unwrap_or("Hello");
        Ok(format!("{greeting}, {name}!"))
    }

    fn args(value: serde_json::Value) -> Arguments {
        value.as_object().unwrap().clone()
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register_fn(greet_descriptor(), greet).unwrap();
        registry
            .register_async(
                ToolDescriptor::new("slow_greet", "", greet_descriptor().input_schema),
                |args| async move {
                    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                    greet(&args)
                },
            )
            .unwrap();
        registry
            .register_fn(
                ToolDescriptor::new("boom", "", json!({"type": "object"})),
                |_| panic!("kaboom"),
            )
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn sync_and_async_share_one_contract() {
        let registry = registry();
        for name in ["greet", "slow_greet"] {
            let tool = registry.lookup(name).unwrap();
            let text = Invoker::invoke(tool, args(json!({"name": "fab"}))).await.unwrap();
            assert_eq!(text, "Hello, fab!");
        }
    }

    #[tokio::test]
    async fn optional_argument_is_used() {
        let registry = registry();
        let tool = registry.lookup("greet").unwrap();
        let text = Invoker::invoke(tool, args(json!({"name": "fab", "greeting": "Hi"})))
            .await
            .unwrap();
        assert_eq!(text, "Hi, fab!");
    }

    #[tokio::test]
    async fn missing_required_argument() {
        let registry = registry();
        let tool = registry.lookup("greet").unwrap();
        let err = Invoker::invoke(tool, Arguments::new()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments for greet: missing required argument 'name'"
        );
    }

    #[tokio::test]
    async fn undeclared_argument() {
        let registry = registry();
        let tool = registry.lookup("greet").unwrap();
        let err = Invoker::invoke(tool, args(json!({"name": "x", "color": "red"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
        assert!(err.to_string().contains("unexpected argument 'color'"));
    }

    #[tokio::test]
    async fn tool_error_is_returned_verbatim() {
        let registry = registry();
        let tool = registry.lookup("greet").unwrap();
        let err = Invoker::invoke(tool, args(json!({"name": 7}))).await.unwrap_err();
        assert_eq!(err, ToolError::execution("argument 'name' must be a string"));
    }

    #[tokio::test]
    async fn panic_is_contained() {
        let registry = registry();
        let tool = registry.lookup("boom").unwrap();
        let err = Invoker::invoke(tool, Arguments::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "tool 'boom' panicked: kaboom");
    }
}
