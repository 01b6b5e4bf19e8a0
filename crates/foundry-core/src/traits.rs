use async_trait::async_trait;

use crate::error::ToolError;
use crate::types::Arguments;

/// A tool body that can be invoked with named arguments.
///
/// Plain functions and suspending closures are both adapted to this
/// interface when they are registered, so the dispatcher only ever awaits
/// a single `call`.
#[async_trait]
pub trait Invocable: Send + Sync {
    /// Run the tool and produce its text payload.
    async fn call(&self, arguments: Arguments) -> Result<String, ToolError>;
}
