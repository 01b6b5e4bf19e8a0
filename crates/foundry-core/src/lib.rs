pub mod error;
pub mod traits;
pub mod types;

pub use error::{RegistryError, ToolError};
pub use traits::Invocable;
pub use types::{Arguments, ToolDescriptor};
