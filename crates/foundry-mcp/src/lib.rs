pub mod codec;
pub mod dispatcher;
pub mod error;
pub mod invoker;
pub mod jsonrpc;
pub mod registry;

pub use codec::{decode, Incoming};
pub use dispatcher::{Dispatcher, ServerInfo, PROTOCOL_VERSION};
pub use error::DispatchError;
pub use invoker::{AsyncTool, Invoker, SyncTool};
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use registry::{RegisteredTool, ToolRegistry};
