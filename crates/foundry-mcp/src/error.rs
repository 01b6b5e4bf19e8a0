use foundry_core::ToolError;

use crate::jsonrpc::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR};

/// Everything that can turn a request into an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Parse error")]
    Parse,

    #[error("Method not found")]
    MethodNotFound(String),

    #[error("Missing tool name")]
    MissingToolName,

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl DispatchError {
    /// The JSON-RPC error code for this failure.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Parse => PARSE_ERROR,
            Self::MethodNotFound(_) => METHOD_NOT_FOUND,
            Self::MissingToolName => INVALID_PARAMS,
            Self::Tool(_) => INTERNAL_ERROR,
        }
    }
}
