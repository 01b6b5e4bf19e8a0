//! Decoding of inbound transport frames into requests.
//!
//! Every binding (unary HTTP, SSE message posts, stdio lines) hands the raw
//! bytes of one message to [`decode`] and only has to deal with three
//! outcomes: a request to dispatch, a notification to swallow, or a parse
//! failure that is already rendered as an error envelope.

use serde_json::{Map, Value};

use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// One decoded inbound message.
#[derive(Debug, Clone)]
pub enum Incoming {
    /// A call that must be answered.
    Request(JsonRpcRequest),
    /// A `notifications/*` message without an `id`; never answered.
    Notification { method: String },
}

/// Decode one inbound message.
///
/// A top-level value that is not an object is treated as an empty object,
/// so it still produces a well-formed (method-not-found) response.
///
/// # Errors
///
/// Returns the `-32700` envelope when the bytes are not valid JSON.
pub fn decode(bytes: &[u8]) -> Result<Incoming, JsonRpcResponse> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!("Failed to decode JSON-RPC message: {e}");
        JsonRpcResponse::parse_error()
    })?;

    let object = match value {
        Value::Object(object) => object,
        _ => Map::new(),
    };

    if !object.contains_key("id") {
        if let Some(method) = object
            .get("method")
            .and_then(Value::as_str)
            .filter(|m| m.starts_with("notifications/"))
        {
            return Ok(Incoming::Notification {
                method: method.to_string(),
            });
        }
    }

    Ok(Incoming::Request(JsonRpcRequest::from_object(object)))
}
