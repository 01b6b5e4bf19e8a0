use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DispatchError;

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default = "default_version")]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build a request with a fresh params object.
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: default_version(),
            id: id.into(),
            method: method.into(),
            params,
        }
    }

    /// Read a request out of an already-decoded object without rejecting it.
    ///
    /// The `jsonrpc` tag is not checked, a missing `id` becomes `null` and a
    /// missing or non-string `method` becomes the empty string, which the
    /// dispatcher then reports as an unknown method.
    #[must_use]
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        let jsonrpc = object
            .get("jsonrpc")
            .and_then(Value::as_str)
            .map_or_else(default_version, str::to_string);
        let method = object
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            jsonrpc,
            id: object.remove("id").unwrap_or(Value::Null),
            method,
            params: object.remove("params"),
        }
    }
}

fn default_version() -> String {
    "2.0".to_string()
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: default_version(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// The envelope sent when the inbound bytes could not be decoded.
    #[must_use]
    pub fn parse_error() -> Self {
        let err = DispatchError::Parse;
        Self::error(Value::Null, err.code(), err.to_string())
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": null
        }"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.id, json!(1));
    }

    #[test]
    fn success_response() {
        let resp = JsonRpcResponse::success(json!(1), json!({"tools": []}));
        assert!(resp.error.is_none());
        assert!(resp.result.is_some());

        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("error"));
    }

    #[test]
    fn error_response() {
        let resp = JsonRpcResponse::error(json!(1), METHOD_NOT_FOUND, "Method not found");
        assert!(resp.result.is_none());

        let err = resp.error.unwrap();
        assert_eq!(err.code, METHOD_NOT_FOUND);
        assert_eq!(err.message, "Method not found");
    }

    #[test]
    fn error_response_wire_shape() {
        let resp = JsonRpcResponse::error(json!(2), INTERNAL_ERROR, "Unknown tool: does_not_exist");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "error": {"code": -32603, "message": "Unknown tool: does_not_exist"}
            })
        );
    }

    #[test]
    fn parse_error_has_null_id() {
        let resp = JsonRpcResponse::parse_error();
        assert!(resp.id.is_null());
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);
    }

    #[test]
    fn from_object_is_lenient() {
        let object = json!({"method": 42, "params": [1, 2]});
        let req = JsonRpcRequest::from_object(object.as_object().unwrap().clone());
        assert_eq!(req.jsonrpc, "2.0");
        assert!(req.id.is_null());
        assert_eq!(req.method, "");
        assert_eq!(req.params, Some(json!([1, 2])));
    }

    #[test]
    fn request_with_params() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": "abc",
            "method": "tools/call",
            "params": {
                "name": "design_rule_qa",
                "arguments": {
                    "process_node": "5nm",
                    "rule_category": "metal"
                }
            }
        }"#;
        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "tools/call");

        let params = req.params.unwrap();
        assert_eq!(params["name"], "design_rule_qa");
        assert_eq!(params["arguments"]["process_node"], "5nm");
    }
}
