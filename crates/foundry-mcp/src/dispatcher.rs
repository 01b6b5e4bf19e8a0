use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use foundry_core::{Arguments, ToolError};

use crate::codec::{self, Incoming};
use crate::error::DispatchError;
use crate::invoker::Invoker;
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use crate::registry::ToolRegistry;

/// MCP protocol revision announced by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name and version reported in `serverInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: "design-foundry-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Routes decoded requests to `initialize`, `tools/list` or `tools/call`.
///
/// Holds no per-request state; every transport binding shares one instance.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    server_info: ServerInfo,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            server_info: ServerInfo::default(),
        }
    }

    #[must_use]
    pub fn with_server_info(mut self, server_info: ServerInfo) -> Self {
        self.server_info = server_info;
        self
    }

    #[must_use]
    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Decode one raw message and answer it.
    ///
    /// Returns `None` for notifications, which get no response.
    pub async fn handle_bytes(&self, bytes: &[u8]) -> Option<JsonRpcResponse> {
        match codec::decode(bytes) {
            Ok(Incoming::Request(req)) => Some(self.dispatch(req).await),
            Ok(Incoming::Notification { method }) => {
                tracing::debug!("Received MCP notification: {method}");
                None
            }
            Err(parse_error) => Some(parse_error),
        }
    }

    /// Answer one request. Never fails: errors become error envelopes.
    pub async fn dispatch(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!(method = %req.method, id = %req.id, "Dispatching MCP request");

        let result = match req.method.as_str() {
            "initialize" => Ok(self.initialize()),
            "tools/list" => Ok(self.tools_list()),
            "tools/call" => self.tools_call(req.params.as_ref()).await,
            other => Err(DispatchError::MethodNotFound(other.to_string())),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(req.id, value),
            Err(err) => {
                if let DispatchError::Tool(tool_err) = &err {
                    tracing::warn!(id = %req.id, "Tool call failed: {tool_err}");
                }
                JsonRpcResponse::error(req.id, err.code(), err.to_string())
            }
        }
    }

    fn initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": self.server_info,
            "capabilities": {
                "tools": {}
            }
        })
    }

    fn tools_list(&self) -> Value {
        let tools: Vec<_> = self.registry.list().collect();
        serde_json::json!({ "tools": tools })
    }

    async fn tools_call(&self, params: Option<&Value>) -> Result<Value, DispatchError> {
        // Params that are not an object are read as empty rather than rejected.
        let empty = Map::new();
        let params = params.and_then(Value::as_object).unwrap_or(&empty);

        let tool_name = match params.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            // Non-string names are looked up by their JSON text and fail as unknown.
            Some(name) if !is_blank(name) => name.to_string(),
            _ => return Err(DispatchError::MissingToolName),
        };
        let tool = self.registry.lookup(&tool_name)?;

        // Blank values of any type (`[]`, `""`, `0`, `false`) mean no arguments.
        let arguments = match params.get("arguments") {
            Some(Value::Object(arguments)) => arguments.clone(),
            Some(value) if !is_blank(value) => {
                return Err(ToolError::InvalidArguments {
                    tool: tool_name,
                    reason: "arguments must be an object".to_string(),
                }
                .into())
            }
            _ => Arguments::new(),
        };

        let text = Invoker::invoke(tool, arguments).await?;

        Ok(serde_json::json!({
            "content": [{
                "type": "text",
                "text": text
            }]
        }))
    }
}

/// `null`, `false`, zero and empty strings, arrays or objects.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonrpc::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
    use foundry_core::ToolDescriptor;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        let mut registry = ToolRegistry::new();
        registry
            .register_fn(
                ToolDescriptor::new(
                    "shout",
                    "Upper-case the input",
                    json!({
                        "type": "object",
                        "properties": {"text": {"type": "string"}},
                        "required": ["text"]
                    }),
                ),
                |args| {
                    let text = args.get("text").and_then(Value::as_str).unwrap_or_default();
                    Ok(text.to_uppercase())
                },
            )
            .unwrap();
        registry
            .register_fn(
                ToolDescriptor::new("fail", "Always fails", json!({"type": "object"})),
                |_| Err(ToolError::execution("fab offline")),
            )
            .unwrap();
        registry
            .register_fn(
                ToolDescriptor::new("ping", "Answers pong", json!({"type": "object"})),
                |_| Ok("pong".to_string()),
            )
            .unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    fn request(id: Value, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest::new(id, method, params)
    }

    fn error_code(resp: &JsonRpcResponse) -> i32 {
        resp.error.as_ref().map(|e| e.code).unwrap()
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let resp = dispatcher()
            .dispatch(request(json!(1), "initialize", Some(json!({}))))
            .await;
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "design-foundry-mcp");
        assert_eq!(result["capabilities"], json!({"tools": {}}));
    }

    #[tokio::test]
    async fn initialize_with_custom_server_info() {
        let dispatcher = dispatcher().with_server_info(ServerInfo {
            name: "other".to_string(),
            version: "9.9.9".to_string(),
        });
        let resp = dispatcher.dispatch(request(json!(1), "initialize", None)).await;
        assert_eq!(resp.result.unwrap()["serverInfo"]["version"], "9.9.9");
    }

    #[tokio::test]
    async fn tools_list_in_registration_order() {
        let resp = dispatcher().dispatch(request(json!(1), "tools/list", None)).await;
        let tools = resp.result.unwrap()["tools"].clone();
        assert_eq!(tools[0]["name"], "shout");
        assert_eq!(tools[1]["name"], "fail");
        assert!(tools[0].get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn tools_call_wraps_text() {
        let resp = dispatcher()
            .dispatch(request(
                json!("abc"),
                "tools/call",
                Some(json!({"name": "shout", "arguments": {"text": "tapeout"}})),
            ))
            .await;
        assert_eq!(resp.id, json!("abc"));
        assert_eq!(
            resp.result.unwrap(),
            json!({"content": [{"type": "text", "text": "TAPEOUT"}]})
        );
    }

    #[tokio::test]
    async fn null_arguments_mean_empty() {
        let resp = dispatcher()
            .dispatch(request(
                json!(3),
                "tools/call",
                Some(json!({"name": "fail", "arguments": null})),
            ))
            .await;
        assert_eq!(resp.error.unwrap().message, "fab offline");
    }

    #[tokio::test]
    async fn unknown_method() {
        let resp = dispatcher()
            .dispatch(request(json!(7), "resources/list", None))
            .await;
        assert_eq!(resp.id, json!(7));
        assert_eq!(error_code(&resp), METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_tool_name() {
        let resp = dispatcher()
            .dispatch(request(json!(1), "tools/call", Some(json!({"arguments": {}}))))
            .await;
        assert_eq!(error_code(&resp), INVALID_PARAMS);
        assert_eq!(resp.error.unwrap().message, "Missing tool name");
    }

    #[tokio::test]
    async fn non_object_params_are_read_as_empty() {
        let resp = dispatcher()
            .dispatch(request(json!(1), "tools/call", Some(json!("shout"))))
            .await;
        assert_eq!(error_code(&resp), INVALID_PARAMS);

        let resp = dispatcher().dispatch(request(json!(1), "tools/call", None)).await;
        assert_eq!(error_code(&resp), INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_tool() {
        let resp = dispatcher()
            .dispatch(request(
                json!(2),
                "tools/call",
                Some(json!({"name": "does_not_exist", "arguments": {}})),
            ))
            .await;
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "error": {"code": -32603, "message": "Unknown tool: does_not_exist"}
            })
        );
    }

    #[tokio::test]
    async fn invalid_arguments_are_internal_errors() {
        let resp = dispatcher()
            .dispatch(request(
                json!(1),
                "tools/call",
                Some(json!({"name": "shout", "arguments": {}})),
            ))
            .await;
        assert_eq!(error_code(&resp), INTERNAL_ERROR);

        let resp = dispatcher()
            .dispatch(request(
                json!(1),
                "tools/call",
                Some(json!({"name": "shout", "arguments": ["x"]})),
            ))
            .await;
        assert_eq!(error_code(&resp), INTERNAL_ERROR);
        assert!(resp.error.unwrap().message.contains("arguments must be an object"));
    }

    #[tokio::test]
    async fn blank_names_are_missing() {
        for name in [json!(""), json!(null), json!(0), json!(false), json!([]), json!({})] {
            let resp = dispatcher()
                .dispatch(request(json!(1), "tools/call", Some(json!({"name": name}))))
                .await;
            assert_eq!(error_code(&resp), INVALID_PARAMS, "name {name}");
        }
    }

    #[tokio::test]
    async fn non_string_name_is_an_unknown_tool() {
        let resp = dispatcher()
            .dispatch(request(json!(4), "tools/call", Some(json!({"name": 5}))))
            .await;
        assert_eq!(error_code(&resp), INTERNAL_ERROR);
        assert_eq!(resp.error.unwrap().message, "Unknown tool: 5");
    }

    #[tokio::test]
    async fn blank_arguments_of_any_type_mean_none() {
        for arguments in [json!([]), json!(""), json!(0), json!(false), json!(null)] {
            let resp = dispatcher()
                .dispatch(request(
                    json!(1),
                    "tools/call",
                    Some(json!({"name": "ping", "arguments": arguments})),
                ))
                .await;
            assert_eq!(
                resp.result.unwrap()["content"][0]["text"],
                "pong",
                "arguments {arguments}"
            );
        }
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_before_bad_arguments() {
        let resp = dispatcher()
            .dispatch(request(
                json!(1),
                "tools/call",
                Some(json!({"name": "nope", "arguments": [1]})),
            ))
            .await;
        assert_eq!(error_code(&resp), INTERNAL_ERROR);
        assert_eq!(resp.error.unwrap().message, "Unknown tool: nope");
    }

    #[tokio::test]
    async fn handle_bytes_covers_parse_and_notifications() {
        let dispatcher = dispatcher();

        let resp = dispatcher.handle_bytes(b"not json{").await.unwrap();
        assert!(resp.id.is_null());
        assert_eq!(error_code(&resp), -32700);

        let none = dispatcher
            .handle_bytes(br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(none.is_none());

        let resp = dispatcher.handle_bytes(b"42").await.unwrap();
        assert!(resp.id.is_null());
        assert_eq!(error_code(&resp), METHOD_NOT_FOUND);
    }
}
