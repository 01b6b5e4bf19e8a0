use anyhow::{bail, Context};
use reqwest::Client;
use serde_json::{json, Map, Value};

use foundry_mcp::{JsonRpcRequest, JsonRpcResponse};

pub fn tools_call(
    id: impl Into<Value>,
    tool: &str,
    arguments: Map<String, Value>,
) -> JsonRpcRequest {
    JsonRpcRequest::new(
        id,
        "tools/call",
        Some(json!({"name": tool, "arguments": arguments})),
    )
}

/// POST one request to the unary endpoint.
pub async fn post(
    client: &Client,
    url: &str,
    request: &JsonRpcRequest,
) -> anyhow::Result<JsonRpcResponse> {
    let resp = client
        .post(format!("{url}/mcp"))
        .json(request)
        .send()
        .await
        .with_context(|| format!("Failed to reach {url}"))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await?;
        bail!("Server returned {status}: {body}");
    }

    Ok(resp.json().await?)
}

/// The result payload, or the JSON-RPC error as an `Err`.
pub fn into_result(response: JsonRpcResponse) -> anyhow::Result<Value> {
    if let Some(error) = response.error {
        bail!("{} ({})", error.message, error.code);
    }
    response.result.context("Response has neither result nor error")
}

/// Join the text parts of a `tools/call` result.
pub fn call_text(result: &Value) -> String {
    result["content"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
