use anyhow::bail;
use reqwest::Client;
use reqwest_eventsource::{Event, EventSource};
use serde_json::{Map, Value};
use tokio_stream::StreamExt;
use uuid::Uuid;

use foundry_mcp::JsonRpcResponse;

use crate::rpc;

/// Call a tool through an SSE session.
///
/// Opens `/sse`, posts the request to the endpoint the server announces and
/// prints the `message` event whose id matches ours.
pub async fn run(url: &str, tool: &str, arguments: Map<String, Value>) -> anyhow::Result<()> {
    let client = Client::new();
    let request_id = Uuid::new_v4().to_string();
    let request = rpc::tools_call(request_id.clone(), tool, arguments);

    let sse_url = format!("{url}/sse");
    tracing::info!("Connecting to SSE: {sse_url}");
    let mut es = EventSource::get(&sse_url);

    while let Some(event) = es.next().await {
        match event {
            Ok(Event::Open) => {
                tracing::info!("SSE connection established");
            }
            Ok(Event::Message(msg)) if msg.event == "endpoint" => {
                let endpoint = format!("{url}{}", msg.data);
                tracing::debug!("Posting request to {endpoint}");

                let resp = client.post(&endpoint).json(&request).send().await?;
                if !resp.status().is_success() {
                    es.close();
                    bail!("Server rejected the request: {}", resp.status());
                }
            }
            Ok(Event::Message(msg)) => {
                let response: JsonRpcResponse = match serde_json::from_str(&msg.data) {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::warn!("Failed to parse event: {e}");
                        continue;
                    }
                };
                if response.id != Value::String(request_id.clone()) {
                    continue;
                }

                es.close();
                let result = rpc::into_result(response)?;
                println!("{}", rpc::call_text(&result));
                return Ok(());
            }
            Err(err) => {
                es.close();
                bail!("SSE stream failed: {err}");
            }
        }
    }

    bail!("SSE stream ended before a response arrived")
}
