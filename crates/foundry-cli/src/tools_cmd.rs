use reqwest::Client;
use serde_json::Value;

use foundry_mcp::JsonRpcRequest;

use crate::rpc;

/// List every tool with its description.
pub async fn run(url: &str) -> anyhow::Result<()> {
    let client = Client::new();
    let request = JsonRpcRequest::new(1, "tools/list", None);
    let result = rpc::into_result(rpc::post(&client, url, &request).await?)?;

    for line in describe(&result) {
        println!("{line}");
    }
    Ok(())
}

fn describe(result: &Value) -> Vec<String> {
    result["tools"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|tool| {
            format!(
                "{}\n    {}",
                tool["name"].as_str().unwrap_or("?"),
                tool["description"].as_str().unwrap_or_default()
            )
        })
        .collect()
}
