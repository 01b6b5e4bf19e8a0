use reqwest::Client;
use serde_json::{Map, Value};

use crate::rpc;

/// Call a tool on the unary endpoint and print its text.
pub async fn run(url: &str, tool: &str, arguments: Map<String, Value>) -> anyhow::Result<()> {
    let client = Client::new();
    let request = rpc::tools_call(1, tool, arguments);
    let result = rpc::into_result(rpc::post(&client, url, &request).await?)?;

    println!("{}", rpc::call_text(&result));
    Ok(())
}
