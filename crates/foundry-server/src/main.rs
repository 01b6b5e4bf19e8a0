use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use foundry_mcp::Dispatcher;
use foundry_server::app_state::AppState;
use foundry_server::config::{ServerConfig, Transport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for protocol frames in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::parse();

    let registry = foundry_tools::builtin_registry().context("Failed to register tools")?;
    tracing::info!("Registered {} tools", registry.len());
    let dispatcher = Dispatcher::new(Arc::new(registry));

    match config.transport() {
        Transport::Stdio => {
            tracing::info!("Serving MCP over stdio");
            foundry_server::stdio::run(&dispatcher)
                .await
                .context("stdio transport failed")?;
        }
        Transport::Sse => {
            let state = AppState::new(dispatcher, config.session_buffer);
            let app = foundry_server::router::create_router(state);

            let addr = config.addr();
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            tracing::info!("Foundry MCP server listening on {addr}");

            axum::serve(listener, app).await.context("Server error")?;
        }
    }

    Ok(())
}
