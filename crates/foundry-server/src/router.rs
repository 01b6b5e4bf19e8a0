use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::handlers;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        // Unary JSON-RPC
        .route("/mcp", post(handlers::mcp_request))
        // SSE sessions; POST on the same URL is answered unary
        .route("/sse", get(handlers::mcp_sse).post(handlers::mcp_request))
        .route("/messages", post(handlers::mcp_message))
        .layer(TraceLayer::new_for_http())
        // MCP clients may run in a browser context
        .layer(CorsLayer::permissive())
        .with_state(state)
}
