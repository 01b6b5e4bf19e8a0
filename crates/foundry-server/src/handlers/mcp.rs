use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive},
    response::{IntoResponse, Response, Sse},
    Json,
};
use serde::Deserialize;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use uuid::Uuid;

use crate::app_state::AppState;

/// Unary JSON-RPC: one body in, one envelope out.
///
/// Protocol errors, parse failures included, come back as HTTP 200 with a
/// JSON-RPC `error`. Notifications are acknowledged with an empty 202 and no
/// envelope, as JSON-RPC and MCP require for id-less notifications; every
/// other body gets an envelope.
pub async fn mcp_request(State(state): State<AppState>, body: Bytes) -> Response {
    match state.dispatcher.handle_bytes(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Open a streaming session.
///
/// MCP SSE transport:
/// 1. Server sends `event: endpoint` with the URL to POST messages to
/// 2. Client POSTs JSON-RPC to that URL
/// 3. Server sends responses back as `event: message`
pub async fn mcp_sse(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let (session_id, rx) = state.sessions.open(Arc::clone(&state.dispatcher)).await;

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/messages?session_id={session_id}"));
    let init_stream = tokio_stream::once(Ok::<_, Infallible>(endpoint));

    let event_stream = ReceiverStream::new(rx).map(move |response| {
        Ok(Event::default()
            .event("message")
            .json_data(&response)
            .unwrap_or_else(|err| {
                tracing::warn!(session = %session_id, "Could not encode response: {err}");
                Event::default().comment("unencodable response dropped")
            }))
    });

    Sse::new(init_stream.chain(event_stream)).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub session_id: Option<String>,
}

/// Inbound side of a streaming session. The answer goes out on the stream.
pub async fn mcp_message(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> StatusCode {
    let Some(raw_id) = query.session_id else {
        return StatusCode::BAD_REQUEST;
    };
    // A malformed id can't name an open session.
    let Ok(session_id) = raw_id.parse::<Uuid>() else {
        return StatusCode::NOT_FOUND;
    };

    match state.sessions.post(session_id, body).await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(err) => {
            tracing::warn!("Dropping inbound message: {err}");
            StatusCode::NOT_FOUND
        }
    }
}
