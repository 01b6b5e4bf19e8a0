use axum::{extract::State, Json};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub name: String,
    pub version: String,
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let info = state.dispatcher.server_info();
    Json(Health {
        name: info.name.clone(),
        version: info.version.clone(),
        status: "ok",
    })
}
