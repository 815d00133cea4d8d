use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mindmosaic-api",
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": state.sessions.len().await,
    }))
}
