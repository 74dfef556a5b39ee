//! Embedded page and liveness probe.

use axum::{Json, http::StatusCode, response::Html};
use serde_json::{Value, json};

/// Serve the single-page studio UI.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// Liveness probe.
pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
