use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// What readiness depends on: a usable output directory and a configured backend
#[derive(Debug, Clone)]
pub struct Readiness {
    pub output_dir: PathBuf,
    pub backend: String,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(readiness): State<Arc<Readiness>>) -> impl IntoResponse {
    let output_dir_ready = tokio::fs::metadata(&readiness.output_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    if output_dir_ready {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "output_dir": "available",
                "tts": readiness.backend,
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "output_dir": "missing",
                "tts": readiness.backend,
            })),
        )
    }
}
