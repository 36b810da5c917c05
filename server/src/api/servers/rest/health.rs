//! Health check endpoint.

use axum::response::Json;
use serde_json::{json, Value};

/// GET /api/v1/health
pub async fn check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "brewmap",
        "timestamp": chrono::Utc::now(),
    }))
}
