use axum::Json;
use serde_json::{json, Value};

/// GET /debug/health - Liveness; the planner keeps no connections to check
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
