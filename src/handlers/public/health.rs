// handlers/public/health.rs - GET /, GET /health

use axum::extract::State;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - service information
pub async fn root_get() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "TaskTrack API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": ["/api/auth/register", "/api/auth/login"],
            "projects": ["/api/projects", "/api/projects/:id"],
            "tasks": ["/api/projects/:projectId/tasks", "/api/projects/:projectId/tasks/:taskId"],
            "search": ["/api/tasks/search", "/api/projects/:projectId/tasks/search"]
        }
    }))
}

/// GET /health - store liveness; 503 when the store does not answer
pub async fn health_get(State(state): State<AppState>) -> ApiResult<Value> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
