//! Health check handler

use axum::Json;
use roster_service::dto::HealthResponse;

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
