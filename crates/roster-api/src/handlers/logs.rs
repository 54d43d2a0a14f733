//! Audit log handler

use axum::{extract::State, Json};
use roster_service::dto::AuditLogListResponse;
use roster_service::AuditLogService;

use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/logs
pub async fn list_logs(State(state): State<AppState>) -> ApiResult<Json<AuditLogListResponse>> {
    let logs = AuditLogService::new(state.service_context())
        .list_entries()
        .await?;
    Ok(Json(AuditLogListResponse { logs }))
}
