//! Synchronization handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_service::dto::SyncFailure;
use roster_service::SyncService;
use tracing::{error, info, warn};

use crate::state::AppState;

/// Run one synchronization against the platform
///
/// POST /api/sync
///
/// Failures keep the `{ success: false, error }` shape clients poll for
/// instead of the generic error envelope.
pub async fn run_sync(State(state): State<AppState>) -> Response {
    match SyncService::new(state.service_context()).run().await {
        Ok(result) => {
            info!(
                inserted = result.inserted_count,
                updated = result.updated_count,
                "Sync request completed"
            );
            Json(result).into_response()
        }
        Err(e) => {
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                error!(error = %e, "Sync request failed");
            } else {
                warn!(error = %e, "Sync request rejected");
            }
            (status, Json(SyncFailure::new(e.error_code(), e.to_string()))).into_response()
        }
    }
}
