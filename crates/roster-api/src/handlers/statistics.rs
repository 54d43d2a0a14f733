//! Statistics handler

use axum::{extract::State, Json};
use roster_service::dto::StatisticsEnvelope;
use roster_service::StatisticsService;

use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/statistics
pub async fn get_statistics(State(state): State<AppState>) -> ApiResult<Json<StatisticsEnvelope>> {
    let stats = StatisticsService::new(state.service_context())
        .statistics()
        .await?;
    Ok(Json(StatisticsEnvelope { stats }))
}
