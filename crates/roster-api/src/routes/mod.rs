//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, logs, members, statistics, sync};
use crate::state::AppState;

/// Create the main router: `/api` plus the health probe
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health::health_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/sync", post(sync::run_sync))
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/members/:member_id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::withdraw_member),
        )
        .route("/logs", get(logs::list_logs))
        .route("/statistics", get(statistics::get_statistics))
}
