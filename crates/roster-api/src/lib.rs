//! # roster-api
//!
//! REST API server built with Axum.
//!
//! Routes live under `/api`; `/health` sits outside it.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
