//! Server setup and initialization
//!
//! Wires the row store, the platform adapters and the services together.

use std::sync::Arc;

use axum::Router;
use roster_common::{AppConfig, AppError, AppResult, CollectionsConfig, StorageBackend};
use roster_core::traits::RowStore;
use roster_core::value_objects::{AUDIT_HEADER, MEMBER_HEADER};
use roster_db::{create_pool, MemoryRowStore, PgRowStore, PoolConfig};
use roster_remote::{ClientConfig, HttpArticleFeed, PlatformClient, SnapshotExtractor};
use roster_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let is_production = state.config().app.env.is_production();
    let router = apply_middleware(create_router(), is_production);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let store = create_store(&config).await?;

    let client = PlatformClient::new(ClientConfig {
        base_url: config.platform.base_url.clone(),
        group_id: config.platform.group_id.clone(),
        user_agent: config.platform.user_agent.clone(),
        timeout: config.platform.timeout(),
        page_size_hint: config.sync.page_size_hint,
    })
    .map_err(|e| AppError::Remote(e.to_string()))?;
    let client = Arc::new(client);
    info!(base_url = %config.platform.base_url, group_id = %config.platform.group_id, "Platform client ready");

    let service_context = ServiceContextBuilder::new()
        .store(store)
        .member_source(Arc::new(SnapshotExtractor::new(Arc::clone(&client))))
        .article_feed(Arc::new(HttpArticleFeed::new(client)))
        .collections(config.collections.clone())
        .sync_config(config.sync)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Open the configured backend and make sure the three collections exist
async fn create_store(config: &AppConfig) -> AppResult<Arc<dyn RowStore>> {
    let CollectionsConfig {
        active,
        withdrawn,
        audit,
    } = &config.collections;

    match config.storage {
        StorageBackend::Memory => {
            warn!("Using the in-memory row store; data is lost on restart");
            let store = MemoryRowStore::new();
            store.ensure_collection(active, &MEMBER_HEADER);
            store.ensure_collection(withdrawn, &MEMBER_HEADER);
            store.ensure_collection(audit, &AUDIT_HEADER);
            Ok(Arc::new(store))
        }
        StorageBackend::Postgres => {
            let database = config.database.as_ref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            let store = PgRowStore::new(pool);
            store.ensure_schema().await?;
            store.ensure_collection(active, &MEMBER_HEADER).await?;
            store.ensure_collection(withdrawn, &MEMBER_HEADER).await?;
            store.ensure_collection(audit, &AUDIT_HEADER).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    run_server(create_app(state), &addr).await
}
