//! Roster API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p roster-api
//! ```
//!
//! Configuration is read from environment variables and an optional `.env` file.

use roster_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration first: the log format is part of it
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        storage = ?config.storage,
        port = config.api.port,
        "Configuration loaded"
    );

    if let Err(e) = roster_api::run(config).await {
        error!(error = %e, code = e.error_code(), "Server failed");
        std::process::exit(1);
    }
}
