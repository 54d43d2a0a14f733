//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CollectionsConfig, ConfigError, DatabaseConfig, Environment,
    LogFormat, PlatformConfig, ServerConfig, StorageBackend, SyncConfig,
};
