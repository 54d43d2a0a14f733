//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageBackend,
    /// Present when the Postgres backend is selected
    pub database: Option<DatabaseConfig>,
    pub platform: PlatformConfig,
    pub sync: SyncConfig,
    pub collections: CollectionsConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
    pub log_format: LogFormat,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            _ => Err(()),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where roster rows are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(()),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Remote platform configuration
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub base_url: String,
    pub group_id: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl PlatformConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Synchronization limits
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// Upper bound on article pages fetched per run
    pub max_pages: usize,
    /// Page size requested from the articles feed
    pub page_size_hint: u32,
    /// Ranges per batch update request
    pub update_chunk_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            page_size_hint: default_page_size_hint(),
            update_chunk_size: default_update_chunk_size(),
        }
    }
}

/// Names of the persisted collections
#[derive(Debug, Clone)]
pub struct CollectionsConfig {
    pub active: String,
    pub withdrawn: String,
    pub audit: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            active: default_active_collection(),
            withdrawn: default_withdrawn_collection(),
            audit: default_audit_collection(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "roster-sync".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_base_url() -> String {
    "https://www.somoim.co.kr".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_pages() -> usize {
    30
}

fn default_page_size_hint() -> u32 {
    50
}

fn default_update_chunk_size() -> usize {
    100
}

fn default_active_collection() -> String {
    "회원목록".to_string()
}

fn default_withdrawn_collection() -> String {
    "탈퇴회원".to_string()
}

fn default_audit_collection() -> String {
    "활동로그".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let storage = vars.parsed_or("STORAGE_BACKEND", StorageBackend::default())?;
        let database = match storage {
            StorageBackend::Postgres => Some(DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars
                    .parsed_or("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                min_connections: vars
                    .parsed_or("DATABASE_MIN_CONNECTIONS", default_min_connections())?,
            }),
            StorageBackend::Memory => None,
        };

        Ok(Self {
            app: AppSettings {
                name: vars.or("APP_NAME", default_app_name),
                env: vars.parsed_or("APP_ENV", Environment::default())?,
                log_format: vars.parsed_or("LOG_FORMAT", LogFormat::default())?,
            },
            api: ServerConfig {
                host: vars.or("API_HOST", default_host),
                port: {
                    let raw = vars.required("API_PORT")?;
                    raw.trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("API_PORT", raw))?
                },
            },
            storage,
            database,
            platform: PlatformConfig {
                base_url: vars
                    .or("PLATFORM_BASE_URL", default_base_url)
                    .trim_end_matches('/')
                    .to_string(),
                group_id: vars.required("PLATFORM_GROUP_ID")?,
                user_agent: vars.or("PLATFORM_USER_AGENT", default_user_agent),
                timeout_secs: vars.parsed_or("PLATFORM_TIMEOUT_SECS", default_timeout_secs())?,
            },
            sync: SyncConfig {
                max_pages: vars.parsed_or("SYNC_MAX_PAGES", default_max_pages())?,
                page_size_hint: vars.parsed_or("SYNC_PAGE_SIZE_HINT", default_page_size_hint())?,
                update_chunk_size: vars
                    .parsed_or("SYNC_UPDATE_CHUNK_SIZE", default_update_chunk_size())?
                    .max(1),
            },
            collections: CollectionsConfig {
                active: vars.or("ROSTER_ACTIVE_COLLECTION", default_active_collection),
                withdrawn: vars.or("ROSTER_WITHDRAWN_COLLECTION", default_withdrawn_collection),
                audit: vars.or("ROSTER_AUDIT_COLLECTION", default_audit_collection),
            },
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    // Blank values count as unset
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or(&self, key: &str, default: fn() -> String) -> String {
        self.get(key).unwrap_or_else(default)
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parsed_or<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, value)),
            None => Ok(default),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = load(&[("API_PORT", "3000"), ("PLATFORM_GROUP_ID", "g-1")]).unwrap();

        assert_eq!(config.app.name, "roster-sync");
        assert_eq!(config.app.log_format, LogFormat::Pretty);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.database.is_none());
        assert_eq!(config.platform.timeout(), Duration::from_secs(30));
        assert_eq!(config.sync.max_pages, 30);
        assert_eq!(config.sync.page_size_hint, 50);
        assert_eq!(config.sync.update_chunk_size, 100);
        assert_eq!(config.collections.active, "회원목록");
        assert_eq!(config.collections.withdrawn, "탈퇴회원");
        assert_eq!(config.collections.audit, "활동로그");
    }

    #[test]
    fn test_missing_port() {
        let err = load(&[("PLATFORM_GROUP_ID", "g-1")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("API_PORT")));
    }

    #[test]
    fn test_missing_group() {
        let err = load(&[("API_PORT", "3000")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("PLATFORM_GROUP_ID")));
    }

    #[test]
    fn test_postgres_requires_url() {
        let err = load(&[
            ("API_PORT", "3000"),
            ("PLATFORM_GROUP_ID", "g-1"),
            ("STORAGE_BACKEND", "postgres"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));

        let config = load(&[
            ("API_PORT", "3000"),
            ("PLATFORM_GROUP_ID", "g-1"),
            ("STORAGE_BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://localhost/roster"),
        ])
        .unwrap();
        assert_eq!(config.database.unwrap().max_connections, 10);
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[
            ("API_PORT", "3000"),
            ("PLATFORM_GROUP_ID", "g-1"),
            ("SYNC_MAX_PAGES", "many"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("SYNC_MAX_PAGES", _)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = load(&[
            ("API_PORT", "3000"),
            ("PLATFORM_GROUP_ID", "g-1"),
            ("PLATFORM_BASE_URL", "http://127.0.0.1:9999/"),
        ])
        .unwrap();
        assert_eq!(config.platform.base_url, "http://127.0.0.1:9999");
    }
}
