//! # roster-db
//!
//! Persistence layer implementing the `RowStore` port.
//!
//! ## Overview
//!
//! Two adapters share the same spreadsheet-like semantics: named collections
//! of positional string rows, row index 0 reserved for the header, deletions
//! shifting later rows up by one.
//!
//! - `MemoryRowStore` keeps everything behind a lock (tests, `STORAGE_BACKEND=memory`)
//! - `PgRowStore` persists rows as JSONB arrays in PostgreSQL
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_db::{create_pool, PgRowStore, PoolConfig};
//!
//! async fn example(config: &roster_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from(config)).await?;
//!     let store = PgRowStore::new(pool);
//!     store.ensure_schema().await?;
//!     store.ensure_collection("회원목록", &["id", "닉네임"]).await?;
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod pool;
pub mod stores;

// Re-export commonly used types
pub use pool::{create_pool, PgPool, PoolConfig};
pub use stores::{MemoryRowStore, PgRowStore};
