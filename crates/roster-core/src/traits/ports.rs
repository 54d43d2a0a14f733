//! Port traits - define the interface for persistence and the remote platform
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Persistence is modeled as a spreadsheet-like
//! row store: named collections of positional string rows where row index 0
//! is a header.

use async_trait::async_trait;

use crate::entities::{ArticlePage, Cursor, MemberSnapshot};
use crate::error::DomainError;
use crate::value_objects::{RangeUpdate, RowIndex, RowRange};

/// Result type for port operations
pub type RepoResult<T> = Result<T, DomainError>;

/// One positional row
pub type Row = Vec<String>;

// ============================================================================
// Row Store
// ============================================================================

#[async_trait]
pub trait RowStore: Send + Sync {
    /// Read every row of a collection, header included
    ///
    /// Trailing empty cells may be dropped by the store.
    async fn read_rows(&self, collection: &str, range: &RowRange) -> RepoResult<Vec<Row>>;

    /// Append one row after the last row
    async fn append_row(&self, collection: &str, range: &RowRange, row: Row) -> RepoResult<()>;

    /// Append several rows in order
    async fn append_rows(&self, collection: &str, range: &RowRange, rows: Vec<Row>)
        -> RepoResult<()>;

    /// Overwrite a single row addressed by `range`
    async fn update_range(&self, range: &RowRange, row: Row) -> RepoResult<()>;

    /// Overwrite several single-row ranges in one request
    async fn batch_update(&self, updates: Vec<RangeUpdate>) -> RepoResult<()>;

    /// Delete a row; rows below it shift up by one
    async fn delete_row(&self, collection_id: i64, index: RowIndex) -> RepoResult<()>;

    /// Numeric id of a named collection
    async fn resolve_collection_id(&self, name: &str) -> RepoResult<Option<i64>>;
}

// ============================================================================
// Remote Platform
// ============================================================================

#[async_trait]
pub trait MemberSource: Send + Sync {
    /// Current member snapshot
    ///
    /// Fails with `DomainError::RemoteUnavailable` when no strategy produced data.
    async fn fetch_members(&self) -> RepoResult<MemberSnapshot>;
}

#[async_trait]
pub trait ArticleFeed: Send + Sync {
    /// Fetch one page of the articles feed; `None` requests the first page
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> RepoResult<ArticlePage>;
}
