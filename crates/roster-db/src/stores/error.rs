//! Error handling utilities for row stores

use roster_core::error::DomainError;
use roster_core::value_objects::{RowIndex, RowRange};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "collection not found" error
pub fn collection_not_found(name: impl Into<String>) -> DomainError {
    DomainError::CollectionNotFound(name.into())
}

/// Range that does not address exactly one data row
pub fn not_a_row_range(range: &RowRange) -> DomainError {
    DomainError::InvalidRange(format!("{range} does not address a single data row"))
}

/// Row index outside the collection
pub fn row_out_of_bounds(collection: &str, index: RowIndex) -> DomainError {
    DomainError::InvalidRange(format!("row index {index} is outside {collection}"))
}
