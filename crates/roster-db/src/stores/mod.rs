//! Row store implementations
//!
//! Implementations of the `RowStore` port defined in roster-core.

mod error;
mod memory;
mod postgres;

pub use memory::MemoryRowStore;
pub use postgres::PgRowStore;

use roster_core::traits::RepoResult;
use roster_core::value_objects::{RowIndex, RowRange};

/// Drop trailing empty cells the way spreadsheet backends do
pub(crate) fn trim_trailing_empty(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(String::is_empty) {
        row.pop();
    }
    row
}

/// Index of the single data row a range addresses
pub(crate) fn data_row_index(range: &RowRange) -> RepoResult<RowIndex> {
    match range.index() {
        Some(index) if !index.is_header() => Ok(index),
        _ => Err(error::not_a_row_range(range)),
    }
}
