//! Row store database models

use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for roster_collections table
#[derive(Debug, Clone, FromRow)]
pub struct CollectionModel {
    pub id: i64,
    pub name: String,
}

/// Database model for roster_rows table
#[derive(Debug, Clone, FromRow)]
pub struct RowModel {
    pub row_index: i32,
    pub cells: Json<Vec<String>>,
}
