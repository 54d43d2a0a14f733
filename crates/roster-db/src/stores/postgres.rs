//! PostgreSQL implementation of RowStore
//!
//! Each row is stored as a JSONB array of strings keyed by
//! `(collection_id, row_index)`. Index 0 holds the header.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use roster_core::error::DomainError;
use roster_core::traits::{RepoResult, Row, RowStore};
use roster_core::value_objects::{RangeUpdate, RowIndex, RowRange};

use crate::models::{CollectionModel, RowModel};

use super::error::{collection_not_found, map_db_error, row_out_of_bounds};
use super::{data_row_index, trim_trailing_empty};

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS roster_collections (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS roster_rows (
        collection_id BIGINT NOT NULL REFERENCES roster_collections(id) ON DELETE CASCADE,
        row_index INTEGER NOT NULL,
        cells JSONB NOT NULL DEFAULT '[]'::jsonb,
        PRIMARY KEY (collection_id, row_index)
    )
    "#,
];

/// PostgreSQL implementation of RowStore
#[derive(Clone)]
pub struct PgRowStore {
    pool: PgPool,
}

impl PgRowStore {
    /// Create a new PgRowStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the backing tables when missing
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;
        }
        Ok(())
    }

    /// Create a collection with its header row unless it already exists
    #[instrument(skip(self, header))]
    pub async fn ensure_collection(&self, name: &str, header: &[&str]) -> RepoResult<i64> {
        if let Some(id) = self.collection_id(name).await? {
            return Ok(id);
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let created = sqlx::query_as::<_, CollectionModel>(
            r#"
            INSERT INTO roster_collections (name) VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let header: Row = header.iter().map(|h| (*h).to_string()).collect();
        sqlx::query(
            r#"
            INSERT INTO roster_rows (collection_id, row_index, cells) VALUES ($1, 0, $2)
            ON CONFLICT (collection_id, row_index) DO NOTHING
            "#,
        )
        .bind(created.id)
        .bind(Json(&header))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        debug!(collection = %created.name, id = created.id, "Collection created");
        Ok(created.id)
    }

    async fn collection_id(&self, name: &str) -> RepoResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM roster_collections WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    async fn require_collection(&self, name: &str) -> RepoResult<i64> {
        self.collection_id(name)
            .await?
            .ok_or_else(|| collection_not_found(name))
    }

    async fn upsert_row(
        tx: &mut Transaction<'_, Postgres>,
        collection_id: i64,
        index: RowIndex,
        row: Row,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO roster_rows (collection_id, row_index, cells) VALUES ($1, $2, $3)
            ON CONFLICT (collection_id, row_index) DO UPDATE SET cells = EXCLUDED.cells
            "#,
        )
        .bind(collection_id)
        .bind(index_param(index)?)
        .bind(Json(trim_trailing_empty(row)))
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }
}

fn index_param(index: RowIndex) -> RepoResult<i32> {
    i32::try_from(index.get())
        .map_err(|_| DomainError::InvalidRange(format!("row index {index} is too large")))
}

/// Rebuild a dense row list from stored rows, filling gaps with empty rows
fn densify(models: Vec<RowModel>, width: usize) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::with_capacity(models.len());
    for model in models {
        let Ok(index) = usize::try_from(model.row_index) else {
            continue;
        };
        if rows.len() < index {
            rows.resize_with(index, Vec::new);
        }
        rows.push(model.cells.0.into_iter().take(width).collect());
    }
    rows
}

#[async_trait]
impl RowStore for PgRowStore {
    #[instrument(skip(self))]
    async fn read_rows(&self, collection: &str, range: &RowRange) -> RepoResult<Vec<Row>> {
        let collection_id = self.require_collection(collection).await?;

        let models = sqlx::query_as::<_, RowModel>(
            r#"
            SELECT row_index, cells FROM roster_rows
            WHERE collection_id = $1
            ORDER BY row_index
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(densify(models, range.width()))
    }

    #[instrument(skip(self, row))]
    async fn append_row(&self, collection: &str, range: &RowRange, row: Row) -> RepoResult<()> {
        self.append_rows(collection, range, vec![row]).await
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    async fn append_rows(&self, collection: &str, range: &RowRange, rows: Vec<Row>) -> RepoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let collection_id = self.require_collection(collection).await?;
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock the collection so concurrent appends cannot pick the same index
        sqlx::query("SELECT id FROM roster_collections WHERE id = $1 FOR UPDATE")
            .bind(collection_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let next = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(row_index) + 1, 0) FROM roster_rows WHERE collection_id = $1",
        )
        .bind(collection_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let start = usize::try_from(next).unwrap_or_default();
        for (offset, row) in rows.into_iter().enumerate() {
            Self::upsert_row(&mut tx, collection_id, RowIndex::new(start + offset), row).await?;
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, row))]
    async fn update_range(&self, range: &RowRange, row: Row) -> RepoResult<()> {
        self.batch_update(vec![RangeUpdate::new(range.clone(), row)]).await
    }

    #[instrument(skip(self, updates), fields(count = updates.len()))]
    async fn batch_update(&self, updates: Vec<RangeUpdate>) -> RepoResult<()> {
        let mut targets = Vec::with_capacity(updates.len());
        for update in updates {
            let index = data_row_index(&update.range)?;
            let collection_id = self.require_collection(update.range.collection()).await?;
            targets.push((collection_id, index, update.row));
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        for (collection_id, index, row) in targets {
            Self::upsert_row(&mut tx, collection_id, index, row).await?;
        }
        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn delete_row(&self, collection_id: i64, index: RowIndex) -> RepoResult<()> {
        let position = index_param(index)?;
        let name = format!("#{collection_id}");
        if index.is_header() {
            return Err(row_out_of_bounds(&name, index));
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = sqlx::query("DELETE FROM roster_rows WHERE collection_id = $1 AND row_index = $2")
            .bind(collection_id)
            .bind(position)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if deleted.rows_affected() == 0 {
            return Err(row_out_of_bounds(&name, index));
        }

        // Two passes keep the primary key unique while rows move up:
        // park them at negative indices, then bring them back shifted by one.
        sqlx::query(
            r#"
            UPDATE roster_rows SET row_index = -row_index
            WHERE collection_id = $1 AND row_index > $2
            "#,
        )
        .bind(collection_id)
        .bind(position)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            UPDATE roster_rows SET row_index = -row_index - 1
            WHERE collection_id = $1 AND row_index < 0
            "#,
        )
        .bind(collection_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn resolve_collection_id(&self, name: &str) -> RepoResult<Option<i64>> {
        self.collection_id(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(index: i32, cells: &[&str]) -> RowModel {
        RowModel {
            row_index: index,
            cells: Json(cells.iter().map(|c| (*c).to_string()).collect()),
        }
    }

    #[test]
    fn test_densify_fills_gaps() {
        let rows = densify(vec![model(0, &["h"]), model(2, &["b", "x"])], 20);
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_empty());
        assert_eq!(rows[2], vec!["b", "x"]);
    }

    #[test]
    fn test_densify_truncates_to_width() {
        let rows = densify(vec![model(0, &["a", "b", "c"])], 2);
        assert_eq!(rows[0], vec!["a", "b"]);
    }

    #[test]
    fn test_data_row_index() {
        assert!(data_row_index(&RowRange::columns("m", 20)).is_err());
        assert!(data_row_index(&RowRange::row("m", RowIndex::new(0), 20)).is_err());
        assert_eq!(
            data_row_index(&RowRange::row("m", RowIndex::new(4), 20)).unwrap(),
            RowIndex::new(4)
        );
    }
}
