//! In-memory implementation of RowStore

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use roster_core::traits::{RepoResult, Row, RowStore};
use roster_core::value_objects::{RangeUpdate, RowIndex, RowRange};

use super::error::{collection_not_found, row_out_of_bounds};
use super::{data_row_index, trim_trailing_empty};

#[derive(Debug)]
struct Collection {
    id: i64,
    rows: Vec<Row>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Collection>,
    next_id: i64,
}

impl Inner {
    fn get_mut(&mut self, name: &str) -> RepoResult<&mut Collection> {
        self.collections
            .get_mut(name)
            .ok_or_else(|| collection_not_found(name))
    }

    fn write_row(&mut self, range: &RowRange, row: Row) -> RepoResult<()> {
        let index = data_row_index(range)?;
        let collection = self.get_mut(range.collection())?;
        if collection.rows.len() <= index.get() {
            collection.rows.resize_with(index.get() + 1, Vec::new);
        }
        collection.rows[index.get()] = trim_trailing_empty(row);
        Ok(())
    }
}

/// Row store kept entirely in memory
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryRowStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection with a header row; existing collections are left untouched
    pub fn ensure_collection(&self, name: &str, header: &[&str]) -> i64 {
        let mut inner = self.inner.write();
        if let Some(existing) = inner.collections.get(name) {
            return existing.id;
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.collections.insert(
            name.to_string(),
            Collection {
                id,
                rows: vec![header.iter().map(|h| (*h).to_string()).collect()],
            },
        );
        id
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    #[instrument(skip(self))]
    async fn read_rows(&self, collection: &str, range: &RowRange) -> RepoResult<Vec<Row>> {
        let inner = self.inner.read();
        let stored = inner
            .collections
            .get(collection)
            .ok_or_else(|| collection_not_found(collection))?;

        Ok(stored
            .rows
            .iter()
            .map(|row| row.iter().take(range.width()).cloned().collect())
            .collect())
    }

    #[instrument(skip(self, row))]
    async fn append_row(&self, collection: &str, range: &RowRange, row: Row) -> RepoResult<()> {
        self.append_rows(collection, range, vec![row]).await
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    async fn append_rows(&self, collection: &str, range: &RowRange, rows: Vec<Row>) -> RepoResult<()> {
        let mut inner = self.inner.write();
        let stored = inner.get_mut(collection)?;
        stored.rows.extend(rows.into_iter().map(trim_trailing_empty));
        Ok(())
    }

    #[instrument(skip(self, row))]
    async fn update_range(&self, range: &RowRange, row: Row) -> RepoResult<()> {
        self.inner.write().write_row(range, row)
    }

    #[instrument(skip(self, updates), fields(count = updates.len()))]
    async fn batch_update(&self, updates: Vec<RangeUpdate>) -> RepoResult<()> {
        let mut inner = self.inner.write();

        // Validate the whole batch before touching anything
        for update in &updates {
            data_row_index(&update.range)?;
            if !inner.collections.contains_key(update.range.collection()) {
                return Err(collection_not_found(update.range.collection()));
            }
        }

        for update in updates {
            inner.write_row(&update.range, update.row)?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_row(&self, collection_id: i64, index: RowIndex) -> RepoResult<()> {
        let mut inner = self.inner.write();
        let (name, stored) = inner
            .collections
            .iter_mut()
            .find(|(_, c)| c.id == collection_id)
            .ok_or_else(|| collection_not_found(format!("#{collection_id}")))?;

        if index.is_header() || index.get() >= stored.rows.len() {
            return Err(row_out_of_bounds(name, index));
        }
        stored.rows.remove(index.get());
        Ok(())
    }

    async fn resolve_collection_id(&self, name: &str) -> RepoResult<Option<i64>> {
        Ok(self.inner.read().collections.get(name).map(|c| c.id))
    }
}
