//! Test doubles for the service ports

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use roster_common::{CollectionsConfig, SyncConfig};
use roster_core::entities::{ArticlePage, Cursor, MemberSnapshot, RemoteMember};
use roster_core::traits::{ArticleFeed, MemberSource, RepoResult, Row, RowStore};
use roster_core::value_objects::{RangeUpdate, RowIndex, RowRange, AUDIT_HEADER, MEMBER_HEADER};
use roster_core::DomainError;
use roster_db::MemoryRowStore;

use super::context::ServiceContext;

/// Feed replaying canned pages, or producing fresh pages forever
pub struct ScriptedFeed {
    pages: Mutex<VecDeque<Value>>,
    endless: bool,
    cursors: Mutex<Vec<Option<Value>>>,
}

impl ScriptedFeed {
    /// Replay `pages`; requests past the end fail
    pub fn pages(pages: Vec<Value>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            endless: false,
            cursors: Mutex::new(Vec::new()),
        }
    }

    /// One article and a new cursor on every page, never end-of-feed
    pub fn endless() -> Self {
        Self {
            endless: true,
            ..Self::pages(Vec::new())
        }
    }

    /// Feed with no articles at all
    pub fn empty() -> Self {
        Self::pages(vec![json!({"cs": [], "eof": "Y"})])
    }

    pub fn calls(&self) -> usize {
        self.cursors.lock().len()
    }

    /// Cursor sent with each request
    pub fn cursors(&self) -> Vec<Option<Value>> {
        self.cursors.lock().clone()
    }
}

#[async_trait]
impl ArticleFeed for ScriptedFeed {
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> RepoResult<ArticlePage> {
        let call = {
            let mut cursors = self.cursors.lock();
            cursors.push(cursor.map(|c| c.as_value().clone()));
            cursors.len()
        };

        let page = if self.endless {
            json!({"cs": [{"wid": "1", "ot": 2_000_000_000 - call}], "s_t": format!("c{call}")})
        } else {
            self.pages
                .lock()
                .pop_front()
                .ok_or_else(|| DomainError::RemoteTransport("script exhausted".to_string()))?
        };

        serde_json::from_value(page).map_err(|e| DomainError::RemoteTransport(e.to_string()))
    }
}

/// Snapshot source returning a fixed, replaceable member list
pub struct StaticSource {
    members: Mutex<Option<Vec<RemoteMember>>>,
}

impl StaticSource {
    pub fn new(members: Vec<RemoteMember>) -> Self {
        Self {
            members: Mutex::new(Some(members)),
        }
    }

    /// Source whose every strategy fails
    pub fn unavailable() -> Self {
        Self {
            members: Mutex::new(None),
        }
    }

    pub fn replace(&self, members: Vec<RemoteMember>) {
        *self.members.lock() = Some(members);
    }
}

#[async_trait]
impl MemberSource for StaticSource {
    async fn fetch_members(&self) -> RepoResult<MemberSnapshot> {
        self.members
            .lock()
            .clone()
            .map(MemberSnapshot::from)
            .ok_or_else(|| DomainError::RemoteUnavailable("no strategy produced data".to_string()))
    }
}

/// Memory store that records deletions and can fail chosen writes
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryRowStore,
    deleted: Mutex<Vec<RowIndex>>,
    failing_batches: HashSet<usize>,
    batch_calls: Mutex<usize>,
    failing_deletes: HashSet<usize>,
    delete_calls: Mutex<usize>,
    failing_appends: Mutex<HashSet<String>>,
}

impl RecordingStore {
    pub fn new(inner: MemoryRowStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Fail the given 1-based `batch_update` calls
    pub fn failing_batches(mut self, calls: &[usize]) -> Self {
        self.failing_batches = calls.iter().copied().collect();
        self
    }

    /// Fail the given 1-based `delete_row` calls
    pub fn failing_deletes(mut self, calls: &[usize]) -> Self {
        self.failing_deletes = calls.iter().copied().collect();
        self
    }

    /// Fail the next `append_rows` call on `collection`
    pub fn failing_append_to(self, collection: &str) -> Self {
        self.failing_appends.lock().insert(collection.to_string());
        self
    }

    /// Rows actually deleted, in call order
    pub fn deleted(&self) -> Vec<RowIndex> {
        self.deleted.lock().clone()
    }

    pub fn batch_calls(&self) -> usize {
        *self.batch_calls.lock()
    }
}

#[async_trait]
impl RowStore for RecordingStore {
    async fn read_rows(&self, collection: &str, range: &RowRange) -> RepoResult<Vec<Row>> {
        self.inner.read_rows(collection, range).await
    }

    async fn append_row(&self, collection: &str, range: &RowRange, row: Row) -> RepoResult<()> {
        self.inner.append_row(collection, range, row).await
    }

    async fn append_rows(&self, collection: &str, range: &RowRange, rows: Vec<Row>) -> RepoResult<()> {
        if self.failing_appends.lock().remove(collection) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        self.inner.append_rows(collection, range, rows).await
    }

    async fn update_range(&self, range: &RowRange, row: Row) -> RepoResult<()> {
        self.inner.update_range(range, row).await
    }

    async fn batch_update(&self, updates: Vec<RangeUpdate>) -> RepoResult<()> {
        let call = {
            let mut calls = self.batch_calls.lock();
            *calls += 1;
            *calls
        };
        if self.failing_batches.contains(&call) {
            return Err(DomainError::DatabaseError("payload too large".to_string()));
        }
        self.inner.batch_update(updates).await
    }

    async fn delete_row(&self, collection_id: i64, index: RowIndex) -> RepoResult<()> {
        let call = {
            let mut calls = self.delete_calls.lock();
            *calls += 1;
            *calls
        };
        if self.failing_deletes.contains(&call) {
            return Err(DomainError::DatabaseError("lock timeout".to_string()));
        }
        self.deleted.lock().push(index);
        self.inner.delete_row(collection_id, index).await
    }

    async fn resolve_collection_id(&self, name: &str) -> RepoResult<Option<i64>> {
        self.inner.resolve_collection_id(name).await
    }
}

/// Memory store with the three default collections created
pub fn seeded_store() -> MemoryRowStore {
    let store = MemoryRowStore::new();
    let collections = CollectionsConfig::default();
    store.ensure_collection(&collections.active, &MEMBER_HEADER);
    store.ensure_collection(&collections.withdrawn, &MEMBER_HEADER);
    store.ensure_collection(&collections.audit, &AUDIT_HEADER);
    store
}

pub fn context(
    store: Arc<dyn RowStore>,
    source: Arc<dyn MemberSource>,
    feed: Arc<dyn ArticleFeed>,
) -> ServiceContext {
    ServiceContext::new(
        store,
        source,
        feed,
        CollectionsConfig::default(),
        SyncConfig::default(),
    )
}

/// Remote record with a canonical join time and a recent visit
pub fn remote(member_id: &str, nickname: &str) -> RemoteMember {
    RemoteMember {
        member_id: member_id.to_string(),
        nickname: nickname.to_string(),
        joined_at: 1_600_000_000,
        visited_at: 1_699_900_000,
        ..Default::default()
    }
}

pub fn banned(member_id: &str, nickname: &str) -> RemoteMember {
    RemoteMember {
        ban_flag: "Y".to_string(),
        ..remote(member_id, nickname)
    }
}
