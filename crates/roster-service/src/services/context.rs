//! Service context - dependency container for services
//!
//! Holds the row store, the remote platform ports, collection names and the
//! run-level write guard.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use roster_common::{CollectionsConfig, SyncConfig};
use roster_core::traits::{ArticleFeed, MemberSource, RowStore};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap and clones share the same write guard, so a sync run and
/// a manual edit started from different clones still exclude each other.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn RowStore>,
    member_source: Arc<dyn MemberSource>,
    article_feed: Arc<dyn ArticleFeed>,
    collections: CollectionsConfig,
    sync: SyncConfig,
    write_guard: Arc<Mutex<()>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        store: Arc<dyn RowStore>,
        member_source: Arc<dyn MemberSource>,
        article_feed: Arc<dyn ArticleFeed>,
        collections: CollectionsConfig,
        sync: SyncConfig,
    ) -> Self {
        Self {
            store,
            member_source,
            article_feed,
            collections,
            sync,
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    // === Ports ===

    pub fn store(&self) -> &dyn RowStore {
        self.store.as_ref()
    }

    pub fn member_source(&self) -> &dyn MemberSource {
        self.member_source.as_ref()
    }

    pub fn article_feed(&self) -> &dyn ArticleFeed {
        self.article_feed.as_ref()
    }

    // === Settings ===

    pub fn collections(&self) -> &CollectionsConfig {
        &self.collections
    }

    pub fn sync_config(&self) -> &SyncConfig {
        &self.sync
    }

    // === Concurrency ===

    /// Take the roster write guard without waiting
    ///
    /// # Errors
    /// Returns `ServiceError::SyncInProgress` while another run or manual
    /// write holds the guard.
    pub fn try_lock_writes(&self) -> ServiceResult<MutexGuard<'_, ()>> {
        self.write_guard
            .try_lock()
            .map_err(|_| ServiceError::SyncInProgress)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"RowStore")
            .field("member_source", &"MemberSource")
            .field("article_feed", &"ArticleFeed")
            .field("collections", &self.collections)
            .field("sync", &self.sync)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn RowStore>>,
    member_source: Option<Arc<dyn MemberSource>>,
    article_feed: Option<Arc<dyn ArticleFeed>>,
    collections: Option<CollectionsConfig>,
    sync: Option<SyncConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn RowStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn member_source(mut self, source: Arc<dyn MemberSource>) -> Self {
        self.member_source = Some(source);
        self
    }

    pub fn article_feed(mut self, feed: Arc<dyn ArticleFeed>) -> Self {
        self.article_feed = Some(feed);
        self
    }

    pub fn collections(mut self, collections: CollectionsConfig) -> Self {
        self.collections = Some(collections);
        self
    }

    pub fn sync_config(mut self, sync: SyncConfig) -> Self {
        self.sync = Some(sync);
        self
    }

    /// Build the ServiceContext
    ///
    /// Collection names and sync limits fall back to their defaults.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a port is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.member_source
                .ok_or_else(|| ServiceError::validation("member_source is required"))?,
            self.article_feed
                .ok_or_else(|| ServiceError::validation("article_feed is required"))?,
            self.collections.unwrap_or_default(),
            self.sync.unwrap_or_default(),
        ))
    }
}
