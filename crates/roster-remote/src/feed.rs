//! Articles feed adapter

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use roster_core::entities::{ArticlePage, Cursor};
use roster_core::traits::{ArticleFeed, RepoResult};

use crate::client::PlatformClient;

/// One-page-at-a-time access to the group's articles endpoint
#[derive(Debug, Clone)]
pub struct HttpArticleFeed {
    client: Arc<PlatformClient>,
}

impl HttpArticleFeed {
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArticleFeed for HttpArticleFeed {
    #[instrument(skip(self))]
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> RepoResult<ArticlePage> {
        let page = self.client.fetch_articles(cursor).await?;
        debug!(
            count = page.articles.len(),
            eof = page.is_end_of_feed(),
            "Fetched articles page"
        );
        Ok(page)
    }
}
