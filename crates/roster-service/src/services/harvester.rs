//! Article harvesting
//!
//! Walks the articles feed page by page, newest first, until the feed runs
//! out or the page limit is reached.

use tracing::{debug, info, instrument, warn};

use roster_core::entities::{Cursor, RawArticle};
use roster_core::traits::ArticleFeed;

/// Why harvesting stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestStop {
    /// A page came back with no articles
    EmptyBatch,
    /// The feed flagged its last page
    EndOfFeed,
    /// No cursor could be derived for the next request
    NoCursor,
    /// The next cursor equals the one just used
    StalledCursor,
    /// The page limit was reached
    PageLimit,
    /// A page request failed; collected articles are kept
    TransportError,
}

/// Articles collected by one harvest
#[derive(Debug, Clone)]
pub struct Harvest {
    pub articles: Vec<RawArticle>,
    /// Pages that returned successfully
    pub pages: usize,
    pub stop: HarvestStop,
}

/// Bounded walker over an [`ArticleFeed`]
pub struct ArticleHarvester<'a> {
    feed: &'a dyn ArticleFeed,
    max_pages: usize,
}

impl<'a> ArticleHarvester<'a> {
    pub fn new(feed: &'a dyn ArticleFeed, max_pages: usize) -> Self {
        Self { feed, max_pages }
    }

    /// Collect articles; never fails, a broken page ends the walk early
    #[instrument(skip(self), fields(max_pages = self.max_pages))]
    pub async fn harvest(&self) -> Harvest {
        let mut articles = Vec::new();
        let mut cursor: Option<Cursor> = None;
        let mut pages = 0;

        let stop = loop {
            if pages >= self.max_pages {
                break HarvestStop::PageLimit;
            }

            let page = match self.feed.fetch_page(cursor.as_ref()).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(page = pages + 1, error = %e, "Article page failed, keeping partial results");
                    break HarvestStop::TransportError;
                }
            };
            pages += 1;

            if page.articles.is_empty() {
                break HarvestStop::EmptyBatch;
            }

            let end_of_feed = page.is_end_of_feed();
            let next = page.derive_cursor();
            articles.extend(page.articles);

            if end_of_feed {
                break HarvestStop::EndOfFeed;
            }
            let Some(next) = next else {
                break HarvestStop::NoCursor;
            };
            if cursor.as_ref() == Some(&next) {
                break HarvestStop::StalledCursor;
            }
            debug!(page = pages, cursor = %next.as_value(), "Advancing feed cursor");
            cursor = Some(next);
        };

        info!(articles = articles.len(), pages, stop = ?stop, "Harvest finished");
        Harvest {
            articles,
            pages,
            stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::ScriptedFeed;
    use serde_json::json;

    fn page(author: &str, ts: i64, cursor: serde_json::Value) -> serde_json::Value {
        json!({"cs": [{"wid": author, "ot": ts, "at": "글", "c": "본문"}], "s_t": cursor})
    }

    #[tokio::test]
    async fn test_stops_at_page_limit() {
        let feed = ScriptedFeed::endless();
        let harvest = ArticleHarvester::new(&feed, 30).harvest().await;

        assert_eq!(harvest.pages, 30);
        assert_eq!(harvest.stop, HarvestStop::PageLimit);
        assert_eq!(harvest.articles.len(), 30);
        assert_eq!(feed.calls(), 30);
    }

    #[tokio::test]
    async fn test_first_request_has_no_cursor() {
        let feed = ScriptedFeed::pages(vec![
            page("1", 100, json!("c1")),
            page("2", 90, json!("c2")),
            json!({"cs": [], "eof": "N"}),
        ]);
        let harvest = ArticleHarvester::new(&feed, 30).harvest().await;

        assert_eq!(harvest.stop, HarvestStop::EmptyBatch);
        assert_eq!(harvest.articles.len(), 2);
        assert_eq!(
            feed.cursors(),
            vec![None, Some(json!("c1")), Some(json!("c2"))]
        );
    }

    #[tokio::test]
    async fn test_end_of_feed_keeps_last_page() {
        let feed = ScriptedFeed::pages(vec![
            page("1", 100, json!("c1")),
            json!({"cs": [{"wid": "2", "ot": 50}], "eof": "Y", "s_t": "c2"}),
        ]);
        let harvest = ArticleHarvester::new(&feed, 30).harvest().await;

        assert_eq!(harvest.stop, HarvestStop::EndOfFeed);
        assert_eq!(harvest.articles.len(), 2);
    }

    #[tokio::test]
    async fn test_cursor_falls_back_to_last_timestamp() {
        let feed = ScriptedFeed::pages(vec![
            json!({"cs": [{"wid": "1", "ot": 100}, {"wid": "1", "ot": 80}]}),
            json!({"cs": []}),
        ]);
        ArticleHarvester::new(&feed, 30).harvest().await;

        assert_eq!(feed.cursors(), vec![None, Some(json!(80))]);
    }

    #[tokio::test]
    async fn test_stalled_cursor() {
        let feed = ScriptedFeed::pages(vec![
            page("1", 100, json!("same")),
            page("2", 90, json!("same")),
            page("3", 80, json!("other")),
        ]);
        let harvest = ArticleHarvester::new(&feed, 30).harvest().await;

        assert_eq!(harvest.stop, HarvestStop::StalledCursor);
        assert_eq!(harvest.pages, 2);
    }

    #[tokio::test]
    async fn test_no_cursor() {
        let feed = ScriptedFeed::pages(vec![json!({"cs": [{"wid": "1", "ot": 0}], "s_t": null})]);
        let harvest = ArticleHarvester::new(&feed, 30).harvest().await;

        assert_eq!(harvest.stop, HarvestStop::NoCursor);
        assert_eq!(harvest.articles.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_keeps_partial_results() {
        // script runs out after one page, the next call fails
        let feed = ScriptedFeed::pages(vec![page("1", 100, json!("c1"))]);
        let harvest = ArticleHarvester::new(&feed, 30).harvest().await;

        assert_eq!(harvest.stop, HarvestStop::TransportError);
        assert_eq!(harvest.pages, 1);
        assert_eq!(harvest.articles.len(), 1);
    }
}
