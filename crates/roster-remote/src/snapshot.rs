//! Member snapshot extraction
//!
//! Strategies, first success wins:
//!
//! 1. each group page URL, reading a streamed flight chunk or `__NEXT_DATA__`
//! 2. the group JSON endpoint
//!
//! Failures inside a strategy are logged and swallowed. Only when every
//! strategy has failed does the extractor report that no data exists.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use roster_core::entities::{MemberSnapshot, RemoteMember};
use roster_core::traits::{MemberSource, RepoResult};

use crate::client::PlatformClient;
use crate::error::RemoteError;
use crate::payload::{self, PagePayload};

/// Scrapes the current member list from the platform
#[derive(Debug, Clone)]
pub struct SnapshotExtractor {
    client: Arc<PlatformClient>,
}

impl SnapshotExtractor {
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }

    /// Run every strategy in order and return the raw member records
    pub async fn extract(&self) -> Result<Vec<Value>, RemoteError> {
        for url in self.client.page_urls() {
            match self.from_page(&url).await {
                Ok(members) => {
                    info!(url = %url, count = members.len(), "Members extracted from page");
                    return Ok(members);
                }
                Err(e) => warn!(url = %url, error = %e, "Page strategy failed"),
            }
        }

        let url = self.client.group_api_url();
        match self.client.get_json(&url).await {
            Ok(doc) => {
                if let Some(members) = payload::members_from_api(doc) {
                    info!(url = %url, count = members.len(), "Members extracted from group API");
                    return Ok(members);
                }
                debug!(url = %url, "Group API response has no members");
            }
            Err(e) => warn!(url = %url, error = %e, "Group API strategy failed"),
        }

        Err(RemoteError::NoData)
    }

    async fn from_page(&self, url: &str) -> Result<Vec<Value>, RemoteError> {
        let html = self.client.get_text(url).await?;
        match payload::extract_from_html(&html)? {
            PagePayload::Members(members) => Ok(members),
            PagePayload::Document(doc) => payload::find_members(&doc)
                .cloned()
                .ok_or(RemoteError::Payload(payload::PayloadError::NoMembersArray)),
        }
    }
}

/// Decode raw records, skipping entries that are not objects
fn decode_members(raw: Vec<Value>) -> MemberSnapshot {
    let raw_total = raw.len();
    let members = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RemoteMember>(value) {
            Ok(member) => Some(member),
            Err(e) => {
                debug!(error = %e, "Skipping undecodable member record");
                None
            }
        })
        .collect();
    MemberSnapshot::new(members, raw_total)
}

#[async_trait]
impl MemberSource for SnapshotExtractor {
    #[instrument(skip(self))]
    async fn fetch_members(&self) -> RepoResult<MemberSnapshot> {
        let raw = self.extract().await?;
        Ok(decode_members(raw))
    }
}
