//! HTTP client for the community platform
//!
//! The platform serves different markup to non-browser clients, so every
//! request carries browser-like headers.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use roster_core::entities::{ArticlePage, Cursor};

use crate::error::RemoteError;

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const BROWSER_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// Connection settings for [`PlatformClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site root without a trailing slash
    pub base_url: String,
    pub group_id: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Articles requested per page
    pub page_size_hint: u32,
}

/// Body of an articles page request
#[derive(Debug, Serialize)]
struct ArticlesRequest<'a> {
    gid: &'a str,
    wql: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    s_t: Option<&'a Cursor>,
}

/// Thin wrapper around `reqwest::Client` that knows the platform's URLs
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl PlatformClient {
    pub fn new(config: ClientConfig) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_LANGUAGE));
        let referer = HeaderValue::from_str(&format!("{}/", config.base_url))
            .map_err(|e| RemoteError::ClientSetup(e.to_string()))?;
        headers.insert(REFERER, referer);

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::ClientSetup(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Group pages that may embed the member list, in the order they are tried
    pub fn page_urls(&self) -> [String; 2] {
        let ClientConfig { base_url, group_id, .. } = &self.config;
        [
            format!("{base_url}/{group_id}"),
            format!("{base_url}/group/{group_id}"),
        ]
    }

    /// Group JSON endpoint used as the last resort
    pub fn group_api_url(&self) -> String {
        format!("{}/api/groups/{}", self.config.base_url, self.config.group_id)
    }

    pub fn articles_url(&self) -> String {
        format!("{}/api/articles", self.config.base_url)
    }

    /// Fetch a page as text; non-success statuses are errors
    pub async fn get_text(&self, url: &str) -> Result<String, RemoteError> {
        debug!(url = %url, "Fetching page");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::transport(url, &e))?;
        let response = ensure_success(url, response)?;

        response
            .text()
            .await
            .map_err(|e| RemoteError::transport(url, &e))
    }

    /// Fetch a JSON document
    pub async fn get_json(&self, url: &str) -> Result<Value, RemoteError> {
        debug!(url = %url, "Fetching JSON");
        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| RemoteError::transport(url, &e))?;
        let response = ensure_success(url, response)?;

        response.json().await.map_err(|e| RemoteError::decode(url, e))
    }

    /// Fetch one page of the articles feed
    pub async fn fetch_articles(&self, cursor: Option<&Cursor>) -> Result<ArticlePage, RemoteError> {
        let url = self.articles_url();
        let body = ArticlesRequest {
            gid: &self.config.group_id,
            wql: self.config.page_size_hint,
            s_t: cursor,
        };

        let response = self
            .http
            .post(&url)
            .header(ORIGIN, self.config.base_url.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::transport(&url, &e))?;
        let response = ensure_success(&url, response)?;

        response.json().await.map_err(|e| RemoteError::decode(&url, e))
    }
}

fn ensure_success(url: &str, response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}
