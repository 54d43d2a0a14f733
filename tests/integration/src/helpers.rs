//! Test helpers for integration tests
//!
//! `TestServer` runs the real router on an ephemeral port. Storage is the
//! in-memory row store and the community platform is a wiremock server whose
//! snapshot and article feed each test controls.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use roster_api::{create_app, create_app_state};
use roster_common::AppConfig;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{flight_page, GROUP_ID};

/// Header naming the operator of manual edits
pub const OPERATOR_HEADER: &str = "X-Operator-Id";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub platform: MockServer,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose platform has no data mounted yet
    pub async fn start() -> Result<Self> {
        let platform = MockServer::start().await;
        let config = test_config(&platform.uri())?;

        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            addr,
            client,
            platform,
            _handle: handle,
        })
    }

    /// Replace what the platform serves: a group page and a single feed page
    pub async fn serve_platform(&self, members: &[Value], articles: &[Value]) {
        self.platform.reset().await;
        self.mount_snapshot(members).await;

        Mock::given(method("POST"))
            .and(path("/api/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cs": articles,
                "eof": "Y",
            })))
            .mount(&self.platform)
            .await;
    }

    /// Serve the group page while the articles endpoint stays unmounted
    pub async fn serve_snapshot_only(&self, members: &[Value]) {
        self.platform.reset().await;
        self.mount_snapshot(members).await;
    }

    async fn mount_snapshot(&self, members: &[Value]) {
        Mock::given(method("GET"))
            .and(path(format!("/{GROUP_ID}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(flight_page(members)),
            )
            .mount(&self.platform)
            .await;
    }

    /// Take the platform offline: every strategy sees an error status
    pub async fn platform_down(&self) {
        self.platform.reset().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(503))
            .mount(&self.platform)
            .await;
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// POST /api/sync
    pub async fn sync(&self) -> Result<Response> {
        Ok(self.client.post(self.url("/api/sync")).send().await?)
    }
}

/// Memory-backed configuration pointing at the mock platform
pub fn test_config(platform_url: &str) -> Result<AppConfig> {
    let vars: HashMap<&str, String> = HashMap::from([
        ("API_PORT", "0".to_string()),
        ("STORAGE_BACKEND", "memory".to_string()),
        ("PLATFORM_BASE_URL", platform_url.to_string()),
        ("PLATFORM_GROUP_ID", GROUP_ID.to_string()),
        ("PLATFORM_TIMEOUT_SECS", "5".to_string()),
        ("SYNC_MAX_PAGES", "3".to_string()),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}
