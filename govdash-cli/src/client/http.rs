//! HTTP Governance Client
//!
//! Fetches controller endpoints with reqwest. Every request disables caching
//! so a refresh never observes a stale response.

use async_trait::async_trait;
use govdash_shared::{
    AiActionResponse, AiScoreResponse, Breakdown, FindingsResponse, HealthInfo, McpServersResponse,
    NamespacesResponse, ResourceDetailResponse, ResourceSummary, ScoreResponse, TrendsResponse,
};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{Endpoint, GovernanceSource, SourceError, AI_REFRESH_PATH, AI_TOGGLE_PATH};
use crate::config::DashboardConfig;

/// Client for a live governance controller
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    /// Controller base URL, without trailing slash
    base_url: String,
    scan_path: String,
}

impl HttpSource {
    /// Create a new client
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .default_headers(headers)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            scan_path: "/api/governance/scan/refresh".to_string(),
        }
    }

    /// Create a client from dashboard configuration
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(&config.controller_url, config.request_timeout()).with_scan_path(&config.scan_path)
    }

    pub fn with_scan_path(mut self, path: &str) -> Self {
        self.scan_path = path.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, SourceError> {
        let url = self.url(endpoint.path());
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(map_transport_error)?;

        check_status(response)?
            .json::<T>()
            .await
            .map_err(|e| SourceError::InvalidResponse(format!("{}: {}", endpoint, e)))
    }

    async fn post(&self, path: &str) -> Result<reqwest::Response, SourceError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).send().await.map_err(map_transport_error)?;
        check_status(response)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        self.post(path)
            .await?
            .json::<T>()
            .await
            .map_err(|e| SourceError::InvalidResponse(format!("{}: {}", path, e)))
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else if e.is_decode() {
        SourceError::InvalidResponse(e.to_string())
    } else {
        SourceError::ConnectionFailed(e.to_string())
    }
}

#[async_trait]
impl GovernanceSource for HttpSource {
    async fn score(&self) -> Result<ScoreResponse, SourceError> {
        self.get_json(Endpoint::Score).await
    }

    async fn findings(&self) -> Result<FindingsResponse, SourceError> {
        self.get_json(Endpoint::Findings).await
    }

    async fn resources(&self) -> Result<ResourceSummary, SourceError> {
        self.get_json(Endpoint::Resources).await
    }

    async fn breakdown(&self) -> Result<Breakdown, SourceError> {
        self.get_json(Endpoint::Breakdown).await
    }

    async fn trends(&self) -> Result<TrendsResponse, SourceError> {
        self.get_json(Endpoint::Trends).await
    }

    async fn resource_detail(&self) -> Result<ResourceDetailResponse, SourceError> {
        self.get_json(Endpoint::ResourceDetail).await
    }

    async fn mcp_servers(&self) -> Result<McpServersResponse, SourceError> {
        self.get_json(Endpoint::McpServers).await
    }

    async fn health(&self) -> Result<HealthInfo, SourceError> {
        self.get_json(Endpoint::Health).await
    }

    async fn ai_score(&self) -> Result<AiScoreResponse, SourceError> {
        self.get_json(Endpoint::AiScore).await
    }

    async fn namespaces(&self) -> Result<NamespacesResponse, SourceError> {
        self.get_json(Endpoint::Namespaces).await
    }

    async fn trigger_scan(&self) -> Result<(), SourceError> {
        self.post(&self.scan_path).await.map(|_| ())
    }

    async fn refresh_ai_score(&self) -> Result<AiActionResponse, SourceError> {
        self.post_json(AI_REFRESH_PATH).await
    }

    async fn toggle_ai_scan(&self) -> Result<AiActionResponse, SourceError> {
        self.post_json(AI_TOGGLE_PATH).await
    }
}
