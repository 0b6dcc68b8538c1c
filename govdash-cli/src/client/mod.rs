//! Governance Controller Client Layer
//!
//! A thin fetch wrapper per controller endpoint. Clients do not retry and do
//! not cache; every call reflects the controller's current state.
//!
//! `HttpSource` talks to a live controller over HTTP. Tests substitute their
//! own `GovernanceSource` implementation.

mod http;

pub use http::HttpSource;

use async_trait::async_trait;
use govdash_shared::{
    AiActionResponse, AiScoreResponse, Breakdown, FindingsResponse, HealthInfo, McpServersResponse,
    NamespacesResponse, ResourceDetailResponse, ResourceSummary, ScoreResponse, TrendsResponse,
};
use std::fmt;

/// Controller endpoints consumed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Score,
    Findings,
    Resources,
    Breakdown,
    Trends,
    ResourceDetail,
    McpServers,
    Health,
    AiScore,
    Namespaces,
}

impl Endpoint {
    pub const REQUIRED: [Endpoint; 6] = [
        Endpoint::Score,
        Endpoint::Findings,
        Endpoint::Resources,
        Endpoint::Breakdown,
        Endpoint::Trends,
        Endpoint::ResourceDetail,
    ];

    pub const OPTIONAL: [Endpoint; 4] = [
        Endpoint::McpServers,
        Endpoint::Health,
        Endpoint::AiScore,
        Endpoint::Namespaces,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Score => "/api/governance/score",
            Endpoint::Findings => "/api/governance/findings",
            Endpoint::Resources => "/api/governance/resources",
            Endpoint::Breakdown => "/api/governance/breakdown",
            Endpoint::Trends => "/api/governance/trends",
            Endpoint::ResourceDetail => "/api/governance/resources/detail",
            Endpoint::McpServers => "/api/governance/mcp-servers",
            Endpoint::Health => "/api/health",
            Endpoint::AiScore => "/api/governance/ai-score",
            Endpoint::Namespaces => "/api/governance/namespaces",
        }
    }

    /// Whether a failure of this source fails the whole refresh
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Score => "score",
            Endpoint::Findings => "findings",
            Endpoint::Resources => "resources",
            Endpoint::Breakdown => "breakdown",
            Endpoint::Trends => "trends",
            Endpoint::ResourceDetail => "resource-detail",
            Endpoint::McpServers => "mcp-servers",
            Endpoint::Health => "health",
            Endpoint::AiScore => "ai-score",
            Endpoint::Namespaces => "namespaces",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// AI-agent control endpoints
pub const AI_REFRESH_PATH: &str = "/api/governance/ai-score/refresh";
pub const AI_TOGGLE_PATH: &str = "/api/governance/ai-score/toggle";

/// Error types for source fetches
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One fetch per controller endpoint
#[async_trait]
pub trait GovernanceSource: Send + Sync {
    async fn score(&self) -> Result<ScoreResponse, SourceError>;

    async fn findings(&self) -> Result<FindingsResponse, SourceError>;

    async fn resources(&self) -> Result<ResourceSummary, SourceError>;

    async fn breakdown(&self) -> Result<Breakdown, SourceError>;

    async fn trends(&self) -> Result<TrendsResponse, SourceError>;

    async fn resource_detail(&self) -> Result<ResourceDetailResponse, SourceError>;

    async fn mcp_servers(&self) -> Result<McpServersResponse, SourceError>;

    async fn health(&self) -> Result<HealthInfo, SourceError>;

    async fn ai_score(&self) -> Result<AiScoreResponse, SourceError>;

    async fn namespaces(&self) -> Result<NamespacesResponse, SourceError>;

    /// Ask the controller to re-evaluate; the scan itself runs asynchronously
    async fn trigger_scan(&self) -> Result<(), SourceError>;

    /// Force one AI-agent evaluation; results show up in a later `ai_score()`
    async fn refresh_ai_score(&self) -> Result<AiActionResponse, SourceError>;

    /// Pause or resume the AI agent's periodic scanning
    async fn toggle_ai_scan(&self) -> Result<AiActionResponse, SourceError>;
}
