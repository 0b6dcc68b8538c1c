//! Dashboard view model
//!
//! The merged snapshot of every controller source at one refresh tick. A new
//! value is built from scratch on each tick; nothing here is patched in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::messages::{
    AiScoreResponse, Breakdown, FindingsResponse, HealthInfo, McpServersResponse, NamespaceScore,
    ResourceDetailResponse, ResourceSummary, ScoreResponse, TrendPoint,
};

/// Merged snapshot consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewModel {
    pub score: ScoreResponse,
    pub findings: FindingsResponse,
    pub resource_summary: ResourceSummary,
    pub breakdown: Breakdown,
    pub trends: Vec<TrendPoint>,
    pub resource_detail: ResourceDetailResponse,
    pub mcp_servers: McpServersResponse,
    pub health: HealthInfo,
    pub ai_score: AiScoreResponse,
    pub namespaces: Vec<NamespaceScore>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardViewModel {
    /// A view model with every source at its documented default
    pub fn empty(fetched_at: DateTime<Utc>) -> Self {
        Self {
            score: ScoreResponse::default(),
            findings: FindingsResponse::default(),
            resource_summary: ResourceSummary::default(),
            breakdown: Breakdown::default(),
            trends: Vec::new(),
            resource_detail: ResourceDetailResponse::default(),
            mcp_servers: McpServersResponse::default(),
            health: HealthInfo::default(),
            ai_score: AiScoreResponse::default(),
            namespaces: Vec::new(),
            fetched_at,
        }
    }

    /// Badge count for the resources tab
    pub fn resource_total(&self) -> u32 {
        self.resource_detail.total
    }

    /// Badge count for the findings tab
    pub fn findings_total(&self) -> u32 {
        self.findings.total
    }
}
