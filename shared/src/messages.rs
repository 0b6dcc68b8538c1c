//! Governance controller response schemas
//!
//! One type per REST endpoint the dashboard consumes. Every field carries a
//! serde default so that a partial or older controller payload still decodes
//! into a fully-populated value; downstream analytics never see a missing
//! field. Lists and maps also accept `null`, which the controller sends for
//! empty collections.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// =============================================================================
// Severity
// =============================================================================

/// Finding severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error for severity strings the dashboard does not know
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Critical" | "critical" => Ok(Severity::Critical),
            "High" | "high" => Ok(Severity::High),
            "Medium" | "medium" => Ok(Severity::Medium),
            "Low" | "low" => Ok(Severity::Low),
            other => Err(UnknownSeverity(other.to_string())),
        }
    }
}

/// Per-severity score deductions applied by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SeverityPenalties {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for SeverityPenalties {
    fn default() -> Self {
        Self {
            critical: 40,
            high: 25,
            medium: 15,
            low: 5,
        }
    }
}

impl SeverityPenalties {
    pub fn for_severity(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

// =============================================================================
// Findings
// =============================================================================

/// A single governance finding
///
/// `severity` is kept as the raw controller string; use [`Finding::severity`]
/// for the typed value. Unknown strings are preserved rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Finding {
    pub id: String,
    #[serde(rename = "severity")]
    pub severity_label: String,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<String>,
    pub namespace: String,
    pub impact: String,
    pub remediation: String,
}

impl Finding {
    /// Typed severity, `None` for strings outside the known set
    pub fn severity(&self) -> Option<Severity> {
        self.severity_label.parse().ok()
    }
}

/// `GET /api/governance/findings`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindingsResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub findings: Vec<Finding>,
    pub total: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub by_severity: HashMap<String, u32>,
}

// =============================================================================
// Score
// =============================================================================

/// Pass/fail status of a scoring category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Passing,
    Warning,
    Failing,
    #[default]
    Critical,
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CategoryStatus::Passing => "passing",
            CategoryStatus::Warning => "warning",
            CategoryStatus::Failing => "failing",
            CategoryStatus::Critical => "critical",
        };
        f.pad(s)
    }
}

/// One server's share of a cluster-level category score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerContribution {
    pub name: String,
    pub score: u32,
    pub grade: String,
}

/// A weighted scoring category
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreCategory {
    pub category: String,
    pub score: u32,
    pub weight: u32,
    pub weighted: f64,
    pub status: CategoryStatus,
    pub infra_absent: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde_as(as = "DefaultOnNull")]
    pub servers: Vec<ServerContribution>,
}

/// `GET /api/governance/score`
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreResponse {
    pub score: u32,
    pub grade: String,
    pub phase: String,
    pub timestamp: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub categories: Vec<ScoreCategory>,
    pub explanation: String,
    pub severity_penalties: SeverityPenalties,
}

impl Default for ScoreResponse {
    fn default() -> Self {
        Self {
            score: 0,
            grade: "F".to_string(),
            phase: "Unknown".to_string(),
            timestamp: None,
            categories: Vec::new(),
            explanation: String::new(),
            severity_penalties: SeverityPenalties::default(),
        }
    }
}

// =============================================================================
// Resources
// =============================================================================

/// `GET /api/governance/resources`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSummary {
    pub gateways_found: u32,
    pub agentgateway_backends: u32,
    pub agentgateway_policies: u32,
    #[serde(rename = "httpRoutes")]
    pub http_routes: u32,
    pub kagent_agents: u32,
    #[serde(rename = "kagentMCPServers")]
    pub kagent_mcp_servers: u32,
    #[serde(rename = "kagentRemoteMCPServers")]
    pub kagent_remote_mcp_servers: u32,
    pub compliant_resources: u32,
    pub non_compliant_resources: u32,
    #[serde(rename = "totalMCPEndpoints")]
    pub total_mcp_endpoints: u32,
    #[serde(rename = "exposedMCPEndpoints")]
    pub exposed_mcp_endpoints: u32,
}

/// Compliance status of a governed resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Compliant,
    Warning,
    Failing,
    Critical,
    #[default]
    #[serde(other)]
    Info,
}

/// Per-resource evaluation result
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceDetail {
    pub resource_ref: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub status: ResourceStatus,
    pub score: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub findings: Vec<Finding>,
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

/// `GET /api/governance/resources/detail`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDetailResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub resources: Vec<ResourceDetail>,
    pub total: u32,
}

// =============================================================================
// Breakdown
// =============================================================================

/// Canonical breakdown categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakdownCategory {
    AgentGateway,
    Authentication,
    Authorization,
    Cors,
    Tls,
    PromptGuard,
    RateLimit,
    ToolScope,
}

impl BreakdownCategory {
    pub const ORDER: [BreakdownCategory; 8] = [
        BreakdownCategory::AgentGateway,
        BreakdownCategory::Authentication,
        BreakdownCategory::Authorization,
        BreakdownCategory::Cors,
        BreakdownCategory::Tls,
        BreakdownCategory::PromptGuard,
        BreakdownCategory::RateLimit,
        BreakdownCategory::ToolScope,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BreakdownCategory::AgentGateway => "AgentGateway",
            BreakdownCategory::Authentication => "Authentication",
            BreakdownCategory::Authorization => "Authorization",
            BreakdownCategory::Cors => "CORS",
            BreakdownCategory::Tls => "TLS",
            BreakdownCategory::PromptGuard => "Prompt Guard",
            BreakdownCategory::RateLimit => "Rate Limit",
            BreakdownCategory::ToolScope => "Tool Scope",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            BreakdownCategory::AgentGateway => "AGW",
            BreakdownCategory::Authentication => "Auth",
            BreakdownCategory::Authorization => "Authz",
            BreakdownCategory::Cors => "CORS",
            BreakdownCategory::Tls => "TLS",
            BreakdownCategory::PromptGuard => "PG",
            BreakdownCategory::RateLimit => "RL",
            BreakdownCategory::ToolScope => "Tools",
        }
    }
}

/// `GET /api/governance/breakdown`
///
/// A category is absent when the active policy does not require it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Breakdown {
    pub agent_gateway_score: Option<u32>,
    pub authentication_score: Option<u32>,
    pub authorization_score: Option<u32>,
    pub cors_score: Option<u32>,
    pub tls_score: Option<u32>,
    pub prompt_guard_score: Option<u32>,
    pub rate_limit_score: Option<u32>,
    pub tool_scope_score: Option<u32>,
}

impl Breakdown {
    pub fn get(&self, category: BreakdownCategory) -> Option<u32> {
        match category {
            BreakdownCategory::AgentGateway => self.agent_gateway_score,
            BreakdownCategory::Authentication => self.authentication_score,
            BreakdownCategory::Authorization => self.authorization_score,
            BreakdownCategory::Cors => self.cors_score,
            BreakdownCategory::Tls => self.tls_score,
            BreakdownCategory::PromptGuard => self.prompt_guard_score,
            BreakdownCategory::RateLimit => self.rate_limit_score,
            BreakdownCategory::ToolScope => self.tool_scope_score,
        }
    }

    /// Present categories in canonical order
    pub fn entries(&self) -> Vec<(BreakdownCategory, u32)> {
        BreakdownCategory::ORDER
            .iter()
            .filter_map(|c| self.get(*c).map(|score| (*c, score)))
            .collect()
    }
}

// =============================================================================
// Trends
// =============================================================================

/// One sample of the score time series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPoint {
    pub timestamp: String,
    pub score: u32,
    pub findings: u32,
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

/// `GET /api/governance/trends`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub trends: Vec<TrendPoint>,
}

// =============================================================================
// MCP servers
// =============================================================================

/// Where the controller discovered an MCP server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServerSource {
    KagentMCPServer,
    KagentRemoteMCPServer,
    AgentgatewayBackendTarget,
    #[default]
    #[serde(other)]
    Service,
}

impl ServerSource {
    pub fn label(&self) -> &'static str {
        match self {
            ServerSource::KagentMCPServer => "Kagent MCPServer",
            ServerSource::KagentRemoteMCPServer => "Kagent Remote",
            ServerSource::AgentgatewayBackendTarget => "AGW Backend",
            ServerSource::Service => "K8s Service",
        }
    }
}

/// Compliance status of an MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Compliant,
    Warning,
    Failing,
    #[default]
    Critical,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServerStatus::Compliant => "compliant",
            ServerStatus::Warning => "warning",
            ServerStatus::Failing => "failing",
            ServerStatus::Critical => "critical",
            ServerStatus::Unknown => "unknown",
        };
        f.pad(s)
    }
}

/// Per-control sub-scores of one server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerScoreBreakdown {
    pub gateway_routing: u32,
    pub authentication: u32,
    pub authorization: u32,
    pub tls: u32,
    pub cors: u32,
    pub rate_limit: u32,
    pub prompt_guard: u32,
    pub tool_scope: u32,
}

impl ServerScoreBreakdown {
    /// Sub-scores with their display labels, in a stable order
    pub fn entries(&self) -> [(&'static str, u32); 8] {
        [
            ("Gateway Routing", self.gateway_routing),
            ("Authentication", self.authentication),
            ("Authorization", self.authorization),
            ("TLS", self.tls),
            ("CORS", self.cors),
            ("Rate Limit", self.rate_limit),
            ("Prompt Guard", self.prompt_guard),
            ("Tool Scope", self.tool_scope),
        ]
    }
}

/// Outcome of an individual control check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExplanationStatus {
    Pass,
    Partial,
    #[default]
    Fail,
    NotRequired,
}

/// Controller-supplied reasoning for one category score
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreExplanation {
    pub category: String,
    pub score: u32,
    pub max_score: u32,
    pub status: ExplanationStatus,
    #[serde_as(as = "DefaultOnNull")]
    pub reasons: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub suggestions: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub sources: Vec<String>,
}

/// Health of a resource related to a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelatedStatus {
    Healthy,
    Warning,
    Critical,
    #[default]
    Missing,
}

/// A Kubernetes resource linked to a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedResource {
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub status: RelatedStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// One governed MCP server
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerView {
    pub id: String,
    pub name: String,
    pub namespace: String,
    pub source: ServerSource,
    pub transport: Option<String>,
    pub url: Option<String>,
    pub port: Option<u16>,

    pub tool_count: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub tool_names: Vec<String>,
    pub effective_tool_count: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub effective_tool_names: Vec<String>,
    pub has_tool_restriction: bool,

    #[serde_as(as = "DefaultOnNull")]
    pub related_backends: Vec<RelatedResource>,
    #[serde_as(as = "DefaultOnNull")]
    pub related_policies: Vec<RelatedResource>,
    #[serde_as(as = "DefaultOnNull")]
    pub related_routes: Vec<RelatedResource>,
    #[serde_as(as = "DefaultOnNull")]
    pub related_gateways: Vec<RelatedResource>,
    #[serde_as(as = "DefaultOnNull")]
    pub related_agents: Vec<RelatedResource>,
    #[serde_as(as = "DefaultOnNull")]
    pub related_services: Vec<RelatedResource>,

    pub routed_through_gateway: bool,
    #[serde(rename = "hasTLS")]
    pub has_tls: bool,
    pub has_auth: bool,
    #[serde(rename = "hasJWT")]
    pub has_jwt: bool,
    pub jwt_mode: Option<String>,
    #[serde(rename = "hasRBAC")]
    pub has_rbac: bool,
    #[serde(rename = "hasCORS")]
    pub has_cors: bool,
    pub has_rate_limit: bool,
    pub has_prompt_guard: bool,

    pub score: u32,
    pub grade: String,
    pub status: ServerStatus,
    #[serde_as(as = "DefaultOnNull")]
    pub findings: Vec<Finding>,
    pub score_breakdown: ServerScoreBreakdown,
    pub score_explanations: Option<Vec<ScoreExplanation>>,
}

impl ServerView {
    /// Security controls with their labels, in display order
    pub fn controls(&self) -> [(&'static str, bool); 7] {
        [
            ("Gateway", self.routed_through_gateway),
            ("TLS", self.has_tls),
            ("JWT", self.has_jwt),
            ("RBAC", self.has_rbac),
            ("CORS", self.has_cors),
            ("Rate Limit", self.has_rate_limit),
            ("Prompt Guard", self.has_prompt_guard),
        ]
    }
}

/// Cluster-wide MCP server counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSummary {
    #[serde(rename = "totalMCPServers")]
    pub total_mcp_servers: u32,
    pub routed_servers: u32,
    pub unrouted_servers: u32,
    pub secured_servers: u32,
    pub at_risk_servers: u32,
    pub critical_servers: u32,
    pub total_tools: u32,
    pub exposed_tools: u32,
    pub average_score: f64,
}

/// `GET /api/governance/mcp-servers`
///
/// Servers are held behind `Arc` so a selection can share the exact object
/// committed with the view model.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpServersResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub servers: Vec<Arc<ServerView>>,
    pub summary: ServerSummary,
}

impl McpServersResponse {
    pub fn find(&self, id: &str) -> Option<&Arc<ServerView>> {
        self.servers.iter().find(|s| s.id == id)
    }
}

// =============================================================================
// Optional sources
// =============================================================================

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthInfo {
    pub status: String,
    pub version: String,
    pub last_scan_time: Option<String>,
    pub scan_interval: Option<String>,
}

impl Default for HealthInfo {
    fn default() -> Self {
        Self {
            status: "unknown".to_string(),
            version: "unknown".to_string(),
            last_scan_time: None,
            scan_interval: None,
        }
    }
}

/// A risk identified by the AI agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiRisk {
    pub category: String,
    pub severity: String,
    pub description: String,
    pub impact: String,
}

/// AI-agent evaluation result
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiScore {
    pub score: u32,
    pub grade: String,
    pub reasoning: String,
    #[serde_as(as = "DefaultOnNull")]
    pub risks: Vec<AiRisk>,
    #[serde_as(as = "DefaultOnNull")]
    pub suggestions: Vec<String>,
    pub timestamp: String,
}

/// AI versus algorithmic score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiComparison {
    pub ai_score: u32,
    pub ai_grade: String,
    pub algorithmic_score: u32,
    pub algorithmic_grade: String,
    pub score_difference: i64,
}

/// AI scan scheduling state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiScanConfig {
    pub scan_interval: String,
    pub scan_paused: bool,
}

/// `GET /api/governance/ai-score`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiScoreResponse {
    pub ai_score: Option<AiScore>,
    pub available: bool,
    pub enabled: bool,
    pub message: Option<String>,
    pub comparison: Option<AiComparison>,
    pub scan_config: Option<AiScanConfig>,
}

/// Reply to `POST /api/governance/ai-score/refresh` and `.../toggle`
///
/// `success == false` is a normal reply, e.g. while the AI agent is disabled
/// or the first scan has not finished. `scan_paused` is only sent by toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_paused: Option<bool>,
}

/// Per-namespace score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceScore {
    pub namespace: String,
    pub score: u32,
    pub findings: u32,
}

/// `GET /api/governance/namespaces`
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespacesResponse {
    #[serde_as(as = "DefaultOnNull")]
    pub namespaces: Vec<NamespaceScore>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse() {
        assert_eq!("Critical".parse::<Severity>(), Ok(Severity::Critical));
        assert_eq!("low".parse::<Severity>(), Ok(Severity::Low));
        assert!("Informational".parse::<Severity>().is_err());
    }

    #[test]
    fn test_finding_keeps_unknown_severity() {
        let finding: Finding = serde_json::from_str(
            r#"{"id":"X-1","severity":"Informational","category":"TLS"}"#,
        )
        .unwrap();

        assert_eq!(finding.severity_label, "Informational");
        assert_eq!(finding.severity(), None);
        assert!(finding.resource_ref.is_none());
    }

    #[test]
    fn test_score_response_defaults() {
        let score: ScoreResponse = serde_json::from_str(r#"{"score": 0}"#).unwrap();

        assert_eq!(score.grade, "F");
        assert_eq!(score.phase, "Unknown");
        assert!(score.categories.is_empty());
        assert_eq!(score.severity_penalties, SeverityPenalties::default());
    }

    #[test]
    fn test_server_view_wire_names() {
        let json = r#"{
            "id": "srv-1",
            "name": "github",
            "namespace": "tools",
            "source": "KagentRemoteMCPServer",
            "toolCount": 57,
            "effectiveToolCount": 10,
            "hasTLS": true,
            "hasJWT": true,
            "hasRBAC": false,
            "hasCORS": true,
            "routedThroughGateway": true,
            "status": "warning"
        }"#;

        let server: ServerView = serde_json::from_str(json).unwrap();

        assert_eq!(server.source, ServerSource::KagentRemoteMCPServer);
        assert_eq!(server.tool_count, 57);
        assert_eq!(server.effective_tool_count, 10);
        assert!(server.has_tls && server.has_jwt && server.has_cors);
        assert!(!server.has_rbac);
        assert_eq!(server.status, ServerStatus::Warning);
        assert!(server.score_explanations.is_none());
    }

    #[test]
    fn test_unrecognized_statuses_are_tolerated() {
        let server: ServerView = serde_json::from_str(r#"{"id":"srv-9","status":"degraded"}"#).unwrap();
        assert_eq!(server.status, ServerStatus::Unknown);

        let detail: ResourceDetail = serde_json::from_str(r#"{"status":"pending"}"#).unwrap();
        assert_eq!(detail.status, ResourceStatus::Info);
    }

    #[test]
    fn test_summary_wire_names() {
        let summary: ServerSummary =
            serde_json::from_str(r#"{"totalMCPServers": 4, "averageScore": 61.5}"#).unwrap();

        assert_eq!(summary.total_mcp_servers, 4);
        assert_eq!(summary.average_score, 61.5);
    }

    #[test]
    fn test_breakdown_entries_skip_absent_categories() {
        let breakdown: Breakdown =
            serde_json::from_str(r#"{"tlsScore": 80, "agentGatewayScore": 100}"#).unwrap();

        let entries = breakdown.entries();
        assert_eq!(
            entries,
            vec![
                (BreakdownCategory::AgentGateway, 100),
                (BreakdownCategory::Tls, 80),
            ]
        );
    }

    #[test]
    fn test_severity_penalties_wire_names() {
        let penalties: SeverityPenalties =
            serde_json::from_str(r#"{"Critical": 50, "High": 30, "Medium": 10, "Low": 1}"#).unwrap();

        assert_eq!(penalties.for_severity(Severity::Critical), 50);
        assert_eq!(penalties.for_severity(Severity::Low), 1);
    }

    #[test]
    fn test_ai_action_replies() {
        let toggle: AiActionResponse = serde_json::from_str(
            r#"{"success": true, "scanPaused": true, "message": "AI periodic scanning paused"}"#,
        )
        .unwrap();
        assert!(toggle.success);
        assert_eq!(toggle.scan_paused, Some(true));

        let refresh: AiActionResponse = serde_json::from_str(
            r#"{"success": false, "message": "AI agent is not initialized"}"#,
        )
        .unwrap();
        assert!(!refresh.success);
        assert!(refresh.scan_paused.is_none());
    }

    #[test]
    fn test_partial_severity_penalties_keep_defaults() {
        let score: ScoreResponse =
            serde_json::from_str(r#"{"score": 70, "severityPenalties": {"Critical": 60}}"#).unwrap();

        let penalties = score.severity_penalties;
        assert_eq!(penalties.critical, 60);
        assert_eq!(penalties.high, 25);
        assert_eq!(penalties.medium, 15);
        assert_eq!(penalties.low, 5);
    }

    #[test]
    fn test_null_lists_decode_as_empty() {
        let findings: FindingsResponse =
            serde_json::from_str(r#"{"findings": null, "total": 0, "bySeverity": null}"#).unwrap();
        assert!(findings.findings.is_empty());
        assert!(findings.by_severity.is_empty());

        let score: ScoreResponse =
            serde_json::from_str(r#"{"score": 100, "grade": "A", "categories": null}"#).unwrap();
        assert!(score.categories.is_empty());

        let detail: ResourceDetailResponse =
            serde_json::from_str(r#"{"resources": null, "total": 0}"#).unwrap();
        assert!(detail.resources.is_empty());

        let trends: TrendsResponse = serde_json::from_str(r#"{"trends": null}"#).unwrap();
        assert!(trends.trends.is_empty());

        let namespaces: NamespacesResponse = serde_json::from_str(r#"{"namespaces": null}"#).unwrap();
        assert!(namespaces.namespaces.is_empty());
    }

    #[test]
    fn test_kagent_server_with_nil_slices() {
        let json = r#"{
            "servers": [{
                "id": "kagent/fetch",
                "name": "fetch",
                "namespace": "kagent",
                "source": "KagentMCPServer",
                "toolCount": 0,
                "toolNames": null,
                "effectiveToolNames": null,
                "relatedBackends": null,
                "relatedPolicies": null,
                "relatedRoutes": null,
                "relatedGateways": null,
                "relatedAgents": null,
                "relatedServices": null,
                "findings": null,
                "status": "critical",
                "scoreExplanations": null
            }],
            "summary": {"totalMCPServers": 1}
        }"#;

        let response: McpServersResponse = serde_json::from_str(json).unwrap();

        let server = response.find("kagent/fetch").unwrap();
        assert_eq!(server.source, ServerSource::KagentMCPServer);
        assert!(server.tool_names.is_empty());
        assert!(server.related_backends.is_empty());
        assert!(server.related_services.is_empty());
        assert!(server.findings.is_empty());
        assert!(server.score_explanations.is_none());
    }
}
