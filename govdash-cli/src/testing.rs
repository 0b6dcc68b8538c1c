//! In-memory controller fixtures for unit tests

use async_trait::async_trait;
use chrono::Utc;
use govdash_shared::{
    AiActionResponse, AiScanConfig, AiScoreResponse, Breakdown, CategoryStatus, DashboardViewModel, Finding, FindingsResponse,
    HealthInfo, McpServersResponse, NamespaceScore, NamespacesResponse, ResourceDetailResponse,
    ResourceSummary, ScoreCategory, ScoreResponse, ServerStatus, ServerSummary, ServerView,
    TrendsResponse,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::client::{Endpoint, GovernanceSource, SourceError};

fn finding(id: &str, severity: &str, category: &str, resource_ref: Option<&str>) -> Finding {
    Finding {
        id: id.to_string(),
        severity_label: severity.to_string(),
        category: category.to_string(),
        title: format!("{} check failed", category),
        resource_ref: resource_ref.map(str::to_string),
        ..Default::default()
    }
}

/// Three servers: `srv-1` github, `srv-2` filesystem, `srv-7` slack
pub fn sample_servers() -> Vec<Arc<ServerView>> {
    vec![
        Arc::new(ServerView {
            id: "srv-1".to_string(),
            name: "github".to_string(),
            namespace: "tools".to_string(),
            tool_count: 57,
            effective_tool_count: 10,
            has_tool_restriction: true,
            routed_through_gateway: true,
            has_cors: true,
            score: 72,
            grade: "B".to_string(),
            status: ServerStatus::Warning,
            findings: vec![
                finding("TLS-001", "High", "TLS", None),
                finding("RL-001", "Medium", "RateLimit", Some("tools/github-route")),
            ],
            ..Default::default()
        }),
        Arc::new(ServerView {
            id: "srv-2".to_string(),
            name: "filesystem".to_string(),
            namespace: "tools".to_string(),
            tool_count: 12,
            effective_tool_count: 12,
            score: 35,
            grade: "D".to_string(),
            status: ServerStatus::Critical,
            findings: vec![finding("TLS-001", "High", "TLS", None)],
            ..Default::default()
        }),
        Arc::new(ServerView {
            id: "srv-7".to_string(),
            name: "slack".to_string(),
            namespace: "chat".to_string(),
            score: 55,
            grade: "C".to_string(),
            status: ServerStatus::Failing,
            findings: vec![finding("AUTH-002", "Critical", "Authentication", None)],
            ..Default::default()
        }),
    ]
}

pub fn sample_score() -> ScoreResponse {
    ScoreResponse {
        score: 64,
        grade: "C".to_string(),
        phase: "NonCompliant".to_string(),
        categories: vec![
            ScoreCategory {
                category: "TLS".to_string(),
                score: 80,
                weight: 50,
                weighted: 40.0,
                status: CategoryStatus::Warning,
                ..Default::default()
            },
            ScoreCategory {
                category: "CORS".to_string(),
                score: 48,
                weight: 50,
                weighted: 24.0,
                status: CategoryStatus::Critical,
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

pub fn servers_response(servers: Vec<Arc<ServerView>>) -> McpServersResponse {
    McpServersResponse {
        summary: ServerSummary {
            total_mcp_servers: servers.len() as u32,
            ..Default::default()
        },
        servers,
    }
}

/// A view model carrying only the given servers
pub fn view_model_with(servers: Vec<Arc<ServerView>>) -> DashboardViewModel {
    DashboardViewModel {
        mcp_servers: servers_response(servers),
        ..DashboardViewModel::empty(Utc::now())
    }
}

/// Scriptable in-memory `GovernanceSource`
///
/// Failing endpoints answer HTTP 500. With a gate installed, `score()` waits
/// for one permit per call, which holds a refresh in flight. AI actions fail
/// together with the AI score endpoint.
pub struct StaticSource {
    score: ScoreResponse,
    servers: Mutex<Vec<Arc<ServerView>>>,
    failing: Mutex<HashSet<Endpoint>>,
    gate: Option<Arc<Semaphore>>,
    score_calls: AtomicUsize,
    scan_calls: AtomicUsize,
    ai_refresh_calls: AtomicUsize,
    ai_paused: AtomicBool,
}

impl StaticSource {
    pub fn healthy(servers: Vec<Arc<ServerView>>) -> Self {
        Self {
            score: sample_score(),
            servers: Mutex::new(servers),
            failing: Mutex::new(HashSet::new()),
            gate: None,
            score_calls: AtomicUsize::new(0),
            scan_calls: AtomicUsize::new(0),
            ai_refresh_calls: AtomicUsize::new(0),
            ai_paused: AtomicBool::new(false),
        }
    }

    pub fn without_optional(self) -> Self {
        for endpoint in Endpoint::OPTIONAL {
            self.fail(endpoint);
        }
        self
    }

    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn fail(&self, endpoint: Endpoint) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.failing.lock().unwrap().remove(&endpoint);
    }

    pub fn set_servers(&self, servers: Vec<Arc<ServerView>>) {
        *self.servers.lock().unwrap() = servers;
    }

    pub fn score_calls(&self) -> usize {
        self.score_calls.load(Ordering::SeqCst)
    }

    pub fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    pub fn ai_refresh_calls(&self) -> usize {
        self.ai_refresh_calls.load(Ordering::SeqCst)
    }

    fn check(&self, endpoint: Endpoint) -> Result<(), SourceError> {
        if self.failing.lock().unwrap().contains(&endpoint) {
            return Err(SourceError::Status {
                status: 500,
                reason: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GovernanceSource for StaticSource {
    async fn score(&self) -> Result<ScoreResponse, SourceError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.check(Endpoint::Score)?;
        Ok(self.score.clone())
    }

    async fn findings(&self) -> Result<FindingsResponse, SourceError> {
        self.check(Endpoint::Findings)?;
        let findings = vec![
            finding("AGW-001", "Critical", "AgentGateway", Some("default/mcp-route")),
            finding("CORS-003", "Low", "CORS", None),
        ];
        Ok(FindingsResponse {
            total: findings.len() as u32,
            findings,
            ..Default::default()
        })
    }

    async fn resources(&self) -> Result<ResourceSummary, SourceError> {
        self.check(Endpoint::Resources)?;
        Ok(ResourceSummary {
            compliant_resources: 3,
            non_compliant_resources: 1,
            ..Default::default()
        })
    }

    async fn breakdown(&self) -> Result<Breakdown, SourceError> {
        self.check(Endpoint::Breakdown)?;
        Ok(Breakdown {
            tls_score: Some(80),
            cors_score: Some(48),
            ..Default::default()
        })
    }

    async fn trends(&self) -> Result<TrendsResponse, SourceError> {
        self.check(Endpoint::Trends)?;
        Ok(TrendsResponse::default())
    }

    async fn resource_detail(&self) -> Result<ResourceDetailResponse, SourceError> {
        self.check(Endpoint::ResourceDetail)?;
        Ok(ResourceDetailResponse::default())
    }

    async fn mcp_servers(&self) -> Result<McpServersResponse, SourceError> {
        self.check(Endpoint::McpServers)?;
        let servers = self.servers.lock().unwrap().clone();
        Ok(servers_response(servers))
    }

    async fn health(&self) -> Result<HealthInfo, SourceError> {
        self.check(Endpoint::Health)?;
        Ok(HealthInfo {
            status: "ok".to_string(),
            version: "0.4.2".to_string(),
            ..Default::default()
        })
    }

    async fn ai_score(&self) -> Result<AiScoreResponse, SourceError> {
        self.check(Endpoint::AiScore)?;
        Ok(AiScoreResponse {
            enabled: true,
            scan_config: Some(AiScanConfig {
                scan_interval: "5m".to_string(),
                scan_paused: self.ai_paused.load(Ordering::SeqCst),
            }),
            ..Default::default()
        })
    }

    async fn namespaces(&self) -> Result<NamespacesResponse, SourceError> {
        self.check(Endpoint::Namespaces)?;
        Ok(NamespacesResponse {
            namespaces: vec![NamespaceScore {
                namespace: "tools".to_string(),
                score: 61,
                findings: 3,
            }],
        })
    }

    async fn trigger_scan(&self) -> Result<(), SourceError> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn refresh_ai_score(&self) -> Result<AiActionResponse, SourceError> {
        self.ai_refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.check(Endpoint::AiScore)?;
        Ok(AiActionResponse {
            success: true,
            message: "AI evaluation triggered".to_string(),
            scan_paused: None,
        })
    }

    async fn toggle_ai_scan(&self) -> Result<AiActionResponse, SourceError> {
        self.check(Endpoint::AiScore)?;
        let paused = !self.ai_paused.fetch_xor(true, Ordering::SeqCst);
        Ok(AiActionResponse {
            success: true,
            message: format!("AI periodic scanning {}", if paused { "paused" } else { "resumed" }),
            scan_paused: Some(paused),
        })
    }
}
